//! Scripted remote check shared by the async tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use fieldcheck::error::RemoteCheckFailure;
use fieldcheck::field::{RemoteCheck, RemoteVerdict, check_fn};

pub const TAKEN: &str = "This username is already taken.";

/// A fake username endpoint: records every call, answers after a per-value
/// latency, and rejects the configured names.
#[derive(Clone, Default)]
pub struct FakeServer {
    pub calls: Arc<Mutex<Vec<String>>>,
    taken: Vec<String>,
    latency: HashMap<String, Duration>,
    default_latency: Duration,
    failing: bool,
}

impl FakeServer {
    pub fn new() -> Self {
        Self {
            default_latency: Duration::from_millis(50),
            ..Default::default()
        }
    }

    pub fn taken(mut self, names: &[&str]) -> Self {
        self.taken = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn latency(mut self, value: &str, latency: Duration) -> Self {
        self.latency.insert(value.to_string(), latency);
        self
    }

    pub fn default_latency(mut self, latency: Duration) -> Self {
        self.default_latency = latency;
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn check(&self) -> Arc<dyn RemoteCheck> {
        let server = self.clone();
        check_fn(move |value: String| {
            server.calls.lock().unwrap().push(value.clone());
            let latency = server
                .latency
                .get(&value)
                .copied()
                .unwrap_or(server.default_latency);
            let taken = server.taken.contains(&value);
            let failing = server.failing;
            async move {
                tokio::time::sleep(latency).await;
                if failing {
                    return Err(RemoteCheckFailure::transport("connection reset"));
                }
                Ok(if taken {
                    RemoteVerdict::rejected(TAKEN)
                } else {
                    RemoteVerdict::accepted()
                })
            }
        })
    }
}

pub async fn wait_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
