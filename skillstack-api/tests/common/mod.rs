//! A throwaway SkillStack site for the integration tests.

#![allow(dead_code)]

use std::convert::Infallible;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::json;
use skillstack_api::SkillStackClient;
use tokio::net::TcpListener;

/// One request as the site saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub requested_with: Option<String>,
    pub csrf: Option<String>,
    pub cookie: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Default)]
pub struct MockSite {
    pub requests: Arc<Mutex<Vec<Recorded>>>,
    pub unread: Arc<AtomicU64>,
    taken: Arc<Vec<String>>,
}

impl MockSite {
    /// Start serving on an ephemeral port. Returns the site and its base URL.
    pub async fn start(taken: &[&str]) -> (Self, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let site = Self {
            taken: Arc::new(taken.iter().map(|t| t.to_string()).collect()),
            ..Default::default()
        };

        let server = site.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let site = server.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let site = site.clone();
                        async move { Ok::<_, Infallible>(site.handle(req).await) }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        (site, format!("http://{addr}"))
    }

    pub fn client(url: &str) -> SkillStackClient {
        SkillStackClient::builder()
            .url(url)
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    async fn handle(&self, req: Request<Incoming>) -> Response<Full<Bytes>> {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let query: Vec<(String, String)> =
            url::form_urlencoded::parse(req.uri().query().unwrap_or("").as_bytes())
                .into_owned()
                .collect();
        let requested_with = header(&req, "x-requested-with");
        let csrf = header(&req, "x-csrftoken");
        let cookie = header(&req, "cookie");
        let body = match req.into_body().collect().await {
            Ok(collected) => String::from_utf8_lossy(&collected.to_bytes()).into_owned(),
            Err(_) => String::new(),
        };

        let recorded = Recorded {
            method,
            path,
            query,
            requested_with,
            csrf,
            cookie,
            body,
        };
        self.requests.lock().unwrap().push(recorded.clone());

        match (recorded.method.as_str(), recorded.path.as_str()) {
            ("GET", "/users/check-username/") => {
                let name = recorded.param("username").unwrap_or_default();
                reply_json(json!({ "taken": self.taken.iter().any(|t| t == name) }))
            }
            ("GET", "/portfolio/preview/") => {
                let url = recorded.param("url").unwrap_or_default().to_string();
                if url.contains("slow") {
                    tokio::time::sleep(Duration::from_millis(300)).await;
                }
                if url.contains("broken") {
                    return reply(StatusCode::BAD_GATEWAY, "upstream failed");
                }
                reply_json(json!({
                    "title": format!("Title of {url}"),
                    "image_url": format!("{url}/og.png"),
                }))
            }
            ("GET", "/messaging/unread-count/") => {
                reply_json(json!({ "unread": self.unread.load(Ordering::SeqCst) }))
            }
            ("GET", "/garbage/") => reply(StatusCode::OK, "<html>login</html>"),
            ("POST", p) if p.starts_with("/messaging/") && p.ends_with("/read/") => {
                if recorded.csrf.is_none() {
                    return reply(StatusCode::FORBIDDEN, "CSRF verification failed.");
                }
                reply_json(json!({ "ok": true }))
            }
            ("POST", p) if p.starts_with("/projects/") && p.ends_with("/status/") => {
                reply_json(json!({ "ok": true }))
            }
            _ => reply(StatusCode::NOT_FOUND, "Not Found"),
        }
    }
}

fn header(req: &Request<Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn reply(status: StatusCode, body: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/html")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

fn reply_json(value: serde_json::Value) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(value.to_string())))
        .unwrap()
}

/// A base URL nothing listens on.
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
