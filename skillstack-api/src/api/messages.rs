//! Inbox endpoints.

use serde::{Deserialize, Serialize};

use crate::client::SkillStackClient;
use crate::config::with_id;
use crate::error::Error;

#[derive(Debug, Deserialize)]
struct UnreadResponse {
    #[serde(default)]
    unread: u64,
}

#[derive(Debug, Serialize)]
struct MarkReadBody<'a> {
    id: &'a str,
}

impl SkillStackClient {
    /// Number of unread messages for the logged-in user.
    pub async fn unread_count(&self) -> Result<u64, Error> {
        let url = self.url(&self.endpoints().unread)?;
        let body: UnreadResponse = self.get_json(url).await?;
        Ok(body.unread)
    }

    /// Mark a message as read.
    pub async fn mark_read(&self, id: &str) -> Result<(), Error> {
        let url = self.url(&with_id(&self.endpoints().mark_read, id))?;
        self.post_json(url, &MarkReadBody { id }).await
    }

    /// Mark a message as read without waiting for the answer.
    ///
    /// The inbox card opens right away; a failure is only logged.
    pub fn mark_read_detached(&self, id: impl Into<String>) -> tokio::task::JoinHandle<()> {
        let client = self.clone();
        let id = id.into();
        tokio::spawn(async move {
            if let Err(e) = client.mark_read(&id).await {
                log::debug!("mark-read for message {id} failed: {e}");
            }
        })
    }
}
