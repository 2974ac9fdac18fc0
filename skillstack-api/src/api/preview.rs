//! Link previews for the portfolio editor.

use std::time::Duration;

use fieldcheck::debounce::Debouncer;
use fieldcheck::resource::{Resource, ResourceState};
use fieldcheck::sequence::Sequencer;
use fieldcheck::view::is_previewable_url;
use serde::{Deserialize, Serialize};

use crate::client::SkillStackClient;
use crate::error::Error;

/// What the server scraped from a page's Open Graph tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPreview {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl LinkPreview {
    /// The title to fill in, if the user has not typed one.
    pub fn suggested_title(&self, current_title: &str) -> Option<&str> {
        if !current_title.trim().is_empty() {
            return None;
        }
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}

impl SkillStackClient {
    /// Fetch the preview for `url`.
    pub async fn link_preview(&self, url: &str) -> Result<LinkPreview, Error> {
        let mut endpoint = self.url(&self.endpoints().preview)?;
        endpoint.query_pairs_mut().append_pair("url", url);
        self.get_json(endpoint).await
    }
}

/// Debounced preview fetching for the link input.
///
/// Call [`LinkPreviewer::request`] when the URL input loses focus. Requests
/// settle for [`LinkPreviewer::DEFAULT_DELAY`] first, and a response is only
/// applied if no later request was made in the meantime.
#[derive(Clone)]
pub struct LinkPreviewer {
    client: SkillStackClient,
    debouncer: Debouncer,
    sequencer: Sequencer,
    preview: Resource<LinkPreview>,
    delay: Duration,
}

impl LinkPreviewer {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(150);

    /// Create a previewer on the current tokio runtime.
    pub fn new(client: SkillStackClient) -> Result<Self, Error> {
        let debouncer = Debouncer::try_current()
            .ok_or_else(|| Error::config("link previews need a running tokio runtime"))?;
        Ok(Self {
            client,
            debouncer,
            sequencer: Sequencer::new(),
            preview: Resource::new(),
            delay: Self::DEFAULT_DELAY,
        })
    }

    /// Set the settle delay.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The latest applicable preview.
    pub fn preview(&self) -> &Resource<LinkPreview> {
        &self.preview
    }

    /// Schedule a preview for `url`. Returns `false` (and does nothing) if it
    /// is not an absolute http(s) link.
    pub fn request(&self, url: &str) -> bool {
        let url = url.trim();
        if !is_previewable_url(url) {
            return false;
        }

        let token = self.sequencer.next();
        let url = url.to_string();
        let client = self.client.clone();
        let sequencer = self.sequencer.clone();
        let preview = self.preview.clone();
        let runtime = self.debouncer.runtime().clone();

        self.debouncer.schedule(self.delay, move || {
            preview.set_loading();
            runtime.spawn(async move {
                let state = match client.link_preview(&url).await {
                    Ok(p) => ResourceState::Ready(p),
                    Err(e) => {
                        log::debug!("preview for {url} failed: {e}");
                        ResourceState::Error(e.to_string().into())
                    }
                };
                if !preview.set_if(|_| sequencer.is_current(token), state) {
                    log::trace!("dropping stale preview for {url}");
                }
            });
        });
        true
    }

    /// Drop any scheduled or in-flight preview.
    pub fn cancel(&self) {
        self.debouncer.cancel();
        self.sequencer.invalidate();
        self.preview.set_if(ResourceState::is_loading, ResourceState::Idle);
    }
}
