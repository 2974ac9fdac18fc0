//! Project endpoints.

use fieldcheck::view::ProjectStatus;
use serde::Serialize;

use crate::client::SkillStackClient;
use crate::config::with_id;
use crate::error::Error;

#[derive(Debug, Serialize)]
struct StatusBody {
    status: ProjectStatus,
}

impl SkillStackClient {
    /// Change a project's status. Best effort: the editor's badge already
    /// shows the new status, so callers usually only log a failure.
    pub async fn update_status(&self, project_id: &str, status: ProjectStatus) -> Result<(), Error> {
        let url = self.url(&with_id(&self.endpoints().status_update, project_id))?;
        self.post_json(url, &StatusBody { status }).await
    }
}
