// ABOUTME: The Backend trait: the four requests a job page can send to the application tracker.
// ABOUTME: Implementations may be a local JSON store, a browser extension bridge or a test double.

use async_trait::async_trait;
use jobtrail_extract::JobRecord;

use crate::error::ChannelError;
use crate::messages::{Ack, ExistsCheck};

/// Request/response channel to wherever applications are recorded.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Whether `url` is already logged or saved.
    async fn check_job_exists(&self, url: &str) -> Result<ExistsCheck, ChannelError>;

    /// Records a submitted application.
    async fn log_application(&self, job: &JobRecord) -> Result<Ack, ChannelError>;

    /// Bookmarks a job without applying.
    async fn save_for_later(&self, job: &JobRecord) -> Result<Ack, ChannelError>;

    /// Opens the tracker dashboard.
    async fn open_popup(&self) -> Result<(), ChannelError>;
}
