// ABOUTME: JsonStore, a file-backed tracker backend holding logged and saved job lists.
// ABOUTME: Logging a saved job moves it; repeated log/save requests are acknowledged without duplicates.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use jobtrail_extract::JobRecord;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::backend::Backend;
use crate::error::ChannelError;
use crate::messages::{Ack, ExistsCheck};

pub const LOGGED_MESSAGE: &str = "Application logged successfully!";
pub const ALREADY_LOGGED_MESSAGE: &str = "You've already logged this job application.";
pub const SAVED_MESSAGE: &str = "Job saved for later!";
pub const ALREADY_SAVED_MESSAGE: &str = "You've already saved this job for later.";

/// On-disk layout of the store file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applications {
    #[serde(default)]
    pub logged: Vec<JobRecord>,
    #[serde(default)]
    pub saved: Vec<JobRecord>,
}

impl Applications {
    pub fn check(&self, url: &str) -> ExistsCheck {
        let in_logged = self.logged.iter().any(|j| j.url == url);
        let in_saved = self.saved.iter().any(|j| j.url == url);
        ExistsCheck {
            exists: in_logged || in_saved,
            in_logged: Some(in_logged),
            in_saved: Some(in_saved),
        }
    }
}

/// Backend that keeps applications in a single JSON file.
///
/// Each request reads the file, applies the change and writes it back while
/// holding an in-process lock. A missing file reads as an empty store.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents of the store.
    pub async fn snapshot(&self) -> Result<Applications, ChannelError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn load(&self) -> Result<Applications, ChannelError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Applications::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Applications::default()),
            Err(err) => Err(err.into()),
        }
    }

    async fn persist(&self, apps: &Applications) -> Result<(), ChannelError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let body = serde_json::to_vec_pretty(apps)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl Backend for JsonStore {
    async fn check_job_exists(&self, url: &str) -> Result<ExistsCheck, ChannelError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.check(url))
    }

    async fn log_application(&self, job: &JobRecord) -> Result<Ack, ChannelError> {
        let _guard = self.lock.lock().await;
        let mut apps = self.load().await?;
        if apps.logged.iter().any(|j| j.url == job.url) {
            return Ok(Ack::new(ALREADY_LOGGED_MESSAGE));
        }
        let before = apps.saved.len();
        apps.saved.retain(|j| j.url != job.url);
        if apps.saved.len() != before {
            tracing::debug!(url = %job.url, "moving saved job to logged");
        }
        apps.logged.push(job.clone());
        self.persist(&apps).await?;
        Ok(Ack::new(LOGGED_MESSAGE))
    }

    async fn save_for_later(&self, job: &JobRecord) -> Result<Ack, ChannelError> {
        let _guard = self.lock.lock().await;
        let mut apps = self.load().await?;
        let check = apps.check(&job.url);
        if check.in_logged == Some(true) {
            return Ok(Ack::new(ALREADY_LOGGED_MESSAGE));
        }
        if check.in_saved == Some(true) {
            return Ok(Ack::new(ALREADY_SAVED_MESSAGE));
        }
        apps.saved.push(job.clone());
        self.persist(&apps).await?;
        Ok(Ack::new(SAVED_MESSAGE))
    }

    async fn open_popup(&self) -> Result<(), ChannelError> {
        tracing::info!(path = %self.path.display(), "applications are stored here");
        Ok(())
    }
}
