// ABOUTME: ApplicationFlow drives the tracker interaction: duplicate check, then log or save.
// ABOUTME: The check races a timeout and a cancellation token; backend failures degrade to defaults.

use std::time::Duration;

use jobtrail_extract::JobRecord;
use tokio_util::sync::CancellationToken;

use crate::backend::Backend;
use crate::messages::ExistsCheck;

/// Shown when a log or save request fails.
pub const ERROR_MESSAGE: &str = "Error saving application. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowOptions {
    /// How long to wait for the duplicate check before showing the form anyway.
    pub check_timeout: Duration,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            check_timeout: Duration::from_secs(2),
        }
    }
}

/// What to show after the duplicate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// No known duplicate, or the check failed or timed out.
    ShowForm,
    AlreadyLogged,
    /// Saved earlier; the user may still log it.
    AlreadySaved,
    /// The caller went away before the check finished.
    Cancelled,
}

impl Prompt {
    pub fn from_check(check: &ExistsCheck) -> Self {
        if !check.exists {
            return Prompt::ShowForm;
        }
        if check.in_logged == Some(true) {
            Prompt::AlreadyLogged
        } else if check.in_saved == Some(true) {
            Prompt::AlreadySaved
        } else {
            Prompt::ShowForm
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Log,
    Save,
}

/// A message for the user about a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub is_error: bool,
}

impl Notification {
    fn error() -> Self {
        Self {
            message: ERROR_MESSAGE.to_string(),
            is_error: true,
        }
    }
}

#[derive(Debug)]
pub struct ApplicationFlow<B> {
    backend: B,
    opts: FlowOptions,
}

impl<B: Backend> ApplicationFlow<B> {
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, FlowOptions::default())
    }

    pub fn with_options(backend: B, opts: FlowOptions) -> Self {
        Self { backend, opts }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Checks whether `url` is already tracked.
    ///
    /// Exactly one outcome is produced: the check result, the timeout, or
    /// cancellation. Whichever loses is dropped.
    pub async fn prepare(&self, url: &str, cancel: &CancellationToken) -> Prompt {
        let check = tokio::time::timeout(self.opts.check_timeout, self.backend.check_job_exists(url));
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Prompt::Cancelled,
            result = check => match result {
                Ok(Ok(check)) => Prompt::from_check(&check),
                Ok(Err(err)) => {
                    tracing::warn!(url, error = %err, "duplicate check failed, showing form");
                    Prompt::ShowForm
                }
                Err(_) => {
                    tracing::warn!(
                        url,
                        timeout_ms = self.opts.check_timeout.as_millis() as u64,
                        "duplicate check timed out, showing form"
                    );
                    Prompt::ShowForm
                }
            },
        }
    }

    /// Sends the record to the backend. Never fails; errors become an error notification.
    pub async fn submit(&self, submission: Submission, job: &JobRecord) -> Notification {
        let result = match submission {
            Submission::Log => self.backend.log_application(job).await,
            Submission::Save => self.backend.save_for_later(job).await,
        };
        match result {
            Ok(ack) => Notification {
                message: ack.message,
                is_error: false,
            },
            Err(err) => {
                tracing::warn!(url = %job.url, ?submission, error = %err, "submission failed");
                Notification::error()
            }
        }
    }

    /// Asks the backend to open its dashboard. Returns whether it acknowledged.
    pub async fn open_dashboard(&self) -> bool {
        match self.backend.open_popup().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "failed to open dashboard");
                false
            }
        }
    }
}
