// ABOUTME: Error type for tracker backend calls.
// ABOUTME: Every backend operation can fail; the application flow downgrades these to defaults.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Backend disconnected")]
    Disconnected,

    #[error("Backend timed out after {0} ms")]
    Timeout(u64),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error() {
        let err = ChannelError::Backend("quota exceeded".to_string());
        let display = err.to_string();
        assert!(display.contains("Backend error"));
        assert!(display.contains("quota exceeded"));
    }

    #[test]
    fn test_timeout_error() {
        let err = ChannelError::Timeout(2000);
        assert!(err.to_string().contains("2000 ms"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: ChannelError = io.into();
        assert!(matches!(err, ChannelError::Io(_)));
    }
}
