// ABOUTME: Wire types exchanged with the tracker backend.
// ABOUTME: Field names serialize in camelCase to match the extension's message format.

use serde::{Deserialize, Serialize};

/// Reply to a duplicate check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistsCheck {
    pub exists: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_logged: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_saved: Option<bool>,
}

impl ExistsCheck {
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn logged() -> Self {
        Self {
            exists: true,
            in_logged: Some(true),
            in_saved: Some(false),
        }
    }

    pub fn saved() -> Self {
        Self {
            exists: true,
            in_logged: Some(false),
            in_saved: Some(true),
        }
    }
}

/// Acknowledgement carrying a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
}

impl Ack {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exists_check_uses_camel_case() {
        let json = serde_json::to_value(ExistsCheck::saved()).unwrap();
        assert_eq!(json["exists"], true);
        assert_eq!(json["inSaved"], true);
        assert_eq!(json["inLogged"], false);
    }

    #[test]
    fn optional_flags_may_be_absent() {
        let check: ExistsCheck = serde_json::from_str(r#"{"exists":false}"#).unwrap();
        assert_eq!(check, ExistsCheck::missing());
    }
}
