//! Push event payload parsing and branch extraction.

use serde::Deserialize;

use crate::error::{RelayError, Result};

/// Prefix every branch ref carries in a push event.
pub const REF_PREFIX: &str = "refs/heads/";

/// The slice of a push event payload the relay cares about.
///
/// Both fields are optional so presence checks stay explicit; everything else
/// in the payload is ignored.
#[derive(Debug, Deserialize)]
pub struct PushEvent {
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub deleted: Option<bool>,
}

impl PushEvent {
    /// Parses the JSON string carried in the form's `payload` field.
    pub fn parse(raw: &str) -> Result<PushEvent> {
        let event = serde_json::from_str(raw)?;
        Ok(event)
    }

    /// Extracts the pushed branch name from `ref`.
    ///
    /// A missing `ref` and a `ref` without the `refs/heads/` prefix are both
    /// rejected; a prefixed ref is never partially processed.
    pub fn branch(&self) -> Result<&str> {
        let git_ref = self.git_ref.as_deref().ok_or(RelayError::RefMissing)?;
        git_ref
            .strip_prefix(REF_PREFIX)
            .ok_or(RelayError::RefInvalid)
    }

    /// Returns true if the push deleted the ref.
    pub fn is_deletion(&self) -> bool {
        self.deleted.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_branch_extraction() {
        let event = PushEvent::parse(r#"{"ref": "refs/heads/main"}"#).unwrap();
        assert_eq!(event.branch().unwrap(), "main");
    }

    #[test]
    fn test_branch_names_may_contain_slashes() {
        let event = PushEvent::parse(r#"{"ref": "refs/heads/feature/retry-login"}"#).unwrap();
        assert_eq!(event.branch().unwrap(), "feature/retry-login");
    }

    #[test]
    fn test_tag_refs_are_rejected() {
        let event = PushEvent::parse(r#"{"ref": "refs/tags/v1.0"}"#).unwrap();
        assert!(matches!(event.branch(), Err(RelayError::RefInvalid)));
    }

    #[test]
    fn test_missing_ref_is_rejected() {
        let event = PushEvent::parse(r#"{"deleted": false}"#).unwrap();
        assert!(matches!(event.branch(), Err(RelayError::RefMissing)));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(matches!(
            PushEvent::parse("{not json"),
            Err(RelayError::PayloadParse(_))
        ));
    }

    #[test]
    fn test_deletion_defaults_to_false() {
        let event = PushEvent::parse(r#"{"ref": "refs/heads/main"}"#).unwrap();
        assert!(!event.is_deletion());
    }

    #[test]
    fn test_deletion_flag() {
        let event = PushEvent::parse(r#"{"ref": "refs/heads/main", "deleted": true}"#).unwrap();
        assert!(event.is_deletion());
    }

    #[test]
    fn test_extra_payload_fields_are_ignored() {
        let raw = r#"{"ref": "refs/heads/main", "repository": {"name": "x"}, "after": "abc123"}"#;
        let event = PushEvent::parse(raw).unwrap();
        assert_eq!(event.branch().unwrap(), "main");
        assert!(!event.is_deletion());
    }
}
