use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::storage::{Document, StoreKey};

pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document for Vec<Note> {
    const KEY: StoreKey = StoreKey::Notes;
}

/// Trim both fields; at least one of them must be non-empty.
pub fn validate(title: &str, content: &str) -> Result<(String, String), ValidationError> {
    let title = title.trim();
    let content = content.trim();
    if title.is_empty() && content.is_empty() {
        return Err(ValidationError::Required("title or content"));
    }
    Ok((title.to_string(), content.to_string()))
}

/// Newest first by creation time.
pub fn sorted_newest_first(notes: &[Note]) -> Vec<Note> {
    let mut out = notes.to_vec();
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn note(id: &str, hour: u32) -> Note {
        Note {
            id: id.into(),
            title: id.into(),
            content: String::new(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn validate_accepts_either_field() {
        assert!(validate("Title", "").is_ok());
        assert!(validate("", "body").is_ok());
        assert_eq!(
            validate("  ", "\n"),
            Err(ValidationError::Required("title or content"))
        );
    }

    #[test]
    fn newest_first() {
        let notes = vec![note("old", 1), note("new", 5), note("mid", 3)];
        let ids: Vec<_> = sorted_newest_first(&notes).into_iter().map(|n| n.id).collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }

    #[test]
    fn updated_at_is_omitted_until_set() {
        let json = serde_json::to_value(note("a", 1)).unwrap();
        assert!(json.get("updatedAt").is_none());
    }
}
