use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to freshly created notes, and restored when an edit would
/// leave the title empty.
pub const DEFAULT_TITLE: &str = "Untitled Note";

/// A single note. Wire field names are camelCase to match the persisted
/// snapshot layout (`createdAt`/`updatedAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a fresh note with the default title and an empty body.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: DEFAULT_TITLE.to_string(),
            body: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// A persisted entry is only well-formed if its timestamps are ordered.
    pub fn is_well_formed(&self) -> bool {
        self.updated_at >= self.created_at
    }
}

/// Update payload for a note. Unset fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl NotePatch {
    /// Patch that changes only the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: None,
        }
    }

    /// Patch that changes only the body.
    pub fn body(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: Some(body.into()),
        }
    }
}
