//! Serialized snapshot of the note sequence.
//!
//! Load-side validation is explicit: the snapshot must be a JSON array and
//! each element must decode into a well-formed note. Anything else is
//! discarded rather than failing the load — a bad snapshot degrades to the
//! empty state, never to an error.

use std::collections::HashSet;

use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::entity::Note;
use crate::error::Result;

/// Outcome of decoding a persisted snapshot.
#[derive(Debug)]
pub enum Decoded {
    /// The snapshot was a JSON array; `discarded` counts entries that were
    /// malformed or duplicated and had to be dropped.
    Valid { notes: Vec<Note>, discarded: usize },
    /// The snapshot was unparsable or not an array.
    Fallback,
}

impl Decoded {
    /// The surviving notes, treating a fallback as the empty sequence.
    pub fn into_notes(self) -> Vec<Note> {
        match self {
            Decoded::Valid { notes, .. } => notes,
            Decoded::Fallback => Vec::new(),
        }
    }
}

/// Serialize the note sequence for storage.
pub fn encode(notes: &[Note]) -> Result<String> {
    Ok(serde_json::to_string(notes)?)
}

/// Decode a persisted snapshot.
///
/// An element is kept only if it deserializes into a [`Note`], its
/// timestamps are ordered, and its id has not been seen earlier in the
/// array (first occurrence wins).
pub fn decode(raw: &str) -> Decoded {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!("note snapshot is not valid JSON, starting empty: {err}");
            return Decoded::Fallback;
        }
    };

    let Value::Array(entries) = value else {
        warn!("note snapshot is not an array, starting empty");
        return Decoded::Fallback;
    };

    let mut notes = Vec::with_capacity(entries.len());
    let mut seen: HashSet<Uuid> = HashSet::new();
    let mut discarded = 0;

    for entry in entries {
        match serde_json::from_value::<Note>(entry) {
            Ok(note) if note.is_well_formed() && seen.insert(note.id) => {
                notes.push(note);
            }
            _ => discarded += 1,
        }
    }

    if discarded > 0 {
        warn!(discarded, "dropped malformed note snapshot entries");
    }

    Decoded::Valid { notes, discarded }
}
