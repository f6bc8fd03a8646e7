//! Query derivation over the note list.
//!
//! Search is pure: results are re-derived on demand and never stored.

use crate::entity::Note;

/// Filter notes whose title or body contains `query` as a case-insensitive
/// substring (an empty query matches everything), ranked by `updated_at`
/// descending.
///
/// Timestamps have finite resolution, so two notes can share an
/// `updated_at`; such ties keep their input order (the sort is stable).
pub fn filter_and_rank<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let needle = query.to_lowercase();
    let mut hits: Vec<&Note> = notes
        .iter()
        .filter(|note| needle.is_empty() || matches(note, &needle))
        .collect();
    hits.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    hits
}

fn matches(note: &Note, needle: &str) -> bool {
    note.title.to_lowercase().contains(needle) || note.body.to_lowercase().contains(needle)
}
