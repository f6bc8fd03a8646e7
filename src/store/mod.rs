//! The note store: canonical in-memory note state plus its persistence
//! policy.
//!
//! Every mutation synchronously mirrors the affected state to the storage
//! backend. Write failures are swallowed: the in-memory state stays
//! authoritative for the session and the next mutation re-attempts the
//! write. Load failures degrade to the empty state. Neither is ever
//! surfaced to the caller.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::entity::{Note, NotePatch, DEFAULT_TITLE};
use crate::search;
use crate::snapshot;
use crate::storage::{Backend, NOTES_KEY, SELECTION_KEY};

/// Time source for entity timestamps. Injected so tests can step the
/// clock deterministically.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Owns the note sequence and the selection pointer, and is the only
/// component that touches the storage backend. Constructed by the
/// composition root and passed down; there is deliberately no global
/// instance, so stores in tests never interfere.
pub struct NoteStore<B: Backend, C: Clock = SystemClock> {
    notes: Vec<Note>,
    selected: Option<Uuid>,
    backend: B,
    clock: C,
}

impl<B: Backend> NoteStore<B> {
    /// Open a store over `backend`, loading whatever state it holds.
    /// Absent, malformed, or unreadable state initializes empty; loading
    /// never fails.
    pub fn open(backend: B) -> Self {
        Self::with_clock(backend, SystemClock)
    }
}

impl<B: Backend, C: Clock> NoteStore<B, C> {
    /// Like [`NoteStore::open`] with an explicit time source.
    pub fn with_clock(backend: B, clock: C) -> Self {
        let notes = match backend.get(NOTES_KEY) {
            Ok(Some(raw)) => snapshot::decode(&raw).into_notes(),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("failed to read note snapshot, starting empty: {err}");
                Vec::new()
            }
        };

        let selected = match backend.get(SELECTION_KEY) {
            Ok(Some(raw)) => raw.trim().parse().ok(),
            Ok(None) => None,
            Err(err) => {
                warn!("failed to read selection pointer: {err}");
                None
            }
        };

        Self {
            notes,
            selected,
            backend,
            clock,
        }
    }

    /// Create a fresh note, prepend it to the sequence, and select it.
    /// Returns the new note's id.
    pub fn create(&mut self) -> Uuid {
        let note = Note::new(self.clock.now());
        let id = note.id;
        self.notes.insert(0, note);
        self.selected = Some(id);
        self.persist_notes();
        self.persist_selection();
        id
    }

    /// Merge `patch` into the note matching `id` and refresh its
    /// `updated_at`. Unknown ids are silently ignored. An update that
    /// would leave the title empty restores the default title.
    pub fn update(&mut self, id: Uuid, patch: NotePatch) {
        let now = self.clock.now();
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            debug!(%id, "update for unknown note ignored");
            return;
        };

        if let Some(title) = patch.title {
            note.title = if title.is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                title
            };
        }
        if let Some(body) = patch.body {
            note.body = body;
        }
        note.updated_at = now;

        self.persist_notes();
    }

    /// Remove the note matching `id`, clearing the selection if it pointed
    /// there. Unknown ids are silently ignored.
    pub fn delete(&mut self, id: Uuid) {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() == before {
            debug!(%id, "delete for unknown note ignored");
            return;
        }

        if self.selected == Some(id) {
            self.selected = None;
            self.persist_selection();
        }
        self.persist_notes();
    }

    /// Set the selection pointer. Existence is not validated; a dangling
    /// selection simply resolves to no note downstream.
    pub fn select(&mut self, id: Option<Uuid>) {
        self.selected = id;
        self.persist_selection();
    }

    /// The note sequence in insertion order, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: Uuid) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        self.selected
    }

    /// The currently selected note, if the pointer resolves to one.
    pub fn selected(&self) -> Option<&Note> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Filtered, recency-ranked view of the notes. See
    /// [`search::filter_and_rank`].
    pub fn search(&self, query: &str) -> Vec<&Note> {
        search::filter_and_rank(&self.notes, query)
    }

    fn persist_notes(&mut self) {
        let raw = match snapshot::encode(&self.notes) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("failed to serialize note snapshot: {err}");
                return;
            }
        };
        if let Err(err) = self.backend.set(NOTES_KEY, &raw) {
            warn!("failed to persist note snapshot: {err}");
        }
    }

    fn persist_selection(&mut self) {
        let result = match self.selected {
            Some(id) => self.backend.set(SELECTION_KEY, &id.to_string()),
            None => self.backend.remove(SELECTION_KEY),
        };
        if let Err(err) = result {
            warn!("failed to persist selection pointer: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use chrono::TimeZone;
    use std::cell::Cell;

    /// Advances one millisecond per reading.
    struct StepClock(Cell<i64>);

    impl StepClock {
        fn new() -> Self {
            Self(Cell::new(1_700_000_000_000))
        }
    }

    impl Clock for StepClock {
        fn now(&self) -> DateTime<Utc> {
            let millis = self.0.get();
            self.0.set(millis + 1);
            Utc.timestamp_millis_opt(millis).unwrap()
        }
    }

    fn store() -> NoteStore<MemoryBackend, StepClock> {
        NoteStore::with_clock(MemoryBackend::new(), StepClock::new())
    }

    #[test]
    fn test_create_prepends_and_selects() {
        let mut store = store();
        let first = store.create();
        let second = store.create();

        assert_eq!(store.len(), 2);
        assert_eq!(store.notes()[0].id, second);
        assert_eq!(store.notes()[1].id, first);
        assert_eq!(store.selected_id(), Some(second));
    }

    #[test]
    fn test_create_yields_unique_ids() {
        let mut store = store();
        let ids: Vec<Uuid> = (0..5).map(|_| store.create()).collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_update_title_leaves_body_and_advances_updated_at() {
        let mut store = store();
        let id = store.create();
        store.update(id, NotePatch::body("draft body"));
        let before = store.get(id).unwrap().updated_at;

        store.update(id, NotePatch::title("Renamed"));

        let note = store.get(id).unwrap();
        assert_eq!(note.title, "Renamed");
        assert_eq!(note.body, "draft body");
        assert!(note.updated_at > before);
        assert!(note.is_well_formed());
    }

    #[test]
    fn test_update_empty_title_restores_default() {
        let mut store = store();
        let id = store.create();
        store.update(id, NotePatch::title("Something"));
        store.update(id, NotePatch::title(""));
        assert_eq!(store.get(id).unwrap().title, DEFAULT_TITLE);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = store();
        let id = store.create();
        let snapshot_before = store.get(id).unwrap().clone();

        store.update(Uuid::new_v4(), NotePatch::title("ghost"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id).unwrap(), &snapshot_before);
        assert_eq!(store.selected_id(), Some(id));
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut store = store();
        let id = store.create();
        store.delete(id);
        assert!(store.is_empty());
        assert_eq!(store.selected_id(), None);
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_delete_unselected_leaves_selection() {
        let mut store = store();
        let first = store.create();
        let second = store.create();

        store.delete(first);

        assert_eq!(store.len(), 1);
        assert_eq!(store.selected_id(), Some(second));
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut store = store();
        let id = store.create();
        store.delete(Uuid::new_v4());
        assert_eq!(store.len(), 1);
        assert_eq!(store.selected_id(), Some(id));
    }

    #[test]
    fn test_select_does_not_validate_existence() {
        let mut store = store();
        store.create();

        let dangling = Uuid::new_v4();
        store.select(Some(dangling));

        assert_eq!(store.selected_id(), Some(dangling));
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_select_none_clears() {
        let mut store = store();
        store.create();
        store.select(None);
        assert_eq!(store.selected_id(), None);
    }

    #[test]
    fn test_search_ranks_most_recently_updated_first() {
        let mut store = store();
        let first = store.create();
        let second = store.create();
        store.update(first, NotePatch::body("touched last"));

        let hits = store.search("");
        assert_eq!(hits[0].id, first);
        assert_eq!(hits[1].id, second);
    }
}
