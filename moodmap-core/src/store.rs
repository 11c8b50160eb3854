//! The authoritative, in-memory collection of journal entries.

use crate::entry::{Draft, EntryId, JournalEntry};
use crate::error::{NotFoundError, StoreError, ValidationError};
use crate::geo::LngLat;
use crate::moods::Mood;
use chrono::{DateTime, Utc};

/// Source of "now" for ids and default entry dates.
pub type Clock = fn() -> DateTime<Utc>;

/// Holds every entry of the session, in insertion order.
#[derive(Debug)]
pub struct EntryStore {
    entries: Vec<JournalEntry>,
    last_id: u64,
    clock: Clock,
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The required parts of a draft, once checked.
struct Checked<'a> {
    title: &'a str,
    mood: Mood,
    location: LngLat,
}

fn validate(draft: &Draft) -> Result<Checked<'_>, ValidationError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    let mood = draft.mood.ok_or(ValidationError::MissingMood)?;
    let location = draft.location.ok_or(ValidationError::MissingLocation)?;
    if let Some(answers) = &draft.template {
        if let Some(&label) = answers.invalid_fields().first() {
            return Err(ValidationError::InvalidAnswer { label });
        }
    }
    Ok(Checked {
        title,
        mood,
        location,
    })
}

impl EntryStore {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            entries: Vec::new(),
            last_id: 0,
            clock,
        }
    }

    fn next_id(&mut self, now: DateTime<Utc>) -> EntryId {
        let stamp = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        self.last_id = stamp.max(self.last_id + 1);
        EntryId(self.last_id)
    }

    /// Turns a complete draft into a new entry and appends it.
    ///
    /// The entry date defaults to the store clock when the draft has none.
    /// Nothing is stored when validation fails.
    pub fn create(&mut self, draft: &Draft) -> Result<EntryId, StoreError> {
        let checked = validate(draft)?;
        let now = (self.clock)();
        let id = self.next_id(now);
        self.entries.push(JournalEntry {
            id,
            title: checked.title.to_string(),
            mood: checked.mood,
            location: checked.location,
            date: draft.date.unwrap_or(now),
            description: draft.description.clone(),
            kind: draft.kind(),
        });
        tracing::debug!(id = %id, "entry created");
        Ok(id)
    }

    /// Replaces the fields of entry `id` with those of `draft`, keeping its
    /// id and its position in the collection.
    pub fn update(&mut self, id: EntryId, draft: &Draft) -> Result<(), StoreError> {
        let idx = self.position(id)?;
        let checked = validate(draft)?;
        let entry = &mut self.entries[idx];
        entry.title = checked.title.to_string();
        entry.mood = checked.mood;
        entry.location = checked.location;
        if let Some(date) = draft.date {
            entry.date = date;
        }
        entry.description = draft.description.clone();
        entry.kind = draft.kind();
        tracing::debug!(id = %id, "entry updated");
        Ok(())
    }

    /// Removes entry `id` and hands it back. Unknown ids are an error, not a
    /// silent no-op.
    pub fn delete(&mut self, id: EntryId) -> Result<JournalEntry, NotFoundError> {
        let idx = self.position(id)?;
        let removed = self.entries.remove(idx);
        tracing::debug!(id = %id, "entry deleted");
        Ok(removed)
    }

    pub fn get(&self, id: EntryId) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.get(id).is_some()
    }

    /// All entries, in insertion order.
    pub fn list(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: EntryId) -> Result<usize, NotFoundError> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(NotFoundError(id))
    }
}
