use crate::geo::LngLat;
use crate::moods::Mood;
use crate::templates::{TemplateAnswers, TemplateError};
use chrono::{DateTime, Utc};
use std::fmt;

/// Entry identity: milliseconds since the epoch at creation, bumped when two
/// entries are created within the same millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Simple,
    Templated(TemplateAnswers),
}

#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub id: EntryId,
    pub title: String,
    pub mood: Mood,
    pub location: LngLat,
    pub date: DateTime<Utc>,
    pub description: String,
    pub kind: EntryKind,
}

impl JournalEntry {
    pub fn template_id(&self) -> Option<&'static str> {
        match &self.kind {
            EntryKind::Simple => None,
            EntryKind::Templated(answers) => Some(answers.template_id()),
        }
    }
}

/// The in-progress entry being composed or edited.
///
/// Everything is optional here; the store decides whether it is complete
/// enough to become a [`JournalEntry`]. Which entry a draft edits, if any,
/// is tracked by the controller state, not by the draft.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub title: String,
    pub mood: Option<Mood>,
    pub location: Option<LngLat>,
    pub date: Option<DateTime<Utc>>,
    pub description: String,
    pub template: Option<TemplateAnswers>,
}

impl Draft {
    /// A fresh creation draft at `location`.
    pub fn at(location: LngLat) -> Self {
        Self {
            location: Some(location),
            ..Default::default()
        }
    }

    /// Switches the draft to template `id`, seeding blank answers for all of
    /// its fields. Any answers from a previous template are dropped.
    pub fn use_template(&mut self, id: &str) -> Result<(), TemplateError> {
        self.template = Some(TemplateAnswers::for_template(id)?);
        Ok(())
    }

    pub fn clear_template(&mut self) {
        self.template = None;
    }

    pub fn kind(&self) -> EntryKind {
        match &self.template {
            Some(answers) => EntryKind::Templated(answers.clone()),
            None => EntryKind::Simple,
        }
    }
}

impl From<&JournalEntry> for Draft {
    fn from(entry: &JournalEntry) -> Self {
        Self {
            title: entry.title.clone(),
            mood: Some(entry.mood),
            location: Some(entry.location),
            date: Some(entry.date),
            description: entry.description.clone(),
            template: match &entry.kind {
                EntryKind::Simple => None,
                EntryKind::Templated(answers) => Some(answers.clone()),
            },
        }
    }
}
