pub mod config;
pub mod controller;
pub mod entry;
pub mod error;
pub mod filter;
pub mod geo;
pub mod map;
pub mod moods;
pub mod prompts;
pub mod reconcile;
pub mod render;
pub mod store;
pub mod templates;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use controller::{Controller, Interaction};
pub use entry::{Draft, EntryId, EntryKind, JournalEntry};
pub use error::{NotFoundError, StoreError, SubmitError, ValidationError};
pub use filter::{DateRange, FilterError, FilterState, UpperBound, visible};
pub use geo::{CoordinateError, LngLat};
pub use map::{MapSurface, MarkerHandle, MarkerKind, MarkerStyle, RecordingMap, View};
pub use moods::{Mood, MoodAliases, MoodParseError, Rgb};
pub use reconcile::{MarkerDiff, MarkerRegistry};
pub use store::EntryStore;
pub use templates::{JournalTemplate, TemplateAnswers, TemplateError};
