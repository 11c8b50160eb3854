use crate::Config;
use crate::entry::{Draft, EntryId, EntryKind, JournalEntry};
use crate::geo::LngLat;
use crate::map::{RecordingMap, View};
use crate::moods::Mood;
use chrono::{DateTime, TimeZone, Utc};

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config() -> Config {
    Config {
        center: at(-122.2585, 37.8719),
        zoom: 14.0,
        focus_zoom: 17.0,
        upper_bound: crate::filter::UpperBound::EndOfDay,
        date_format: "%a, %d %b %Y %H:%M".to_string(),
        editor: None,
    }
}

pub fn mk_map() -> RecordingMap {
    let config = mk_config();
    RecordingMap::new(View {
        center: config.center,
        zoom: config.zoom,
    })
}

/// Always 2024-03-10 12:00 UTC.
pub fn fixed_clock() -> DateTime<Utc> {
    utc(2024, 3, 10, 12)
}

pub fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid date")
}

pub fn at(lng: f64, lat: f64) -> LngLat {
    LngLat::new(lng, lat).expect("valid coordinate")
}

/// A creation draft with every required field filled in.
pub fn draft(title: &str, mood: Mood, location: LngLat) -> Draft {
    Draft {
        title: title.to_string(),
        mood: Some(mood),
        ..Draft::at(location)
    }
}

pub fn entry(
    id: u64,
    title: &str,
    mood: Mood,
    (lng, lat): (f64, f64),
    date: DateTime<Utc>,
) -> JournalEntry {
    JournalEntry {
        id: EntryId(id),
        title: title.to_string(),
        mood,
        location: at(lng, lat),
        date,
        description: String::new(),
        kind: EntryKind::Simple,
    }
}
