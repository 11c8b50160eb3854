//! Which entries are visible under the current search text, mood and date range.

use crate::entry::JournalEntry;
use crate::moods::Mood;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use strum_macros::{AsRefStr, EnumString};
use thiserror::Error;

/// How a bare `YYYY-MM-DD` upper bound is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum UpperBound {
    /// The whole day is included: the bound becomes 23:59:59.999 UTC.
    #[default]
    EndOfDay,
    /// The bound is midnight UTC, so later entries that same day are excluded.
    Instant,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("'{0}' is not a date (expected YYYY-MM-DD or an RFC 3339 timestamp)")]
    InvalidDate(String),
}

/// Inclusive date range; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    /// Builds a range from the two date inputs of a form. Empty inputs leave
    /// that side open.
    pub fn parse(start: &str, end: &str, upper: UpperBound) -> Result<Self, FilterError> {
        Ok(Self {
            start: parse_lower_bound(start)?,
            end: parse_upper_bound(end, upper)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Matched case-insensitively against entry titles.
    pub search: String,
    pub mood: Option<Mood>,
    pub range: DateRange,
}

impl FilterState {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.mood.is_some() || self.range != DateRange::default()
    }

    /// Entries passing [`visible`], in their original order.
    pub fn apply<'a>(&self, entries: &'a [JournalEntry]) -> Vec<&'a JournalEntry> {
        entries.iter().filter(|e| visible(e, self)).collect()
    }
}

/// `true` when `entry` satisfies every active clause of `filter`.
pub fn visible(entry: &JournalEntry, filter: &FilterState) -> bool {
    entry
        .title
        .to_lowercase()
        .contains(&filter.search.to_lowercase())
        && filter.mood.is_none_or(|mood| entry.mood == mood)
        && filter.range.contains(entry.date)
}

fn parse_bound(input: &str, day_time: NaiveTime) -> Result<Option<DateTime<Utc>>, FilterError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(Some(date.and_time(day_time).and_utc()));
    }
    DateTime::parse_from_rfc3339(input)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|_| FilterError::InvalidDate(input.to_string()))
}

/// Parses a "from" input; a bare date means midnight UTC of that day.
pub fn parse_lower_bound(input: &str) -> Result<Option<DateTime<Utc>>, FilterError> {
    parse_bound(input, NaiveTime::MIN)
}

/// Parses a "to" input, reading a bare date according to `upper`.
pub fn parse_upper_bound(
    input: &str,
    upper: UpperBound,
) -> Result<Option<DateTime<Utc>>, FilterError> {
    let day_time = match upper {
        UpperBound::Instant => NaiveTime::MIN,
        UpperBound::EndOfDay => NaiveTime::MIN - Duration::milliseconds(1),
    };
    parse_bound(input, day_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::common::{entry, utc};

    fn scenario() -> Vec<JournalEntry> {
        vec![
            entry(1, "Morning", Mood::Calmness, (-122.2585, 37.8719), utc(2024, 1, 1, 0)),
            entry(2, "Run", Mood::Energy, (-122.26, 37.87), utc(2024, 2, 1, 0)),
        ]
    }

    fn titles(visible: Vec<&JournalEntry>) -> Vec<&str> {
        visible.into_iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn empty_filter_shows_everything() {
        let entries = scenario();
        let filter = FilterState::default();
        assert!(!filter.is_active());
        assert_eq!(titles(filter.apply(&entries)), ["Morning", "Run"]);
    }

    #[test]
    fn mood_filter() {
        let entries = scenario();
        let filter = FilterState {
            mood: Some(Mood::Energy),
            ..Default::default()
        };
        assert_eq!(titles(filter.apply(&entries)), ["Run"]);
    }

    #[test]
    fn search_is_case_insensitive_containment() {
        let entries = scenario();
        let filter = FilterState {
            search: "morn".into(),
            ..Default::default()
        };
        assert_eq!(titles(filter.apply(&entries)), ["Morning"]);
        let filter = FilterState {
            search: "RUN".into(),
            ..Default::default()
        };
        assert_eq!(titles(filter.apply(&entries)), ["Run"]);
    }

    #[test]
    fn date_start_filter() {
        let entries = scenario();
        let filter = FilterState {
            range: DateRange::parse("2024-01-15", "", UpperBound::EndOfDay).unwrap(),
            ..Default::default()
        };
        assert_eq!(titles(filter.apply(&entries)), ["Run"]);
    }

    #[test]
    fn lower_bound_is_inclusive_for_bare_dates() {
        let on_start = entry(3, "Midnight", Mood::Mystery, (0.0, 0.0), utc(2024, 1, 15, 0));
        let range = DateRange::parse("2024-01-15", "", UpperBound::EndOfDay).unwrap();
        assert_eq!(range.start, Some(on_start.date));
        assert!(range.contains(on_start.date));

        let filter = FilterState {
            range,
            ..Default::default()
        };
        assert!(filter.is_active());
        assert!(visible(&on_start, &filter));
    }

    #[test]
    fn lower_bound_is_inclusive_for_exact_instants() {
        let on_start = entry(3, "Lunch", Mood::Warmth, (0.0, 0.0), utc(2024, 1, 15, 12));
        let range = DateRange::parse("2024-01-15T12:00:00Z", "", UpperBound::Instant).unwrap();
        assert!(range.contains(on_start.date));
        assert!(!range.contains(utc(2024, 1, 15, 11)));
    }

    #[test]
    fn clauses_are_conjunctive() {
        let entries = scenario();
        let filter = FilterState {
            search: "morn".into(),
            mood: Some(Mood::Energy),
            ..Default::default()
        };
        assert!(filter.apply(&entries).is_empty());
    }

    #[test]
    fn upper_bound_end_of_day_includes_later_same_day_entries() {
        let late = entry(3, "Late", Mood::Anger, (0.0, 0.0), utc(2024, 2, 1, 22));
        let eod = DateRange::parse("", "2024-02-01", UpperBound::EndOfDay).unwrap();
        let instant = DateRange::parse("", "2024-02-01", UpperBound::Instant).unwrap();
        assert!(eod.contains(late.date));
        assert!(!instant.contains(late.date));
        assert!(instant.contains(utc(2024, 2, 1, 0)));
    }

    #[test]
    fn rfc3339_bounds_are_taken_verbatim() {
        let bound = parse_upper_bound("2024-02-01T10:00:00+02:00", UpperBound::EndOfDay)
            .unwrap()
            .unwrap();
        assert_eq!(bound, utc(2024, 2, 1, 8));
    }

    #[test]
    fn empty_bounds_are_open_and_garbage_is_rejected() {
        assert_eq!(parse_lower_bound("  ").unwrap(), None);
        assert_eq!(
            parse_lower_bound("01/02/2024"),
            Err(FilterError::InvalidDate("01/02/2024".to_string()))
        );
        assert_eq!(
            DateRange::parse("", "", UpperBound::Instant).unwrap(),
            DateRange::default()
        );
    }

    #[test]
    fn tightening_a_clause_never_grows_the_visible_set() {
        let mut entries = scenario();
        entries.push(entry(3, "Morning run", Mood::Energy, (0.0, 0.0), utc(2024, 1, 20, 7)));
        entries.push(entry(4, "Evening", Mood::Calmness, (0.0, 0.0), utc(2024, 3, 5, 19)));

        let loose = FilterState::default();
        let tighter = [
            FilterState {
                search: "m".into(),
                ..Default::default()
            },
            FilterState {
                search: "mor".into(),
                ..Default::default()
            },
            FilterState {
                search: "morning".into(),
                mood: Some(Mood::Energy),
                ..Default::default()
            },
            FilterState {
                search: "morning".into(),
                mood: Some(Mood::Energy),
                range: DateRange::parse("2024-01-10", "2024-01-31", UpperBound::EndOfDay)
                    .unwrap(),
            },
            FilterState {
                search: "morning".into(),
                mood: Some(Mood::Energy),
                range: DateRange::parse("2024-01-25", "2024-01-31", UpperBound::EndOfDay)
                    .unwrap(),
            },
        ];

        let mut previous = loose.apply(&entries).len();
        for filter in &tighter {
            let count = filter.apply(&entries).len();
            assert!(count <= previous, "{filter:?} grew the visible set");
            previous = count;
        }
        assert_eq!(previous, 0);
    }
}
