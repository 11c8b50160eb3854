//! Keeps the markers on the map in step with the visible entries and the
//! pending location.
//!
//! [`MarkerRegistry::reconcile`] is pure: it compares what is drawn with what
//! should be drawn and returns a [`MarkerDiff`]. [`MarkerRegistry::apply`]
//! then performs the removals (first) and placements on a [`MapSurface`].
//! Markers whose entry is unchanged are left alone, so syncing twice with the
//! same input touches the map only once.

use crate::entry::{EntryId, JournalEntry};
use crate::geo::LngLat;
use crate::map::{DrawnMarker, MapSurface, MarkerHandle, MarkerKind, MarkerStyle};
use std::collections::BTreeMap;

/// The marker set that should be on the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Desired {
    /// One marker per visible entry, in display order.
    pub entries: Vec<DrawnMarker>,
    pub pending: Option<LngLat>,
}

pub fn desired_markers<'a>(
    visible: impl IntoIterator<Item = &'a JournalEntry>,
    pending: Option<LngLat>,
) -> Desired {
    let entries = visible
        .into_iter()
        .map(|entry| DrawnMarker {
            at: entry.location,
            style: MarkerStyle::for_entry(entry.id, Some(entry.mood)),
        })
        .collect();
    Desired { entries, pending }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    pub kind: MarkerKind,
    pub handle: MarkerHandle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerDiff {
    pub remove: Vec<Removal>,
    pub place: Vec<DrawnMarker>,
}

impl MarkerDiff {
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.place.is_empty()
    }
}

/// Marker handles currently on the map, keyed by what they stand for.
///
/// Entry markers are back-references only: the store owns the entries, and
/// a marker is removed here before its entry is deleted or hidden.
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    entries: BTreeMap<EntryId, (MarkerHandle, DrawnMarker)>,
    pending: Option<(MarkerHandle, LngLat)>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the operations that turn the current marker set into `desired`.
    pub fn reconcile(&self, desired: &Desired) -> MarkerDiff {
        let wanted: BTreeMap<EntryId, &DrawnMarker> = desired
            .entries
            .iter()
            .filter_map(|m| match m.style.kind {
                MarkerKind::Entry(id) => Some((id, m)),
                MarkerKind::Pending => None,
            })
            .collect();

        let mut diff = MarkerDiff::default();

        for (id, (handle, drawn)) in &self.entries {
            if wanted.get(id).is_none_or(|w| *w != drawn) {
                diff.remove.push(Removal {
                    kind: MarkerKind::Entry(*id),
                    handle: *handle,
                });
            }
        }
        if let Some((handle, at)) = self.pending {
            if desired.pending != Some(at) {
                diff.remove.push(Removal {
                    kind: MarkerKind::Pending,
                    handle,
                });
            }
        }

        for marker in &desired.entries {
            let MarkerKind::Entry(id) = marker.style.kind else {
                continue;
            };
            if self.entries.get(&id).is_none_or(|(_, drawn)| drawn != marker) {
                diff.place.push(*marker);
            }
        }
        if let Some(at) = desired.pending {
            if self.pending.is_none_or(|(_, drawn)| drawn != at) {
                diff.place.push(DrawnMarker {
                    at,
                    style: MarkerStyle::pending(),
                });
            }
        }
        diff
    }

    /// Applies `diff` to `map` and records the resulting handles.
    pub fn apply(&mut self, diff: MarkerDiff, map: &mut impl MapSurface) {
        for removal in diff.remove {
            match removal.kind {
                MarkerKind::Entry(id) => {
                    self.entries.remove(&id);
                }
                MarkerKind::Pending => self.pending = None,
            }
            map.remove_marker(removal.handle);
        }
        for marker in diff.place {
            let handle = map.place_marker(marker.at, &marker.style);
            match marker.style.kind {
                MarkerKind::Entry(id) => {
                    self.entries.insert(id, (handle, marker));
                }
                MarkerKind::Pending => self.pending = Some((handle, marker.at)),
            }
        }
    }

    /// Converges the map to `visible` entries plus `pending`.
    ///
    /// Returns `(placed, removed)` counts.
    pub fn sync<'a>(
        &mut self,
        visible: impl IntoIterator<Item = &'a JournalEntry>,
        pending: Option<LngLat>,
        map: &mut impl MapSurface,
    ) -> (usize, usize) {
        let diff = self.reconcile(&desired_markers(visible, pending));
        let counts = (diff.place.len(), diff.remove.len());
        if !diff.is_empty() {
            tracing::debug!(placed = counts.0, removed = counts.1, "markers reconciled");
        }
        self.apply(diff, map);
        counts
    }

    /// The entry a clicked marker stands for. `None` for the pending marker
    /// and for handles this registry does not know.
    pub fn entry_for(&self, handle: MarkerHandle) -> Option<EntryId> {
        self.entries
            .iter()
            .find(|(_, (h, _))| *h == handle)
            .map(|(id, _)| *id)
    }

    pub fn handle_for(&self, id: EntryId) -> Option<MarkerHandle> {
        self.entries.get(&id).map(|(h, _)| *h)
    }

    pub fn pending(&self) -> Option<(MarkerHandle, LngLat)> {
        self.pending
    }

    /// Number of markers, the pending one included.
    pub fn len(&self) -> usize {
        self.entries.len() + usize::from(self.pending.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moods::Mood;
    use crate::tests::common::{at, entry, mk_map, utc};

    fn two_entries() -> Vec<JournalEntry> {
        vec![
            entry(1, "Morning", Mood::Calmness, (-122.2585, 37.8719), utc(2024, 1, 1, 0)),
            entry(2, "Run", Mood::Energy, (-122.26, 37.87), utc(2024, 2, 1, 0)),
        ]
    }

    #[test]
    fn sync_places_one_marker_per_visible_entry_and_pending() {
        let entries = two_entries();
        let mut map = mk_map();
        let mut reg = MarkerRegistry::new();

        let (placed, removed) = reg.sync(&entries, Some(at(1.0, 1.0)), &mut map);
        assert_eq!((placed, removed), (3, 0));
        assert_eq!(map.marker_count(), 3);
        assert_eq!(reg.len(), 3);

        let morning = reg.handle_for(EntryId(1)).unwrap();
        let drawn = map.marker(morning).unwrap();
        assert_eq!(drawn.style.color, Mood::Calmness.color());
        assert_eq!(drawn.at, entries[0].location);

        let (pending, pending_at) = reg.pending().unwrap();
        assert!(map.marker(pending).unwrap().style.is_pending());
        assert_eq!(pending_at, at(1.0, 1.0));
    }

    #[test]
    fn sync_is_idempotent() {
        let entries = two_entries();
        let mut map = mk_map();
        let mut reg = MarkerRegistry::new();

        reg.sync(&entries, Some(at(1.0, 1.0)), &mut map);
        let before: Vec<_> = map.markers().map(|(h, m)| (h, *m)).collect();
        let churn = map.churn();

        assert_eq!(reg.sync(&entries, Some(at(1.0, 1.0)), &mut map), (0, 0));
        let after: Vec<_> = map.markers().map(|(h, m)| (h, *m)).collect();
        assert_eq!(before, after);
        assert_eq!(map.churn(), churn);
    }

    #[test]
    fn hidden_entries_lose_their_markers() {
        let entries = two_entries();
        let mut map = mk_map();
        let mut reg = MarkerRegistry::new();
        reg.sync(&entries, None, &mut map);

        let (placed, removed) = reg.sync(&entries[1..], None, &mut map);
        assert_eq!((placed, removed), (0, 1));
        assert!(reg.handle_for(EntryId(1)).is_none());
        assert!(reg.handle_for(EntryId(2)).is_some());
        assert_eq!(map.marker_count(), 1);
    }

    #[test]
    fn changed_entries_are_redrawn() {
        let mut entries = two_entries();
        let mut map = mk_map();
        let mut reg = MarkerRegistry::new();
        reg.sync(&entries, None, &mut map);
        let old = reg.handle_for(EntryId(2)).unwrap();

        entries[1].mood = Mood::Passion;
        assert_eq!(reg.sync(&entries, None, &mut map), (1, 1));
        let new = reg.handle_for(EntryId(2)).unwrap();
        assert_ne!(old, new);
        assert!(map.marker(old).is_none());
        assert_eq!(map.marker(new).unwrap().style.color, Mood::Passion.color());
    }

    #[test]
    fn moving_the_pending_location_replaces_its_marker() {
        let mut map = mk_map();
        let mut reg = MarkerRegistry::new();
        reg.sync([], Some(at(1.0, 1.0)), &mut map);
        assert_eq!(reg.sync([], Some(at(2.0, 2.0)), &mut map), (1, 1));
        assert_eq!(map.marker_count(), 1);
        assert_eq!(reg.pending().unwrap().1, at(2.0, 2.0));

        assert_eq!(reg.sync([], None, &mut map), (0, 1));
        assert!(reg.is_empty());
        assert_eq!(map.marker_count(), 0);
    }

    #[test]
    fn reconcile_does_not_touch_the_map() {
        let entries = two_entries();
        let reg = MarkerRegistry::new();
        let diff = reg.reconcile(&desired_markers(&entries, None));
        assert_eq!(diff.place.len(), 2);
        assert!(diff.remove.is_empty());
        assert!(reg.is_empty());
    }

    #[test]
    fn clicked_markers_map_back_to_entries() {
        let entries = two_entries();
        let mut map = mk_map();
        let mut reg = MarkerRegistry::new();
        reg.sync(&entries, Some(at(5.0, 5.0)), &mut map);

        let run = reg.handle_for(EntryId(2)).unwrap();
        assert_eq!(reg.entry_for(run), Some(EntryId(2)));
        let (pending, _) = reg.pending().unwrap();
        assert_eq!(reg.entry_for(pending), None);
        assert_eq!(reg.entry_for(MarkerHandle(999)), None);
    }

    #[test]
    fn syncing_nothing_removes_everything() {
        let entries = two_entries();
        let mut map = mk_map();
        let mut reg = MarkerRegistry::new();
        reg.sync(&entries, Some(at(5.0, 5.0)), &mut map);
        let (placed, removed) = reg.sync(&Vec::<JournalEntry>::new(), None, &mut map);
        assert_eq!((placed, removed), (0, 3));
        assert!(reg.is_empty());
        assert_eq!(map.marker_count(), 0);
        assert_eq!(reg.handle_for(EntryId(1)), None);
    }
}
