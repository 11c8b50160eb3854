//! The map surface the engine draws on, and an in-memory implementation of it.

use crate::entry::EntryId;
use crate::geo::LngLat;
use crate::moods::{Mood, Rgb, UNSTYLED};
use std::collections::BTreeMap;

/// Opaque handle to a marker placed on a [`MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// A saved entry; activating it selects the entry for editing.
    Entry(EntryId),
    /// The location of the entry being composed.
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub color: Rgb,
    pub opacity: f32,
    pub kind: MarkerKind,
}

pub const PENDING_COLOR: Rgb = Rgb::new(0x80, 0x80, 0x80);
pub const PENDING_OPACITY: f32 = 0.7;

impl MarkerStyle {
    /// Solid marker in the mood's colour.
    pub fn for_entry(id: EntryId, mood: Option<Mood>) -> Self {
        Self {
            color: mood.map_or(UNSTYLED, Mood::color),
            opacity: 1.0,
            kind: MarkerKind::Entry(id),
        }
    }

    /// Translucent grey: reads as "not saved yet" next to any mood colour,
    /// including Sadness which shares the grey.
    pub fn pending() -> Self {
        Self {
            color: PENDING_COLOR,
            opacity: PENDING_OPACITY,
            kind: MarkerKind::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.kind == MarkerKind::Pending
    }
}

/// What the engine needs from a map: it never touches tiles or projection.
pub trait MapSurface {
    fn place_marker(&mut self, at: LngLat, style: &MarkerStyle) -> MarkerHandle;
    fn remove_marker(&mut self, handle: MarkerHandle);
    fn recenter(&mut self, center: LngLat, zoom: f64);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnMarker {
    pub at: LngLat,
    pub style: MarkerStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub center: LngLat,
    pub zoom: f64,
}

/// A map that only remembers what is drawn on it.
#[derive(Debug)]
pub struct RecordingMap {
    markers: BTreeMap<MarkerHandle, DrawnMarker>,
    next_handle: u64,
    view: View,
    placed: usize,
    removed: usize,
}

impl RecordingMap {
    pub fn new(view: View) -> Self {
        Self {
            markers: BTreeMap::new(),
            next_handle: 1,
            view,
            placed: 0,
            removed: 0,
        }
    }

    /// Live markers, oldest first.
    pub fn markers(&self) -> impl Iterator<Item = (MarkerHandle, &DrawnMarker)> {
        self.markers.iter().map(|(h, m)| (*h, m))
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<&DrawnMarker> {
        self.markers.get(&handle)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Total `(placed, removed)` calls so far.
    pub fn churn(&self) -> (usize, usize) {
        (self.placed, self.removed)
    }
}

impl MapSurface for RecordingMap {
    fn place_marker(&mut self, at: LngLat, style: &MarkerStyle) -> MarkerHandle {
        let handle = MarkerHandle(self.next_handle);
        self.next_handle += 1;
        self.markers.insert(handle, DrawnMarker { at, style: *style });
        self.placed += 1;
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        if self.markers.remove(&handle).is_some() {
            self.removed += 1;
        } else {
            tracing::warn!(handle = handle.0, "removing a marker that is not on the map");
        }
    }

    fn recenter(&mut self, center: LngLat, zoom: f64) {
        self.view = View { center, zoom };
    }
}
