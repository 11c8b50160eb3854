//! The interaction state machine tying map events and form submissions to the
//! entry store and the markers on the map.
//!
//! Every transition runs to completion: the store is mutated first, then the
//! markers are reconciled against the new state.

use crate::config::Config;
use crate::entry::{Draft, EntryId, JournalEntry};
use crate::error::{NotFoundError, SubmitError};
use crate::filter::{DateRange, FilterError, FilterState};
use crate::geo::LngLat;
use crate::map::{MapSurface, MarkerHandle};
use crate::moods::Mood;
use crate::reconcile::MarkerRegistry;
use crate::store::EntryStore;

#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Idle,
    /// A new entry is being written at `location`; its marker is the pending one.
    Composing { location: LngLat, draft: Draft },
    /// Entry `id` is loaded into `draft`.
    Editing { id: EntryId, draft: Draft },
}

impl Interaction {
    pub fn name(&self) -> &'static str {
        match self {
            Interaction::Idle => "idle",
            Interaction::Composing { .. } => "composing",
            Interaction::Editing { .. } => "editing",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }
}

pub struct Controller<M: MapSurface> {
    config: Config,
    store: EntryStore,
    markers: MarkerRegistry,
    filter: FilterState,
    state: Interaction,
    map: M,
}

impl<M: MapSurface> Controller<M> {
    pub fn new(config: Config, map: M) -> Self {
        Self::with_store(config, EntryStore::new(), map)
    }

    /// Starts from an existing store, drawing its entries right away.
    pub fn with_store(config: Config, store: EntryStore, map: M) -> Self {
        let mut controller = Self {
            config,
            store,
            markers: MarkerRegistry::new(),
            filter: FilterState::default(),
            state: Interaction::Idle,
            map,
        };
        controller.reconcile();
        controller
    }

    /// A click on empty map: start a new entry there. Whatever draft was open
    /// is dropped without saving.
    pub fn map_clicked(&mut self, location: LngLat) {
        if !self.state.is_idle() {
            tracing::debug!(from = self.state.name(), "discarding draft for new location");
        }
        self.state = Interaction::Composing {
            location,
            draft: Draft::at(location),
        };
        self.reconcile();
    }

    /// An entry marker (or list item) was activated: load it for editing and
    /// fly to it.
    pub fn marker_activated(&mut self, id: EntryId) -> Result<(), NotFoundError> {
        let Some(entry) = self.store.get(id) else {
            tracing::warn!(id = %id, "activated entry does not exist");
            return Err(NotFoundError(id));
        };
        let location = entry.location;
        self.state = Interaction::Editing {
            id,
            draft: Draft::from(entry),
        };
        self.map.recenter(location, self.config.focus_zoom);
        self.reconcile();
        Ok(())
    }

    /// Routes a click on a drawn marker. Clicks on the pending marker, or on
    /// handles this controller did not place, do nothing and return `None`.
    pub fn marker_clicked(&mut self, handle: MarkerHandle) -> Result<Option<EntryId>, NotFoundError> {
        match self.markers.entry_for(handle) {
            Some(id) => self.marker_activated(id).map(|()| Some(id)),
            None => Ok(None),
        }
    }

    /// Commits the open draft: creates when composing, updates when editing.
    ///
    /// On a validation error nothing changes and the draft stays open.
    pub fn submit(&mut self) -> Result<EntryId, SubmitError> {
        let result = match &mut self.state {
            Interaction::Idle => Err(SubmitError::NoDraft),
            Interaction::Composing { location, draft } => {
                draft.location = Some(*location);
                self.store.create(draft).map_err(SubmitError::from)
            }
            Interaction::Editing { id, draft } => self
                .store
                .update(*id, draft)
                .map(|()| *id)
                .map_err(SubmitError::from),
        };
        match result {
            Ok(id) => {
                self.state = Interaction::Idle;
                self.reconcile();
                Ok(id)
            }
            Err(e) => {
                tracing::debug!(state = self.state.name(), "submit rejected: {e}");
                Err(e)
            }
        }
    }

    /// Drops the open draft and the pending marker. Returns `false` when there
    /// was nothing to cancel.
    pub fn cancel(&mut self) -> bool {
        if self.state.is_idle() {
            return false;
        }
        self.state = Interaction::Idle;
        self.reconcile();
        true
    }

    /// Deletes entry `id`. Deleting the entry being edited closes the editor.
    ///
    /// Unknown ids leave entries and markers untouched.
    pub fn delete_requested(&mut self, id: EntryId) -> Result<JournalEntry, NotFoundError> {
        let removed = self.store.delete(id).inspect_err(|_| {
            tracing::warn!(id = %id, "delete requested for unknown entry");
        })?;
        if matches!(self.state, Interaction::Editing { id: editing, .. } if editing == id) {
            self.state = Interaction::Idle;
        }
        self.reconcile();
        Ok(removed)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.reconcile();
    }

    pub fn set_mood_filter(&mut self, mood: Option<Mood>) {
        self.filter.mood = mood;
        self.reconcile();
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.filter.range = range;
        self.reconcile();
    }

    /// Sets the date range from the raw "from"/"to" inputs. Empty strings
    /// leave that side open. On a parse error the range is left as it was.
    pub fn set_date_inputs(&mut self, start: &str, end: &str) -> Result<(), FilterError> {
        let range = DateRange::parse(start, end, self.config.upper_bound)?;
        self.set_date_range(range);
        Ok(())
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.reconcile();
    }

    /// The draft the form is bound to, if any.
    pub fn draft(&self) -> Option<&Draft> {
        match &self.state {
            Interaction::Idle => None,
            Interaction::Composing { draft, .. } | Interaction::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        match &mut self.state {
            Interaction::Idle => None,
            Interaction::Composing { draft, .. } | Interaction::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn pending_location(&self) -> Option<LngLat> {
        match self.state {
            Interaction::Composing { location, .. } => Some(location),
            _ => None,
        }
    }

    pub fn editing(&self) -> Option<EntryId> {
        match self.state {
            Interaction::Editing { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn state(&self) -> &Interaction {
        &self.state
    }

    pub fn entries(&self) -> &[JournalEntry] {
        self.store.list()
    }

    pub fn visible_entries(&self) -> Vec<&JournalEntry> {
        self.filter.apply(self.store.list())
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn reconcile(&mut self) {
        let pending = self.pending_location();
        let visible = self.filter.apply(self.store.list());
        self.markers.sync(visible, pending, &mut self.map);
    }
}
