use serde::{Deserialize, Serialize};

use crate::models::{Property, PropertyDraft, RecordId, SearchFilters};

/// Section of the browser the user is looking at
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Search,
    List,
    Saved,
}

/// Identifies one search request so a late response can be recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

/// Session state of the listing browser
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub active_tab: Tab,
    pub filters: SearchFilters,
    pub results: Vec<Property>,
    pub favorites: Vec<Property>,
    pub draft: PropertyDraft,
    pub searching: bool,
    latest_search: u64,
}

#[derive(Debug, Clone)]
pub enum Action {
    SetTab(Tab),
    UpdateFilters(SearchFilters),
    /// A search was sent; its ticket is [`AppState::latest_search`] afterwards
    SearchStarted,
    SearchCompleted {
        ticket: SearchTicket,
        results: Vec<Property>,
    },
    SearchFailed(SearchTicket),
    ToggleFavorite(Property),
    RemoveFavorite(RecordId),
    EditDraft(PropertyDraft),
    ToggleDraftAmenity(String),
    ResetDraft,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket of the most recently started search
    pub fn latest_search(&self) -> SearchTicket {
        SearchTicket(self.latest_search)
    }

    pub fn is_favorite(&self, id: RecordId) -> bool {
        self.favorites.iter().any(|p| p.id == id)
    }

    /// Applies one transition and returns the next state
    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::SetTab(tab) => self.active_tab = tab,
            Action::UpdateFilters(filters) => self.filters = filters,
            Action::SearchStarted => {
                self.latest_search += 1;
                self.searching = true;
            }
            Action::SearchCompleted { ticket, results } => {
                // responses to superseded searches are dropped
                if ticket == self.latest_search() {
                    self.results = results;
                    self.searching = false;
                }
            }
            Action::SearchFailed(ticket) => {
                if ticket == self.latest_search() {
                    self.searching = false;
                }
            }
            Action::ToggleFavorite(property) => {
                if self.is_favorite(property.id) {
                    self.favorites.retain(|p| p.id != property.id);
                } else {
                    self.favorites.push(property);
                }
            }
            Action::RemoveFavorite(id) => self.favorites.retain(|p| p.id != id),
            Action::EditDraft(draft) => self.draft = draft,
            Action::ToggleDraftAmenity(amenity) => self.draft.toggle_amenity(&amenity),
            Action::ResetDraft => self.draft = PropertyDraft::default(),
        }
        self
    }
}
