//! Events consumed from, and notifications produced for, the UI shell.

use tokio::sync::mpsc;

use super::SearchState;
use crate::models::Location;

/// Raw input from the search box and result list
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// The search box gained focus
    BeginEditing,
    TextChanged(String),
    /// Explicit "search now"
    Submit,
    /// Cancel button or dismiss
    Cancel,
    /// A row in the result list was picked
    Select(usize),
}

/// Everything the coordinator reports, as one value
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    StateChanged(SearchState),
    LocationsUpdated(Vec<Location>),
    Error(String),
    PanelOpened,
    PanelClosed,
    LocationSelected(Location),
}

/// Presentation layer callbacks.
///
/// The panel and selection callbacks default to no-ops since a bare result
/// list has no use for them.
pub trait SearchListener: Send {
    fn on_state_changed(&mut self, state: SearchState);

    fn on_locations_updated(&mut self, locations: &[Location]);

    fn on_error(&mut self, message: &str);

    fn on_panel_opened(&mut self) {}

    fn on_panel_closed(&mut self) {}

    fn on_location_selected(&mut self, _location: &Location) {}
}

/// Forward notifications over a channel. A closed receiver just drops them.
impl SearchListener for mpsc::UnboundedSender<Notification> {
    fn on_state_changed(&mut self, state: SearchState) {
        let _ = self.send(Notification::StateChanged(state));
    }

    fn on_locations_updated(&mut self, locations: &[Location]) {
        let _ = self.send(Notification::LocationsUpdated(locations.to_vec()));
    }

    fn on_error(&mut self, message: &str) {
        let _ = self.send(Notification::Error(message.to_string()));
    }

    fn on_panel_opened(&mut self) {
        let _ = self.send(Notification::PanelOpened);
    }

    fn on_panel_closed(&mut self) {
        let _ = self.send(Notification::PanelClosed);
    }

    fn on_location_selected(&mut self, location: &Location) {
        let _ = self.send(Notification::LocationSelected(location.clone()));
    }
}
