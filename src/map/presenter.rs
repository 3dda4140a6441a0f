//! Map-side reaction to search: panel visibility, the pin, and the region.

use tracing::debug;

use super::{MapRegion, PanelState};
use crate::models::Location;
use crate::search::Notification;

/// What the map shows, independent of how it is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPresenter {
    panel: PanelState,
    pin: Option<Location>,
    region: MapRegion,
}

impl MapPresenter {
    pub fn new() -> Self {
        Self {
            panel: PanelState::Closed,
            pin: None,
            region: MapRegion::default(),
        }
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    pub fn pin(&self) -> Option<&Location> {
        self.pin.as_ref()
    }

    pub fn region(&self) -> MapRegion {
        self.region
    }

    pub fn begin_searching(&mut self) {
        self.panel = PanelState::Open;
    }

    pub fn end_searching(&mut self) {
        self.panel = PanelState::Closed;
    }

    /// Tapping the map hides the search panel.
    pub fn map_touched(&mut self) {
        self.end_searching();
    }

    /// Replace any existing pin with `location` and centre on it.
    pub fn select(&mut self, location: Location) {
        debug!("Pinning {}", location);
        self.region = MapRegion::around(location.coordinates());
        self.pin = Some(location);
    }

    /// Fold a coordinator notification into the map. Returns whether
    /// anything visible changed.
    pub fn apply(&mut self, notification: &Notification) -> bool {
        let before = self.clone();

        match notification {
            Notification::PanelOpened => self.begin_searching(),
            Notification::PanelClosed => self.end_searching(),
            Notification::LocationSelected(location) => self.select(location.clone()),
            Notification::StateChanged(_)
            | Notification::LocationsUpdated(_)
            | Notification::Error(_) => {}
        }

        *self != before
    }
}

impl Default for MapPresenter {
    fn default() -> Self {
        Self::new()
    }
}
