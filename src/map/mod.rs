//! Map view model: panel state, pinned location and visible region.

mod presenter;

pub use presenter::MapPresenter;

use crate::models::Coordinates;

/// Austin, TX
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    latitude: 30.284458,
    longitude: -97.7342105,
};

/// Span used when centring on a picked location (street level)
pub const PIN_SPAN_DEGREES: f64 = 0.007;

/// Whether the search panel covers the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Open,
}

impl std::fmt::Display for PanelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelState::Closed => write!(f, "closed"),
            PanelState::Open => write!(f, "open"),
        }
    }
}

/// Visible map area: a centre and a span in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    pub center: Coordinates,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    pub fn around(center: Coordinates) -> Self {
        Self {
            center,
            latitude_delta: PIN_SPAN_DEGREES,
            longitude_delta: PIN_SPAN_DEGREES,
        }
    }
}

impl Default for MapRegion {
    fn default() -> Self {
        Self::around(DEFAULT_CENTER)
    }
}
