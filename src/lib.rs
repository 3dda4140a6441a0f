//! Mapsearch - debounced geocoding search for a map view
//!
//! This library provides the geocoding client, the search coordinator and
//! the map view model used by the lookup binary.

pub mod config;
pub mod geocode;
pub mod map;
pub mod models;
pub mod search;

pub use geocode::{GeocodeClient, GeocodeError, Geocoder};
pub use models::{Coordinates, Location};
pub use search::{SearchCoordinator, SearchEvent, SearchState};
