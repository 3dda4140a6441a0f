//! Geocoding response body parsing.

use serde_json::Value;
use tracing::debug;

use crate::models::Location;

/// Turn a 200 response body into locations.
///
/// A body that is not JSON, or has no `results` array, means "no results".
/// Elements that do not parse are dropped; the rest keep their order.
pub fn parse_locations(body: &[u8]) -> Vec<Location> {
    let json: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            debug!("Geocoding body is not JSON, treating as empty: {}", e);
            return Vec::new();
        }
    };

    let Some(results) = json["results"].as_array() else {
        debug!("Geocoding body has no results array, treating as empty");
        return Vec::new();
    };

    let locations: Vec<Location> = results.iter().filter_map(Location::from_json).collect();

    if locations.len() < results.len() {
        debug!(
            "Dropped {} unparseable geocoding results",
            results.len() - locations.len()
        );
    }

    locations
}
