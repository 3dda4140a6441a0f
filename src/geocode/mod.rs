//! Forward geocoding over HTTP.

mod client;
mod error;
mod response;

pub use client::GeocodeClient;
pub use error::{GeocodeError, TransportError};
pub use response::parse_locations;

use futures::future::{BoxFuture, FutureExt};

use crate::models::Location;

/// Anything that can turn free text into locations and abort its own
/// in-flight work. [`crate::search::SearchCoordinator`] only talks to this.
///
/// `search` must bind the request to the current cancellation state before
/// it returns; the returned future may be polled later on another task.
pub trait Geocoder: Send + Sync + 'static {
    fn search(
        &self,
        query: &str,
        api_key: &str,
    ) -> BoxFuture<'static, Result<Vec<Location>, GeocodeError>>;

    /// Resolve every search issued so far as cancelled.
    fn cancel(&self);
}

impl Geocoder for GeocodeClient {
    fn search(
        &self,
        query: &str,
        api_key: &str,
    ) -> BoxFuture<'static, Result<Vec<Location>, GeocodeError>> {
        GeocodeClient::search(self, query, api_key).boxed()
    }

    fn cancel(&self) {
        GeocodeClient::cancel(self)
    }
}
