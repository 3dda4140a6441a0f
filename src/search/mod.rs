//! Search-as-you-type coordination.
//!
//! Turns raw search box events into at most one outstanding geocoding
//! request and a presentation state for the result list.

mod coordinator;
mod debounce;
mod events;
mod state;

pub use coordinator::{RequestId, SearchCoordinator, MISSING_API_KEY};
pub use debounce::Debouncer;
pub use events::{Notification, SearchEvent, SearchListener};
pub use state::SearchState;
