//! Debounced, single-flight search coordination.
//!
//! All state lives on the task running [`SearchCoordinator::run`]. Geocoding
//! requests run on their own tasks and report back over a channel tagged
//! with the request id; only the completion of the current request is ever
//! applied.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use super::debounce::Debouncer;
use super::events::{SearchEvent, SearchListener};
use super::SearchState;
use crate::config::SearchConfig;
use crate::geocode::{GeocodeError, Geocoder};
use crate::models::Location;

pub const MISSING_API_KEY: &str = "no geocoding API key configured";

pub type RequestId = u64;

/// The one request whose result is allowed to land
#[derive(Debug)]
struct PendingRequest {
    id: RequestId,
    query: String,
    started: Instant,
}

struct Completion {
    id: RequestId,
    result: Result<Vec<Location>, GeocodeError>,
}

enum Step {
    Completed(Completion),
    DebounceElapsed,
    Event(Option<SearchEvent>),
}

pub struct SearchCoordinator<G: Geocoder, L: SearchListener> {
    geocoder: Arc<G>,
    listener: L,
    api_key: Option<String>,
    debouncer: Debouncer,
    state: SearchState,
    text: String,
    locations: Vec<Location>,
    pending: Option<PendingRequest>,
    next_request_id: RequestId,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<G: Geocoder, L: SearchListener> SearchCoordinator<G, L> {
    /// A coordinator without an API key never issues requests.
    pub fn new(
        geocoder: Arc<G>,
        listener: L,
        api_key: Option<String>,
        config: &SearchConfig,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            geocoder,
            listener,
            api_key: api_key.filter(|k| !k.is_empty()),
            debouncer: Debouncer::new(config.debounce()),
            state: SearchState::None,
            text: String::new(),
            locations: Vec::new(),
            pending: None,
            next_request_id: 0,
            completions_tx,
            completions_rx,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_request_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_search_scheduled(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Process events until the sender side of `events` is dropped.
    ///
    /// Any request still in flight at that point is cancelled. Returns the
    /// coordinator so callers can inspect the final state.
    pub async fn run(mut self, mut events: mpsc::Receiver<SearchEvent>) -> Self {
        self.activate();

        loop {
            let deadline = self.debouncer.deadline();

            let step = tokio::select! {
                biased;
                Some(completion) = self.completions_rx.recv() => Step::Completed(completion),
                _ = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    Step::DebounceElapsed
                }
                event = events.recv() => Step::Event(event),
            };

            match step {
                Step::Completed(completion) => self.complete(completion),
                Step::DebounceElapsed => self.debounce_elapsed(),
                Step::Event(Some(event)) => self.handle_event(event),
                Step::Event(None) => break,
            }
        }

        debug!("Search event stream closed");
        self.debouncer.cancel();
        self.cancel_in_flight();
        self
    }

    /// The search view became active.
    pub fn activate(&mut self) {
        self.set_state(SearchState::Initial);
    }

    pub fn handle_event(&mut self, event: SearchEvent) {
        debug!("Search event: {:?}", event);

        match event {
            SearchEvent::BeginEditing => self.listener.on_panel_opened(),
            SearchEvent::TextChanged(text) => self.text_changed(text),
            SearchEvent::Submit => self.submit(),
            SearchEvent::Cancel => self.dismiss(),
            SearchEvent::Select(index) => self.select(index),
        }
    }

    /// Start the scheduled search if its quiet period is over.
    pub fn debounce_elapsed(&mut self) {
        if let Some(query) = self.debouncer.take_ready() {
            self.start_search(query);
        }
    }

    fn text_changed(&mut self, text: String) {
        self.debouncer.cancel();
        self.text = text;

        if self.text.is_empty() {
            self.cancel_in_flight();
            self.clear_locations();
            self.set_state(SearchState::Initial);
            return;
        }

        self.debouncer.schedule(self.text.clone());
    }

    fn submit(&mut self) {
        self.debouncer.cancel();

        if self.text.is_empty() {
            debug!("Submit with empty search text ignored");
            return;
        }

        self.start_search(self.text.clone());
    }

    fn dismiss(&mut self) {
        self.debouncer.cancel();
        self.cancel_in_flight();
        self.clear_locations();
        self.set_state(SearchState::Initial);
        self.listener.on_panel_closed();
    }

    fn select(&mut self, index: usize) {
        let Some(location) = self.locations.get(index).cloned() else {
            warn!(
                "Selected row {} but only {} results are shown",
                index,
                self.locations.len()
            );
            return;
        };

        info!("Selected {}", location);
        self.listener.on_panel_closed();
        self.listener.on_location_selected(&location);
    }

    fn start_search(&mut self, query: String) {
        let Some(api_key) = self.api_key.clone() else {
            warn!("Not searching for {:?}: {}", query, MISSING_API_KEY);
            self.listener.on_error(MISSING_API_KEY);
            return;
        };

        // Must complete before the next request is issued.
        self.cancel_in_flight();

        let id = self.next_request_id;
        self.next_request_id += 1;

        info!("Searching for {:?} (request {})", query, id);

        let request = self.geocoder.search(&query, &api_key);
        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            let result = request.await;
            // The receiver only goes away with the coordinator itself.
            let _ = completions.send(Completion { id, result });
        });

        self.pending = Some(PendingRequest {
            id,
            query,
            started: Instant::now(),
        });
        self.set_state(SearchState::Searching);
    }

    fn complete(&mut self, completion: Completion) {
        let Completion { id, result } = completion;

        let request = match self.pending.take() {
            Some(request) if request.id == id => request,
            other => {
                self.pending = other;
                debug!("Ignoring result of superseded request {}", id);
                return;
            }
        };

        match result {
            Ok(locations) => {
                info!(
                    "Search for {:?} found {} locations in {:?}",
                    request.query,
                    locations.len(),
                    request.started.elapsed()
                );
                self.locations = locations;
                self.listener.on_locations_updated(&self.locations);
                self.set_state(SearchState::Searched(self.locations.len()));
            }
            Err(e) if e.is_cancelled() => {
                debug!("Request {} for {:?} was cancelled", id, request.query);
            }
            Err(e) => {
                warn!("Search for {:?} failed: {}", request.query, e);
                self.listener.on_error(&e.to_string());
                self.set_state(SearchState::Searched(self.locations.len()));
            }
        }
    }

    fn cancel_in_flight(&mut self) {
        if let Some(request) = self.pending.take() {
            debug!("Cancelling request {} for {:?}", request.id, request.query);
            self.geocoder.cancel();
        }
    }

    fn clear_locations(&mut self) {
        self.locations.clear();
        self.listener.on_locations_updated(&self.locations);
    }

    fn set_state(&mut self, state: SearchState) {
        self.state = state;
        self.listener.on_state_changed(state);
    }
}
