/// Presentation state of the search panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    /// Not yet activated
    #[default]
    None,
    /// Waiting for input
    Initial,
    /// A request is in flight
    Searching,
    /// Last search finished with this many results on screen
    Searched(usize),
}

impl std::fmt::Display for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchState::None => write!(f, "none"),
            SearchState::Initial => write!(f, "initial"),
            SearchState::Searching => write!(f, "searching"),
            SearchState::Searched(n) => write!(f, "searched({})", n),
        }
    }
}
