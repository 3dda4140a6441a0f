//! Trailing-edge debounce for search-as-you-type.

use std::time::Duration;
use tokio::time::Instant;

/// Holds at most one scheduled search.
///
/// Scheduling again before the deadline replaces both the query and the
/// deadline. Nothing fires on its own: the owner waits on
/// [`Debouncer::deadline`] and then calls [`Debouncer::take_ready`].
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(Instant, String)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn schedule(&mut self, query: String) {
        self.pending = Some((Instant::now() + self.delay, query));
    }

    /// Drop the scheduled search, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    /// Take the scheduled query once its deadline has passed.
    pub fn take_ready(&mut self) -> Option<String> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= Instant::now() => {
                self.pending.take().map(|(_, query)| query)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_not_ready_before_delay() {
        let mut debouncer = Debouncer::new(Duration::from_secs(1));
        debouncer.schedule("aus".into());

        tokio::time::advance(Duration::from_millis(999)).await;
        assert!(debouncer.take_ready().is_none());
        assert!(debouncer.is_pending());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(debouncer.take_ready().as_deref(), Some("aus"));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_replaces_query_and_deadline() {
        let mut debouncer = Debouncer::new(Duration::from_secs(1));
        debouncer.schedule("a".into());
        let first = debouncer.deadline().unwrap();

        tokio::time::advance(Duration::from_millis(600)).await;
        debouncer.schedule("au".into());
        assert!(debouncer.deadline().unwrap() > first);

        tokio::time::advance(Duration::from_millis(600)).await;
        assert!(debouncer.take_ready().is_none());

        tokio::time::advance(Duration::from_millis(400)).await;
        assert_eq!(debouncer.take_ready().as_deref(), Some("au"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let mut debouncer = Debouncer::new(Duration::from_secs(1));
        debouncer.schedule("a".into());
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        tokio::time::advance(Duration::from_secs(5)).await;
        assert!(debouncer.take_ready().is_none());
        assert!(debouncer.deadline().is_none());
    }
}
