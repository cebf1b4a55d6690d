//! Debouncing for free-text region search.
//!
//! Every keystroke takes a ticket. A search only reaches the provider if
//! its ticket is still the newest one once the quiet period has elapsed,
//! and its result is only delivered if no newer ticket was taken while
//! the lookup was in flight.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use zone_map_provider::service::SearchServiceConfig;
use zone_map_provider::{ProviderError, RegionSearch};
use zone_map_zone_models::LatLng;

/// Quiet period used when none is configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Position of one search request in the keystroke stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// What became of a debounced search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// A newer request was made; nothing is delivered.
    Superseded,
    /// The provider answered. `None` means nothing matched.
    Resolved(Option<Vec<LatLng>>),
}

/// Issues monotonically increasing tickets.
///
/// Cloning shares the ticket counter, so clones can be handed to
/// concurrently running search tasks.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    latest: Arc<AtomicU64>,
    delay: Duration,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl SearchDebouncer {
    /// Creates a debouncer that waits `delay` after each ticket.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            latest: Arc::new(AtomicU64::new(0)),
            delay,
        }
    }

    /// Uses the quiet period configured for a search service.
    #[must_use]
    pub fn for_service(config: &SearchServiceConfig) -> Self {
        Self::new(Duration::from_millis(config.debounce_ms))
    }

    /// The quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Takes the next ticket, superseding every earlier one.
    #[must_use]
    pub fn ticket(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns `true` if no newer ticket has been taken since `ticket`.
    #[must_use]
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Waits out the quiet period, then searches `text` if this request
    /// is still the newest.
    ///
    /// # Errors
    ///
    /// Returns the provider's error if a lookup was issued and failed.
    pub async fn debounced_search<S: RegionSearch>(
        &self,
        search: &S,
        text: &str,
    ) -> Result<SearchOutcome, ProviderError> {
        let ticket = self.ticket();
        tokio::time::sleep(self.delay).await;

        if !self.is_current(ticket) {
            log::debug!("Search for '{text}' superseded before lookup");
            return Ok(SearchOutcome::Superseded);
        }

        let ring = search.search_region(text).await?;

        if !self.is_current(ticket) {
            log::debug!("Search for '{text}' superseded during lookup");
            return Ok(SearchOutcome::Superseded);
        }

        Ok(SearchOutcome::Resolved(ring))
    }
}
