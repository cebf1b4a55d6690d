//! Change notifications emitted by the registry.
//!
//! Listeners are called synchronously, in registration order, after the
//! registry has finished mutating its state. They receive owned snapshots
//! and have no way to reach back into the registry.

use std::sync::{Arc, Mutex, PoisonError};

use zone_map_zone_models::Zone;

/// A change in registry state.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEvent {
    /// The ordered zone list changed (create, rename, ring edit, removal,
    /// clear). Carries the full list after the change.
    CollectionChanged(Vec<Zone>),
    /// The selected zone changed, or the selected zone's shape changed.
    /// `None` means the selection was cleared.
    SelectionChanged(Option<Zone>),
}

/// Receives [`RegistryEvent`]s.
///
/// Implementations must be `Send + Sync` so a listener can be shared with
/// whatever drives the provider callbacks.
pub trait RegistryListener: Send + Sync {
    /// Called once per event.
    fn on_event(&self, event: &RegistryEvent);
}

/// A listener that records every event it sees.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<RegistryEvent>>,
}

impl EventLog {
    /// Creates an empty log behind an [`Arc`] ready to subscribe.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Removes and returns all recorded events.
    #[must_use]
    pub fn drain(&self) -> Vec<RegistryEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Selection events recorded so far, oldest first.
    #[must_use]
    pub fn selections(&self) -> Vec<Option<Zone>> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter_map(|event| match event {
                RegistryEvent::SelectionChanged(zone) => Some(zone.clone()),
                RegistryEvent::CollectionChanged(_) => None,
            })
            .collect()
    }
}

impl RegistryListener for EventLog {
    fn on_event(&self, event: &RegistryEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
