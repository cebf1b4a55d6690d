#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The polygon registry.
//!
//! [`ZoneRegistry`] is the single owner of every [`Zone`]: it validates
//! rings, assigns identifiers, keeps the ordered collection and the
//! selection, and tells subscribers about every change. Nothing else
//! writes a zone's ring or name.
//!
//! Identifiers come from a counter owned by the registry instance. The
//! counter only moves forward; [`ZoneRegistry::clear_all`] does not reset
//! it, so an identifier is never handed out twice by the same registry.

pub mod listener;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use zone_map_geometry::{RingError, centroid, rectangle_from_ring, validate_ring};
use zone_map_zone_models::{DrawingHandle, LatLng, Zone, ZoneId, ZoneKind};

pub use listener::{EventLog, RegistryEvent, RegistryListener};

/// Errors from registry operations.
///
/// All of these are recoverable: the registry state is unchanged whenever
/// one is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// The ring was too short or had an out-of-range coordinate.
    #[error("Invalid ring: {0}")]
    InvalidRing(#[from] RingError),

    /// No zone with this identifier exists (it may have just been removed).
    #[error("Zone not found: {id}")]
    NotFound {
        /// The identifier that was looked up.
        id: ZoneId,
    },

    /// A rename was blank after trimming.
    #[error("Zone name cannot be empty")]
    EmptyName,

    /// The provider re-delivered a completion for a shape that was already
    /// registered.
    #[error("Completion for {handle} was already registered")]
    DuplicateCompletion {
        /// The provider's handle for the shape.
        handle: DrawingHandle,
    },
}

/// Ordered collection of zones with selection state.
#[derive(Default)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
    selected: Option<ZoneId>,
    /// Sequence number of the last zone created. Never decremented.
    last_sequence: u64,
    /// Every drawing handle ever registered, including removed shapes.
    seen_handles: BTreeSet<DrawingHandle>,
    handle_to_id: BTreeMap<DrawingHandle, ZoneId>,
    /// Payload of the most recent selection notification, used to drop
    /// repeats with identical content.
    last_selection: Option<Option<Zone>>,
    listeners: Vec<Arc<dyn RegistryListener>>,
}

impl std::fmt::Debug for ZoneRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoneRegistry")
            .field("zones", &self.zones)
            .field("selected", &self.selected)
            .field("last_sequence", &self.last_sequence)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl ZoneRegistry {
    /// Creates an empty registry whose first zone will be `zone-1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. Listeners are notified in registration order.
    pub fn subscribe(&mut self, listener: Arc<dyn RegistryListener>) {
        self.listeners.push(listener);
    }

    /// All zones in creation order.
    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Number of zones currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Returns `true` if no zones are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Looks up a zone by identifier.
    #[must_use]
    pub fn get(&self, id: &ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| &z.id == id)
    }

    /// Identifier of the selected zone, if any.
    #[must_use]
    pub const fn selected_id(&self) -> Option<&ZoneId> {
        self.selected.as_ref()
    }

    /// The selected zone, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Zone> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// The zone created from the given drawing handle, if it still exists.
    #[must_use]
    pub fn zone_id_for_handle(&self, handle: DrawingHandle) -> Option<&ZoneId> {
        self.handle_to_id
            .get(&handle)
            .filter(|id| self.get(id).is_some())
    }

    /// Validates the ring and stores a new zone at the end of the list.
    ///
    /// The ring is stored exactly as given; `kind` only labels it. A
    /// non-blank `name` is stored verbatim, a blank or missing one falls
    /// back to `"{Kind} {n}"`. The new zone is not selected.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidRing`] if the ring has fewer than
    /// three points or an out-of-range coordinate.
    pub fn create_zone(
        &mut self,
        ring: Vec<LatLng>,
        kind: ZoneKind,
        name: Option<String>,
    ) -> Result<Zone, RegistryError> {
        validate_ring(&ring)?;
        let centroid = centroid(&ring).ok_or(RingError::TooFewPoints { count: 0 })?;

        self.last_sequence += 1;
        let sequence = self.last_sequence;
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("{kind} {sequence}"));

        let zone = Zone {
            id: ZoneId::from_sequence(sequence),
            name,
            kind,
            ring,
            centroid,
        };

        log::debug!(
            "Created {} '{}' with {} points",
            zone.id,
            zone.name,
            zone.ring.len()
        );

        self.zones.push(zone.clone());
        self.notify_collection();

        Ok(zone)
    }

    /// Like [`Self::create_zone`], keyed by the provider's handle for the
    /// completed shape.
    ///
    /// A completed rectangle may arrive as any ring whose extremes span it;
    /// it is stored as its south-west, north-west, north-east, south-east
    /// corners.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateCompletion`] if this handle was
    /// registered before (even if its zone has since been removed), or
    /// [`RegistryError::InvalidRing`] for a bad ring.
    pub fn create_zone_from_drawing(
        &mut self,
        handle: DrawingHandle,
        ring: Vec<LatLng>,
        kind: ZoneKind,
        name: Option<String>,
    ) -> Result<Zone, RegistryError> {
        if self.seen_handles.contains(&handle) {
            log::debug!("Ignoring repeated completion for {handle}");
            return Err(RegistryError::DuplicateCompletion { handle });
        }

        validate_ring(&ring)?;
        let ring = match kind {
            ZoneKind::Rectangle => rectangle_from_ring(&ring).map_or(ring, Vec::from),
            ZoneKind::Polygon | ZoneKind::Region => ring,
        };
        let zone = self.create_zone(ring, kind, name)?;
        self.seen_handles.insert(handle);
        self.handle_to_id.insert(handle, zone.id.clone());

        Ok(zone)
    }

    /// Routes later edits and clicks on `handle` to `id`.
    ///
    /// Used for outlines the provider drew on request (manual entry and
    /// search results) rather than from a completed drawing. The handle
    /// also counts as seen, so a stray completion for it is a duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if `id` does not exist.
    pub fn bind_handle(&mut self, handle: DrawingHandle, id: &ZoneId) -> Result<(), RegistryError> {
        if self.get(id).is_none() {
            return Err(RegistryError::NotFound { id: id.clone() });
        }

        log::debug!("Bound {handle} to {id}");
        self.seen_handles.insert(handle);
        self.handle_to_id.insert(handle, id.clone());

        Ok(())
    }

    /// Makes `id` the selected zone.
    ///
    /// Emits [`RegistryEvent::SelectionChanged`] with the zone's current
    /// ring and a freshly computed centroid, unless the previous selection
    /// notification carried exactly the same content.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if `id` does not exist; the
    /// selection is left unchanged.
    pub fn select_zone(&mut self, id: &ZoneId) -> Result<(), RegistryError> {
        let zone = self
            .zones
            .iter_mut()
            .find(|z| &z.id == id)
            .ok_or_else(|| RegistryError::NotFound { id: id.clone() })?;

        if let Some(fresh) = centroid(&zone.ring) {
            zone.centroid = fresh;
        }
        let zone = zone.clone();

        self.selected = Some(zone.id.clone());
        self.notify_selection(Some(zone));

        Ok(())
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.notify_selection(None);
        }
    }

    /// Renames a zone. The new name is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for an unknown `id`, or
    /// [`RegistryError::EmptyName`] if the trimmed name is blank (the old
    /// name is kept).
    pub fn rename_zone(&mut self, id: &ZoneId, new_name: &str) -> Result<(), RegistryError> {
        let trimmed = new_name.trim();
        let is_selected = self.selected.as_ref() == Some(id);
        let zone = self
            .zones
            .iter_mut()
            .find(|z| &z.id == id)
            .ok_or_else(|| RegistryError::NotFound { id: id.clone() })?;

        if trimmed.is_empty() {
            return Err(RegistryError::EmptyName);
        }

        log::debug!("Renamed {} '{}' -> '{trimmed}'", zone.id, zone.name);
        trimmed.clone_into(&mut zone.name);
        let zone = zone.clone();

        self.notify_collection();
        if is_selected {
            self.notify_selection(Some(zone));
        }

        Ok(())
    }

    /// Removes a zone. If it was selected, the selection is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if `id` does not exist.
    pub fn remove_zone(&mut self, id: &ZoneId) -> Result<(), RegistryError> {
        let index = self
            .zones
            .iter()
            .position(|z| &z.id == id)
            .ok_or_else(|| RegistryError::NotFound { id: id.clone() })?;

        let removed = self.zones.remove(index);
        self.handle_to_id.retain(|_, zone_id| zone_id != id);
        log::debug!("Removed {} '{}'", removed.id, removed.name);

        if self.selected.as_ref() == Some(id) {
            self.selected = None;
            self.notify_selection(None);
        }
        self.notify_collection();

        Ok(())
    }

    /// Removes every zone and clears the selection.
    ///
    /// The identifier counter keeps counting.
    pub fn clear_all(&mut self) {
        log::debug!("Clearing {} zones", self.zones.len());

        self.zones.clear();
        self.handle_to_id.clear();
        if self.selected.take().is_some() {
            self.notify_selection(None);
        }
        self.notify_collection();
    }

    /// Replaces a zone's ring after a live edit and recomputes its
    /// centroid. The ring is stored exactly as the provider reports it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for an unknown `id`, or
    /// [`RegistryError::InvalidRing`] if the new ring is rejected; the
    /// stored ring is unchanged in both cases.
    pub fn update_ring(&mut self, id: &ZoneId, new_ring: Vec<LatLng>) -> Result<(), RegistryError> {
        let is_selected = self.selected.as_ref() == Some(id);
        let zone = self
            .zones
            .iter_mut()
            .find(|z| &z.id == id)
            .ok_or_else(|| RegistryError::NotFound { id: id.clone() })?;

        validate_ring(&new_ring)?;
        let fresh = centroid(&new_ring).ok_or(RingError::TooFewPoints { count: 0 })?;

        zone.ring = new_ring;
        zone.centroid = fresh;
        let zone = zone.clone();

        log::debug!("Updated ring of {} ({} points)", zone.id, zone.ring.len());

        self.notify_collection();
        if is_selected {
            self.notify_selection(Some(zone));
        }

        Ok(())
    }

    fn notify_collection(&self) {
        self.emit(&RegistryEvent::CollectionChanged(self.zones.clone()));
    }

    fn notify_selection(&mut self, zone: Option<Zone>) {
        if self.last_selection.as_ref() == Some(&zone) {
            return;
        }
        self.last_selection = Some(zone.clone());
        self.emit(&RegistryEvent::SelectionChanged(zone));
    }

    fn emit(&self, event: &RegistryEvent) {
        for listener in &self.listeners {
            listener.on_event(event);
        }
    }
}
