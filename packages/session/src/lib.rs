#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! A map editing session.
//!
//! [`MapSession`] owns one [`ZoneRegistry`], the [`SharedForm`] subscribed
//! to it, and the [`MapProvider`] the user draws on. Provider callbacks
//! come in through [`MapSession::handle_event`]; user commands (select,
//! rename, remove, manual entry, search) go through the session so the
//! map outlines and viewport follow the registry.

pub mod debounce;

use zone_map_form::SharedForm;
use zone_map_geometry::bounds;
use zone_map_provider::service::SearchServiceConfig;
use zone_map_provider::{
    DrawingMode, MapProvider, ProviderError, ProviderEvent, RegionSearch, ZoneStyle,
};
use zone_map_registry::{RegistryError, ZoneRegistry};
use zone_map_zone_models::{LatLng, Zone, ZoneId, ZoneKind};

pub use debounce::{SearchDebouncer, SearchOutcome, SearchTicket};

/// Errors from session commands.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The registry rejected the change.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The region lookup failed. No zone was created.
    #[error("Region search failed: {0}")]
    Provider(#[from] ProviderError),
}

/// Registry, form, and map kept in step.
#[derive(Debug)]
pub struct MapSession<M: MapProvider> {
    registry: ZoneRegistry,
    form: SharedForm,
    map: M,
    debouncer: SearchDebouncer,
}

impl<M: MapProvider> MapSession<M> {
    /// Starts an empty session on `map` with the default search debounce.
    #[must_use]
    pub fn new(map: M) -> Self {
        Self::with_debouncer(map, SearchDebouncer::default())
    }

    /// Starts an empty session on `map`, debouncing searches by the quiet
    /// period `config` asks for.
    #[must_use]
    pub fn for_service(map: M, config: &SearchServiceConfig) -> Self {
        Self::with_debouncer(map, SearchDebouncer::for_service(config))
    }

    /// Starts an empty session on `map` using `debouncer` for searches.
    #[must_use]
    pub fn with_debouncer(map: M, debouncer: SearchDebouncer) -> Self {
        let form = SharedForm::new();
        let mut registry = ZoneRegistry::new();
        registry.subscribe(std::sync::Arc::new(form.clone()));

        Self {
            registry,
            form,
            map,
            debouncer,
        }
    }

    /// The zones and selection.
    #[must_use]
    pub const fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }

    /// The coordinate form mirroring the selected zone.
    #[must_use]
    pub const fn form(&self) -> &SharedForm {
        &self.form
    }

    /// The map widget.
    #[must_use]
    pub const fn map(&self) -> &M {
        &self.map
    }

    /// The map widget, mutably. Changes made here bypass the registry.
    pub const fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    /// A handle to the session's debouncer for concurrent search tasks.
    #[must_use]
    pub fn debouncer(&self) -> SearchDebouncer {
        self.debouncer.clone()
    }

    /// Applies a callback from the map widget.
    ///
    /// Completions create a zone and disarm the drawing tool. A repeated
    /// completion for a known handle is ignored. Edits and clicks on a
    /// shape whose zone was already removed are ignored as well.
    ///
    /// Returns the zone that was created or changed, if any.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidRing`] if a completed or edited
    /// ring is invalid; the registry is unchanged.
    pub fn handle_event(&mut self, event: ProviderEvent) -> Result<Option<Zone>, RegistryError> {
        match event {
            ProviderEvent::ShapeCompleted { handle, ring, kind } => {
                self.map.end_drawing();
                match self
                    .registry
                    .create_zone_from_drawing(handle, ring, kind, None)
                {
                    Ok(zone) => {
                        self.refresh_styles();
                        Ok(Some(zone))
                    }
                    Err(RegistryError::DuplicateCompletion { .. }) => Ok(None),
                    Err(e) => Err(e),
                }
            }
            ProviderEvent::ShapeEdited { handle, ring } => {
                let Some(id) = self.registry.zone_id_for_handle(handle).cloned() else {
                    log::debug!("Edit for {handle} has no zone, ignoring");
                    return Ok(None);
                };
                self.registry.update_ring(&id, ring)?;
                Ok(self.registry.get(&id).cloned())
            }
            ProviderEvent::ShapeClicked { handle } => {
                let Some(id) = self.registry.zone_id_for_handle(handle).cloned() else {
                    log::debug!("Click on {handle} has no zone, ignoring");
                    return Ok(None);
                };
                self.select_zone(&id)?;
                Ok(self.registry.get(&id).cloned())
            }
        }
    }

    /// Selects `id`, highlights its outline, and fits the viewport to it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for an unknown zone.
    pub fn select_zone(&mut self, id: &ZoneId) -> Result<(), RegistryError> {
        self.registry.select_zone(id)?;
        self.refresh_styles();
        self.fit_bounds(id)
    }

    /// Clears the selection and resets every outline to the normal style.
    pub fn clear_selection(&mut self) {
        self.registry.clear_selection();
        self.refresh_styles();
    }

    /// Renames a zone.
    ///
    /// # Errors
    ///
    /// See [`ZoneRegistry::rename_zone`].
    pub fn rename_zone(&mut self, id: &ZoneId, name: &str) -> Result<(), RegistryError> {
        self.registry.rename_zone(id, name)
    }

    /// Removes a zone and its outline.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for an unknown zone.
    pub fn remove_zone(&mut self, id: &ZoneId) -> Result<(), RegistryError> {
        self.registry.remove_zone(id)?;
        self.map.remove_shape(id);
        self.refresh_styles();
        Ok(())
    }

    /// Removes every zone and outline.
    pub fn clear_all(&mut self) {
        let ids: Vec<ZoneId> = self.registry.zones().iter().map(|z| z.id.clone()).collect();
        self.registry.clear_all();
        for id in &ids {
            self.map.remove_shape(id);
        }
    }

    /// Creates a zone from the form's coordinate rows.
    ///
    /// Returns `Ok(None)` without touching anything when fewer than three
    /// rows are valid. On success the rows are reset and the new outline
    /// is drawn and brought into view.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidRing`] if the registry rejects the
    /// ring; the rows are kept for correction.
    pub fn submit_manual_polygon(&mut self) -> Result<Option<Zone>, RegistryError> {
        let Some(request) = self.form.lock().submit_manual_polygon() else {
            return Ok(None);
        };

        let zone = self
            .registry
            .create_zone(request.ring, request.kind, Some(request.name))?;
        self.form.lock().reset_rows();
        self.show_new_zone(&zone)?;

        Ok(Some(zone))
    }

    /// Turns a resolved search into a region zone named after `text`
    /// verbatim.
    ///
    /// `None` (nothing matched) creates nothing.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidRing`] if the provider returned an
    /// unusable ring.
    pub fn apply_search_result(
        &mut self,
        text: &str,
        ring: Option<Vec<LatLng>>,
    ) -> Result<Option<Zone>, RegistryError> {
        let Some(ring) = ring else {
            log::warn!("No region found for '{text}'");
            return Ok(None);
        };

        let zone = self
            .registry
            .create_zone(ring, ZoneKind::Region, Some(text.to_owned()))?;
        self.show_new_zone(&zone)?;

        Ok(Some(zone))
    }

    /// Looks up `text` immediately and applies the result.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Provider`] if the lookup fails, or
    /// [`SessionError::Registry`] if the returned ring is rejected. The
    /// session is unchanged in both cases.
    pub async fn search<S: RegionSearch>(
        &mut self,
        search: &S,
        text: &str,
    ) -> Result<Option<Zone>, SessionError> {
        let ring = search.search_region(text).await?;
        Ok(self.apply_search_result(text, ring)?)
    }

    /// Like [`Self::search`], but waits out the debounce first and drops
    /// the request if a newer one was made through [`Self::debouncer`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::search`].
    pub async fn debounced_search<S: RegionSearch>(
        &mut self,
        search: &S,
        text: &str,
    ) -> Result<Option<Zone>, SessionError> {
        match self.debouncer.debounced_search(search, text).await? {
            SearchOutcome::Superseded => Ok(None),
            SearchOutcome::Resolved(ring) => Ok(self.apply_search_result(text, ring)?),
        }
    }

    /// Arms the map's drawing tool.
    pub fn begin_drawing(&mut self, mode: DrawingMode) {
        self.map.begin_drawing(mode);
    }

    /// Disarms the map's drawing tool.
    pub fn end_drawing(&mut self) {
        self.map.end_drawing();
    }

    /// Zooms the map in one level.
    pub fn zoom_in(&mut self) {
        self.map.zoom_in();
    }

    /// Zooms the map out one level.
    pub fn zoom_out(&mut self) {
        self.map.zoom_out();
    }

    /// Moves the viewport so the whole zone is visible.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for an unknown zone.
    pub fn fit_bounds(&mut self, id: &ZoneId) -> Result<(), RegistryError> {
        let zone = self
            .registry
            .get(id)
            .ok_or_else(|| RegistryError::NotFound { id: id.clone() })?;

        if let Some(b) = bounds(&zone.ring) {
            self.map.set_viewport(b);
        }

        Ok(())
    }

    fn show_new_zone(&mut self, zone: &Zone) -> Result<(), RegistryError> {
        let handle = self.map.show_zone(zone);
        self.registry.bind_handle(handle, &zone.id)?;
        self.refresh_styles();
        self.fit_bounds(&zone.id)
    }

    fn refresh_styles(&mut self) {
        let selected = self.registry.selected_id();
        for zone in self.registry.zones() {
            let style = ZoneStyle::for_selection(selected == Some(&zone.id));
            self.map.apply_style(&zone.id, style);
        }
    }
}
