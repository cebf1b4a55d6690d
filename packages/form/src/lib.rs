#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Form synchronization bridge.
//!
//! Two pieces of form state follow the registry's selection:
//!
//! - the read-only latitude/longitude display fields, which show the
//!   selected zone's centroid, and
//! - the editable coordinate rows used to type in a brand new zone, which
//!   are prefilled with the selected zone's ring.
//!
//! The rows are a scratch area for constructing a zone; editing them never
//! touches the selected zone. [`FormBridge::submit_manual_polygon`] turns
//! the valid rows into a create request for the registry.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use zone_map_geometry::{format_coordinate, is_valid_latitude, is_valid_longitude};
use zone_map_registry::{RegistryEvent, RegistryListener};
use zone_map_zone_models::{LatLng, MIN_RING_POINTS, Zone, ZoneKind};

/// One editable coordinate row. Both fields hold raw user text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinateRow {
    /// Latitude text.
    pub latitude: String,
    /// Longitude text.
    pub longitude: String,
}

impl CoordinateRow {
    /// Creates a row from raw text.
    #[must_use]
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// Parses the row into a point.
    ///
    /// Returns `None` if either field is blank, fails to parse, or is out
    /// of range.
    #[must_use]
    pub fn parse(&self) -> Option<LatLng> {
        let lat = self.latitude.trim();
        let lng = self.longitude.trim();
        if lat.is_empty() || lng.is_empty() {
            return None;
        }

        let lat = lat.parse::<f64>().ok().filter(|v| is_valid_latitude(*v))?;
        let lng = lng.parse::<f64>().ok().filter(|v| is_valid_longitude(*v))?;

        Some(LatLng::new(lat, lng))
    }

    fn from_point(point: LatLng) -> Self {
        Self::new(format_coordinate(point.lat), format_coordinate(point.lng))
    }
}

/// A validated request to create a zone from manually entered rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualPolygon {
    /// Valid points in row order.
    pub ring: Vec<LatLng>,
    /// [`ZoneKind::Rectangle`] for exactly four points, otherwise
    /// [`ZoneKind::Polygon`]. Only a label; the ring is not reshaped.
    pub kind: ZoneKind,
    /// `"Rectangle"` or `"Polygon ({n} points)"`.
    pub name: String,
}

/// Display fields and coordinate rows that mirror the selected zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormBridge {
    latitude: String,
    longitude: String,
    rows: Vec<CoordinateRow>,
}

impl Default for FormBridge {
    fn default() -> Self {
        Self {
            latitude: String::new(),
            longitude: String::new(),
            rows: vec![CoordinateRow::default()],
        }
    }
}

impl FormBridge {
    /// Creates a bridge with empty display fields and one empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latitude display field.
    #[must_use]
    pub fn latitude(&self) -> &str {
        &self.latitude
    }

    /// Longitude display field.
    #[must_use]
    pub fn longitude(&self) -> &str {
        &self.longitude
    }

    /// The editable coordinate rows. Never empty.
    #[must_use]
    pub fn rows(&self) -> &[CoordinateRow] {
        &self.rows
    }

    /// Reflects a selection change.
    ///
    /// With a zone, the display fields show its centroid and the rows are
    /// replaced by its ring, all to six decimals. Without one, the display
    /// fields are cleared and the rows reset to a single empty row.
    pub fn apply_selection(&mut self, zone: Option<&Zone>) {
        if let Some(zone) = zone {
            self.latitude = format_coordinate(zone.centroid.lat);
            self.longitude = format_coordinate(zone.centroid.lng);
            self.rows = zone.ring.iter().copied().map(CoordinateRow::from_point).collect();
            if self.rows.is_empty() {
                self.rows.push(CoordinateRow::default());
            }
        } else {
            self.latitude.clear();
            self.longitude.clear();
            self.reset_rows();
        }
    }

    /// Applies a registry event. Only selection changes affect the form.
    pub fn apply_event(&mut self, event: &RegistryEvent) {
        match event {
            RegistryEvent::SelectionChanged(zone) => self.apply_selection(zone.as_ref()),
            RegistryEvent::CollectionChanged(_) => {}
        }
    }

    /// Appends an empty row.
    pub fn add_row(&mut self) {
        self.rows.push(CoordinateRow::default());
    }

    /// Sets the latitude text of row `index`. Out-of-range indices are
    /// ignored.
    pub fn set_row_latitude(&mut self, index: usize, text: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(index) {
            row.latitude = text.into();
        }
    }

    /// Sets the longitude text of row `index`. Out-of-range indices are
    /// ignored.
    pub fn set_row_longitude(&mut self, index: usize, text: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(index) {
            row.longitude = text.into();
        }
    }

    /// Replaces all rows. An empty list becomes a single empty row.
    pub fn set_rows(&mut self, rows: Vec<CoordinateRow>) {
        self.rows = rows;
        if self.rows.is_empty() {
            self.rows.push(CoordinateRow::default());
        }
    }

    /// Removes row `index`. Does nothing if it is the last remaining row or
    /// the index is out of range.
    pub fn remove_row(&mut self, index: usize) {
        if self.rows.len() > 1 && index < self.rows.len() {
            self.rows.remove(index);
        }
    }

    /// Resets the rows to a single empty row.
    pub fn reset_rows(&mut self) {
        self.rows.clear();
        self.rows.push(CoordinateRow::default());
    }

    /// Points from every row that parses and is in range, in row order.
    #[must_use]
    pub fn valid_points(&self) -> Vec<LatLng> {
        self.rows.iter().filter_map(CoordinateRow::parse).collect()
    }

    /// Whether enough valid rows exist to submit.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.valid_points().len() >= MIN_RING_POINTS
    }

    /// Builds a create request from the valid rows.
    ///
    /// Returns `None` when fewer than three rows are valid; submitting is
    /// disabled in that state. The rows are left untouched either way;
    /// call [`Self::reset_rows`] once the registry accepts the zone.
    #[must_use]
    pub fn submit_manual_polygon(&self) -> Option<ManualPolygon> {
        let ring = self.valid_points();
        if ring.len() < MIN_RING_POINTS {
            log::debug!(
                "Manual polygon has {} valid rows, not submitting",
                ring.len()
            );
            return None;
        }

        let (kind, name) = if ring.len() == 4 {
            (ZoneKind::Rectangle, "Rectangle".to_owned())
        } else {
            (ZoneKind::Polygon, format!("Polygon ({} points)", ring.len()))
        };

        Some(ManualPolygon { ring, kind, name })
    }
}

/// A [`FormBridge`] shared with the registry as a listener.
#[derive(Debug, Clone, Default)]
pub struct SharedForm {
    inner: Arc<Mutex<FormBridge>>,
}

impl SharedForm {
    /// Wraps a fresh bridge.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the bridge for reading or editing rows.
    pub fn lock(&self) -> MutexGuard<'_, FormBridge> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the current form state.
    #[must_use]
    pub fn snapshot(&self) -> FormBridge {
        self.lock().clone()
    }
}

impl RegistryListener for SharedForm {
    fn on_event(&self, event: &RegistryEvent) {
        self.lock().apply_event(event);
    }
}

#[cfg(test)]
mod tests {
    use zone_map_zone_models::ZoneId;

    use super::*;

    fn rows(raw: &[(&str, &str)]) -> Vec<CoordinateRow> {
        raw.iter()
            .map(|(lat, lng)| CoordinateRow::new(*lat, *lng))
            .collect()
    }

    fn zone() -> Zone {
        Zone {
            id: ZoneId::from_sequence(1),
            name: "Polygon 1".to_owned(),
            kind: ZoneKind::Polygon,
            ring: vec![
                LatLng::new(10.0, 20.0),
                LatLng::new(11.0, 21.0),
                LatLng::new(12.0, 22.5),
            ],
            centroid: LatLng::new(11.0, 21.5),
        }
    }

    #[test]
    fn starts_with_one_empty_row() {
        let form = FormBridge::new();
        assert_eq!(form.rows(), &[CoordinateRow::default()]);
        assert_eq!(form.latitude(), "");
        assert!(!form.can_submit());
    }

    #[test]
    fn selection_fills_fields_and_rows() {
        let mut form = FormBridge::new();
        form.apply_selection(Some(&zone()));

        assert_eq!(form.latitude(), "11.000000");
        assert_eq!(form.longitude(), "21.500000");
        assert_eq!(
            form.rows(),
            rows(&[
                ("10.000000", "20.000000"),
                ("11.000000", "21.000000"),
                ("12.000000", "22.500000"),
            ])
            .as_slice()
        );
    }

    #[test]
    fn clearing_selection_resets_form() {
        let mut form = FormBridge::new();
        form.apply_selection(Some(&zone()));
        form.apply_event(&RegistryEvent::SelectionChanged(None));

        assert_eq!(form.latitude(), "");
        assert_eq!(form.longitude(), "");
        assert_eq!(form.rows(), &[CoordinateRow::default()]);
    }

    #[test]
    fn collection_events_are_ignored() {
        let mut form = FormBridge::new();
        form.apply_selection(Some(&zone()));
        let before = form.clone();

        form.apply_event(&RegistryEvent::CollectionChanged(vec![]));
        assert_eq!(form, before);
    }

    #[test]
    fn row_editing() {
        let mut form = FormBridge::new();
        form.set_row_latitude(0, "1.5");
        form.set_row_longitude(0, "2.5");
        form.add_row();
        form.set_row_longitude(1, "3");
        form.set_row_latitude(9, "ignored");

        assert_eq!(form.rows(), rows(&[("1.5", "2.5"), ("", "3")]).as_slice());

        form.remove_row(0);
        assert_eq!(form.rows(), rows(&[("", "3")]).as_slice());

        form.remove_row(0);
        assert_eq!(form.rows().len(), 1, "last row cannot be removed");

        form.add_row();
        form.remove_row(5);
        assert_eq!(form.rows().len(), 2);
    }

    #[test]
    fn partial_row_is_skipped() {
        let mut form = FormBridge::new();
        form.set_rows(rows(&[
            ("10", "20"),
            ("10.5", ""),
            ("11", "21"),
            ("12", "22"),
        ]));

        let request = form.submit_manual_polygon().unwrap();
        assert_eq!(request.kind, ZoneKind::Polygon);
        assert_eq!(request.name, "Polygon (3 points)");
        assert_eq!(
            request.ring,
            vec![
                LatLng::new(10.0, 20.0),
                LatLng::new(11.0, 21.0),
                LatLng::new(12.0, 22.0),
            ]
        );
    }

    #[test]
    fn four_valid_rows_make_a_rectangle() {
        let mut form = FormBridge::new();
        form.set_rows(rows(&[("0", "1"), ("1", "2"), ("2", "1"), ("1", "0")]));

        let request = form.submit_manual_polygon().unwrap();
        assert_eq!(request.kind, ZoneKind::Rectangle);
        assert_eq!(request.name, "Rectangle");
        assert_eq!(
            request.ring,
            vec![
                LatLng::new(0.0, 1.0),
                LatLng::new(1.0, 2.0),
                LatLng::new(2.0, 1.0),
                LatLng::new(1.0, 0.0),
            ]
        );
    }

    #[test]
    fn invalid_rows_are_discarded() {
        let mut form = FormBridge::new();
        form.set_rows(rows(&[
            ("91", "0"),
            ("abc", "1"),
            ("1", "181"),
            (" 1 ", " 2 "),
            ("3", "4"),
        ]));

        assert_eq!(
            form.valid_points(),
            vec![LatLng::new(1.0, 2.0), LatLng::new(3.0, 4.0)]
        );
        assert!(!form.can_submit());
        assert!(form.submit_manual_polygon().is_none());
    }

    #[test]
    fn five_points_make_a_polygon() {
        let mut form = FormBridge::new();
        form.set_rows(rows(&[
            ("0", "0"),
            ("0", "1"),
            ("1", "2"),
            ("2", "1"),
            ("2", "0"),
        ]));

        let request = form.submit_manual_polygon().unwrap();
        assert_eq!(request.kind, ZoneKind::Polygon);
        assert_eq!(request.name, "Polygon (5 points)");
    }

    #[test]
    fn shared_form_follows_registry() {
        let mut registry = zone_map_registry::ZoneRegistry::new();
        let form = SharedForm::new();
        registry.subscribe(Arc::new(form.clone()));

        let z = registry
            .create_zone(zone().ring, ZoneKind::Polygon, None)
            .unwrap();
        assert_eq!(form.snapshot(), FormBridge::new());

        registry.select_zone(&z.id).unwrap();
        assert_eq!(form.lock().latitude(), "11.000000");
        assert_eq!(form.lock().rows().len(), 3);

        registry.remove_zone(&z.id).unwrap();
        assert_eq!(form.snapshot(), FormBridge::new());
    }
}
