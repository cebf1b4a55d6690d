//! A [`MapProvider`] with no UI.
//!
//! Tracks the state a real widget would display (drawing tool, viewport,
//! zoom, one styled outline per zone) so the CLI and tests can drive a
//! session without a browser. Handles for simulated drawings and for
//! shown zones come from one counter, so they never collide.

use std::collections::BTreeMap;

use zone_map_geometry::Bounds;
use zone_map_zone_models::{DrawingHandle, Zone, ZoneId};

use crate::{DrawingMode, MapProvider, ZoneStyle};

/// Zoom level a fresh map starts at.
pub const DEFAULT_ZOOM: u8 = 8;

/// Deepest zoom level tile servers commonly serve.
pub const MAX_ZOOM: u8 = 21;

/// In-memory map state.
#[derive(Debug, Clone)]
pub struct HeadlessMap {
    drawing: Option<DrawingMode>,
    viewport: Option<Bounds>,
    zoom: u8,
    shapes: BTreeMap<ZoneId, ZoneStyle>,
    handles: BTreeMap<ZoneId, DrawingHandle>,
    last_handle: u64,
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self {
            drawing: None,
            viewport: None,
            zoom: DEFAULT_ZOOM,
            shapes: BTreeMap::new(),
            handles: BTreeMap::new(),
            last_handle: 0,
        }
    }
}

impl HeadlessMap {
    /// Creates a map at [`DEFAULT_ZOOM`] with nothing drawn.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The armed drawing tool, if any.
    #[must_use]
    pub const fn drawing(&self) -> Option<DrawingMode> {
        self.drawing
    }

    /// The last bounds the viewport was fitted to.
    #[must_use]
    pub const fn viewport(&self) -> Option<Bounds> {
        self.viewport
    }

    /// Current zoom level.
    #[must_use]
    pub const fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Current style of the outline for `zone`, if one is drawn.
    #[must_use]
    pub fn style_of(&self, zone: &ZoneId) -> Option<ZoneStyle> {
        self.shapes.get(zone).copied()
    }

    /// Handle of the outline shown for `zone`, if it was shown through
    /// [`MapProvider::show_zone`].
    #[must_use]
    pub fn handle_of(&self, zone: &ZoneId) -> Option<DrawingHandle> {
        self.handles.get(zone).copied()
    }

    /// Allocates a handle for a simulated drawing.
    pub const fn next_handle(&mut self) -> DrawingHandle {
        self.last_handle += 1;
        DrawingHandle(self.last_handle)
    }

    /// Number of outlines currently drawn.
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }
}

impl MapProvider for HeadlessMap {
    fn begin_drawing(&mut self, mode: DrawingMode) {
        log::debug!("Drawing tool armed: {mode:?}");
        self.drawing = Some(mode);
    }

    fn end_drawing(&mut self) {
        if self.drawing.take().is_some() {
            log::debug!("Drawing tool disarmed");
        }
    }

    fn set_viewport(&mut self, bounds: Bounds) {
        log::debug!(
            "Viewport fitted to S {:.4} W {:.4} N {:.4} E {:.4}",
            bounds.south,
            bounds.west,
            bounds.north,
            bounds.east
        );
        self.viewport = Some(bounds);
    }

    fn zoom_in(&mut self) {
        self.zoom = self.zoom.saturating_add(1).min(MAX_ZOOM);
    }

    fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1);
    }

    fn show_zone(&mut self, zone: &Zone) -> DrawingHandle {
        if let Some(handle) = self.handles.get(&zone.id) {
            return *handle;
        }

        let handle = self.next_handle();
        log::debug!("Outline {handle} added for {} ({})", zone.id, zone.name);
        self.shapes.entry(zone.id.clone()).or_insert(ZoneStyle::NORMAL);
        self.handles.insert(zone.id.clone(), handle);

        handle
    }

    fn apply_style(&mut self, zone: &ZoneId, style: ZoneStyle) {
        self.shapes.insert(zone.clone(), style);
    }

    fn remove_shape(&mut self, zone: &ZoneId) {
        self.handles.remove(zone);
        if self.shapes.remove(zone).is_some() {
            log::debug!("Outline removed for {zone}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zone_map_zone_models::{LatLng, ZoneKind};

    fn zone(id: &str) -> Zone {
        Zone {
            id: ZoneId::from(id),
            name: "Test".to_string(),
            kind: ZoneKind::Polygon,
            ring: vec![
                LatLng::new(0.0, 0.0),
                LatLng::new(0.0, 1.0),
                LatLng::new(1.0, 1.0),
            ],
            centroid: LatLng::new(0.5, 0.5),
        }
    }

    #[test]
    fn zoom_is_clamped() {
        let mut map = HeadlessMap::new();
        for _ in 0..40 {
            map.zoom_in();
        }
        assert_eq!(map.zoom(), MAX_ZOOM);
        for _ in 0..40 {
            map.zoom_out();
        }
        assert_eq!(map.zoom(), 0);
    }

    #[test]
    fn drawing_tool_toggles() {
        let mut map = HeadlessMap::new();
        map.begin_drawing(DrawingMode::Rectangle);
        assert_eq!(map.drawing(), Some(DrawingMode::Rectangle));
        map.end_drawing();
        assert_eq!(map.drawing(), None);
    }

    #[test]
    fn show_zone_keeps_existing_style_and_handle() {
        let mut map = HeadlessMap::new();
        let z = zone("zone-1");
        let handle = map.show_zone(&z);
        map.apply_style(&z.id, ZoneStyle::SELECTED);
        assert_eq!(map.show_zone(&z), handle);
        assert_eq!(map.style_of(&z.id), Some(ZoneStyle::SELECTED));
        map.remove_shape(&z.id);
        assert_eq!(map.shape_count(), 0);
        assert!(map.handle_of(&z.id).is_none());
    }

    #[test]
    fn handles_never_collide() {
        let mut map = HeadlessMap::new();
        let drawn = map.next_handle();
        let shown = map.show_zone(&zone("zone-2"));
        let drawn_again = map.next_handle();
        assert_ne!(drawn, shown);
        assert_ne!(shown, drawn_again);
        assert_ne!(drawn, drawn_again);
        assert_eq!(map.handle_of(&ZoneId::from("zone-2")), Some(shown));
    }
}
