#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The map provider capability.
//!
//! The zone core never renders a map or runs a geocoder itself. It talks
//! to two capabilities:
//!
//! - [`MapProvider`]: the interactive map widget (drawing mode, viewport,
//!   zoom, per-shape styling). Completed and edited shapes come back as
//!   [`ProviderEvent`]s carrying plain coordinates, never widget objects.
//! - [`RegionSearch`]: resolves a free-text location to a bounding ring.
//!   [`nominatim::NominatimSearch`] is the bundled implementation.
//!
//! [`headless::HeadlessMap`] implements [`MapProvider`] without any UI for
//! the CLI and tests.

pub mod headless;
pub mod nominatim;
pub mod service;

use thiserror::Error;
use zone_map_geometry::Bounds;
use zone_map_zone_models::{DrawingHandle, LatLng, Zone, ZoneId, ZoneKind};

/// Errors from provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,
}

/// Which shape the user is about to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingMode {
    /// Click vertices to draw a freehand polygon.
    Polygon,
    /// Drag out an axis-aligned rectangle.
    Rectangle,
}

impl DrawingMode {
    /// The zone kind a completed shape in this mode becomes.
    #[must_use]
    pub const fn zone_kind(self) -> ZoneKind {
        match self {
            Self::Polygon => ZoneKind::Polygon,
            Self::Rectangle => ZoneKind::Rectangle,
        }
    }
}

/// A discrete completion reported by the map widget.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderEvent {
    /// The user finished drawing a shape.
    ShapeCompleted {
        /// The widget's handle for the new shape.
        handle: DrawingHandle,
        /// Ring in drawing order. For rectangles, any ring whose extremes
        /// span the rectangle.
        ring: Vec<LatLng>,
        /// What was drawn.
        kind: ZoneKind,
    },
    /// The user dragged a vertex of an existing shape.
    ShapeEdited {
        /// The widget's handle for the edited shape.
        handle: DrawingHandle,
        /// Full ring after the edit.
        ring: Vec<LatLng>,
    },
    /// The user clicked a shape.
    ShapeClicked {
        /// The widget's handle for the clicked shape.
        handle: DrawingHandle,
    },
}

/// Stroke and fill the widget should use for a zone outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneStyle {
    /// Stroke color as `#RRGGBB`.
    pub stroke_color: &'static str,
    /// Stroke width in pixels.
    pub stroke_weight: u8,
    /// Fill color as `#RRGGBB`.
    pub fill_color: &'static str,
    /// Fill opacity in `[0, 1]`.
    pub fill_opacity: f32,
}

impl ZoneStyle {
    /// Highlighted outline for the selected zone.
    pub const SELECTED: Self = Self {
        stroke_color: "#0000FF",
        stroke_weight: 3,
        fill_color: "#0000FF",
        fill_opacity: 0.4,
    };

    /// Outline for every other zone.
    pub const NORMAL: Self = Self {
        stroke_color: "#FF0000",
        stroke_weight: 2,
        fill_color: "#FF0000",
        fill_opacity: 0.35,
    };

    /// Picks the style for a zone given whether it is selected.
    #[must_use]
    pub const fn for_selection(selected: bool) -> Self {
        if selected { Self::SELECTED } else { Self::NORMAL }
    }
}

/// The interactive map widget.
///
/// All methods are fire-and-forget commands. Results flow back through
/// [`ProviderEvent`]s delivered by whoever owns the widget.
pub trait MapProvider {
    /// Arms the drawing tool.
    fn begin_drawing(&mut self, mode: DrawingMode);

    /// Disarms the drawing tool.
    fn end_drawing(&mut self);

    /// Moves the viewport so `bounds` is fully visible.
    fn set_viewport(&mut self, bounds: Bounds);

    /// Zooms in one level.
    fn zoom_in(&mut self);

    /// Zooms out one level.
    fn zoom_out(&mut self);

    /// Draws an outline for a zone the widget did not draw itself (search
    /// results and manually entered coordinates).
    ///
    /// Returns the handle later [`ProviderEvent::ShapeEdited`] and
    /// [`ProviderEvent::ShapeClicked`] events for this outline will carry.
    /// Showing a zone that already has an outline returns its existing
    /// handle.
    fn show_zone(&mut self, zone: &Zone) -> DrawingHandle;

    /// Styles the outline drawn for `zone`.
    fn apply_style(&mut self, zone: &ZoneId, style: ZoneStyle);

    /// Removes the outline drawn for `zone`, if any.
    fn remove_shape(&mut self, zone: &ZoneId);
}

/// Resolves free text to a region.
pub trait RegionSearch: Send + Sync {
    /// Looks up `text` and returns the first result's bounding ring,
    /// ordered south-west, north-west, north-east, south-east.
    ///
    /// Returns `Ok(None)` when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the lookup fails.
    fn search_region(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<LatLng>>, ProviderError>> + Send;
}
