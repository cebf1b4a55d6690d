//! TOML project files.
//!
//! A project lists zones the way a user would have produced them on the
//! map (drawn shapes, searched regions) plus the report settings:
//!
//! ```toml
//! title = "Basin Survey"
//! search_context = "Lake Victoria"
//! units = "imperial"
//! map_type = "satellite"
//! select = "zone-2"
//!
//! [date_range]
//! fromYear = "2024"
//! fromMonth = "1"
//! fromDay = "5"
//!
//! [[zones]]
//! kind = "rectangle"
//! points = [[-1.0, 33.0], [-0.5, 33.5]]
//!
//! [[rename]]
//! zone = "zone-1"
//! name = "Shoreline"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use zone_map_analysis_models::AnalysisResult;
use zone_map_geometry::{format_coordinate, normalize_rectangle};
use zone_map_provider::ProviderEvent;
use zone_map_provider::headless::HeadlessMap;
use zone_map_registry::RegistryError;
use zone_map_report::ReportSnapshot;
use zone_map_session::{MapSession, SessionError};
use zone_map_zone_models::{DateRange, LatLng, MapType, Units, ZoneId, ZoneKind};

/// Errors loading or replaying a project.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid project file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Zone {index} ({kind}): {source}")]
    Zone {
        /// 1-based position in `[[zones]]`.
        index: usize,
        kind: ZoneKind,
        source: RegistryError,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// One `[[zones]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneEntry {
    pub kind: ZoneKind,
    #[serde(default)]
    pub name: Option<String>,
    /// `[lat, lng]` pairs. A rectangle may give just two opposite corners.
    pub points: Vec<[f64; 2]>,
}

/// One `[[rename]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RenameEntry {
    pub zone: String,
    pub name: String,
}

/// A project file.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub search_context: String,
    #[serde(default)]
    pub units: Units,
    #[serde(default)]
    pub map_type: MapType,
    #[serde(default)]
    pub date_range: DateRange,
    /// Map center `[lat, lng]`. Defaults to the selected zone's centroid.
    #[serde(default)]
    pub center: Option<[f64; 2]>,
    /// Attach placeholder analysis results to every zone.
    #[serde(default = "default_true")]
    pub placeholder_analysis: bool,
    #[serde(default)]
    pub zones: Vec<ZoneEntry>,
    #[serde(default)]
    pub rename: Vec<RenameEntry>,
    /// Identifier of the zone to select after loading.
    #[serde(default)]
    pub select: Option<String>,
}

const fn default_true() -> bool {
    true
}

impl ProjectConfig {
    /// Reads and parses a project file.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    /// Parses a project from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Toml`] for malformed TOML or unknown enum
    /// values.
    pub fn parse(raw: &str) -> Result<Self, ProjectError> {
        Ok(toml::de::from_str(raw)?)
    }

    /// Replays the project into a fresh session.
    ///
    /// Drawn kinds go through the same completion path the map widget
    /// uses; regions are applied as search results named after the entry
    /// (or the project's search context).
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Zone`] for the first zone the registry
    /// rejects, or [`ProjectError::Registry`] for a rename or selection
    /// naming an unknown zone.
    pub fn build_session(&self) -> Result<MapSession<HeadlessMap>, ProjectError> {
        let mut session = MapSession::new(HeadlessMap::new());

        for (i, entry) in self.zones.iter().enumerate() {
            let zone_error = |source| ProjectError::Zone {
                index: i + 1,
                kind: entry.kind,
                source,
            };

            let ring = entry.ring();
            let zone = match entry.kind {
                ZoneKind::Polygon | ZoneKind::Rectangle => {
                    let handle = session.map_mut().next_handle();
                    session
                        .handle_event(ProviderEvent::ShapeCompleted {
                            handle,
                            ring,
                            kind: entry.kind,
                        })
                        .map_err(zone_error)?
                }
                ZoneKind::Region => {
                    let name = entry.name.as_deref().unwrap_or(if self.search_context.is_empty() {
                        "Region"
                    } else {
                        &self.search_context
                    });
                    session
                        .apply_search_result(name, Some(ring))
                        .map_err(zone_error)?
                }
            };

            if let (Some(zone), Some(name), ZoneKind::Polygon | ZoneKind::Rectangle) =
                (zone, &entry.name, entry.kind)
            {
                session.rename_zone(&zone.id, name)?;
            }
        }

        for rename in &self.rename {
            session.rename_zone(&ZoneId::from(rename.zone.as_str()), &rename.name)?;
        }

        if let Some(id) = &self.select {
            session.select_zone(&ZoneId::from(id.as_str()))?;
        }

        log::info!("Loaded {} zones", session.registry().len());

        Ok(session)
    }

    /// Captures everything the report needs from a replayed session.
    #[must_use]
    pub fn snapshot(&self, session: &MapSession<HeadlessMap>) -> ReportSnapshot {
        let zones = session.registry().zones().to_vec();

        let (center_lat, center_lng) = match self.center {
            Some([lat, lng]) => (format_coordinate(lat), format_coordinate(lng)),
            None => {
                let form = session.form().snapshot();
                (form.latitude().to_owned(), form.longitude().to_owned())
            }
        };

        let analysis_by_zone_id: BTreeMap<ZoneId, AnalysisResult> = if self.placeholder_analysis {
            zones
                .iter()
                .map(|z| (z.id.clone(), AnalysisResult::placeholder()))
                .collect()
        } else {
            BTreeMap::new()
        };

        ReportSnapshot {
            title: self.title.clone(),
            zones,
            search_context: self.search_context.clone(),
            center_lat,
            center_lng,
            date_range: self.date_range.clone(),
            map_type: self.map_type,
            analysis_by_zone_id,
            units: self.units,
        }
    }
}

impl ZoneEntry {
    /// The entry's ring. Two rectangle corners expand to four.
    fn ring(&self) -> Vec<LatLng> {
        let points: Vec<LatLng> = self
            .points
            .iter()
            .map(|[lat, lng]| LatLng::new(*lat, *lng))
            .collect();

        match (self.kind, points.as_slice()) {
            (ZoneKind::Rectangle, [a, b]) => normalize_rectangle(*a, *b).to_vec(),
            _ => points,
        }
    }
}

#[cfg(test)]
mod tests {
    use zone_map_geometry::RingError;

    use super::*;

    const PROJECT: &str = r#"
        title = "Basin Survey"
        search_context = "Lake Victoria"
        units = "imperial"
        map_type = "terrain"
        select = "zone-2"

        [date_range]
        fromYear = "2024"
        fromMonth = "1"
        fromDay = "5"

        [[zones]]
        kind = "rectangle"
        points = [[-1.0, 33.5], [-0.5, 33.0]]

        [[zones]]
        kind = "polygon"
        name = "Delta"
        points = [[0.0, 0.0], [0.0, 3.0], [3.0, 0.0]]

        [[zones]]
        kind = "region"
        points = [[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 2.0]]

        [[rename]]
        zone = "zone-1"
        name = "Shoreline"
    "#;

    #[test]
    fn parses_project() {
        let config = ProjectConfig::parse(PROJECT).unwrap();
        assert_eq!(config.units, Units::Imperial);
        assert_eq!(config.map_type, MapType::Terrain);
        assert_eq!(config.zones.len(), 3);
        assert_eq!(config.date_range.format_from(), "January 5, 2024");
        assert!(config.placeholder_analysis);
    }

    #[test]
    fn replays_zones_in_order() {
        let config = ProjectConfig::parse(PROJECT).unwrap();
        let session = config.build_session().unwrap();
        let zones = session.registry().zones();

        let names: Vec<&str> = zones.iter().map(|z| z.name.as_str()).collect();
        assert_eq!(names, vec!["Shoreline", "Delta", "Lake Victoria"]);
        assert_eq!(zones[0].kind, ZoneKind::Rectangle);
        assert_eq!(zones[0].ring[0], LatLng::new(-1.0, 33.0));
        assert_eq!(zones[2].kind, ZoneKind::Region);
        assert_eq!(
            session.registry().selected_id(),
            Some(&ZoneId::from("zone-2"))
        );
    }

    #[test]
    fn snapshot_uses_selected_centroid() {
        let config = ProjectConfig::parse(PROJECT).unwrap();
        let session = config.build_session().unwrap();
        let snapshot = config.snapshot(&session);

        assert_eq!(snapshot.center_lat, "1.000000");
        assert_eq!(snapshot.center_lng, "1.000000");
        assert_eq!(snapshot.analysis_by_zone_id.len(), 3);
        assert_eq!(snapshot.units, Units::Imperial);
    }

    #[test]
    fn explicit_center_wins() {
        let config = ProjectConfig::parse(
            r#"
            center = [12.5, -3.25]
            placeholder_analysis = false
            "#,
        )
        .unwrap();
        let session = config.build_session().unwrap();
        let snapshot = config.snapshot(&session);
        assert_eq!(snapshot.center_lat, "12.500000");
        assert_eq!(snapshot.center_lng, "-3.250000");
        assert!(snapshot.analysis_by_zone_id.is_empty());
    }

    #[test]
    fn reports_bad_zone_position() {
        let config = ProjectConfig::parse(
            r#"
            [[zones]]
            kind = "polygon"
            points = [[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]]

            [[zones]]
            kind = "polygon"
            points = [[0.0, 0.0], [1.0, 1.0]]
            "#,
        )
        .unwrap();

        let Err(ProjectError::Zone { index, kind, source }) = config.build_session() else {
            panic!("expected zone error");
        };
        assert_eq!(index, 2);
        assert_eq!(kind, ZoneKind::Polygon);
        assert_eq!(
            source,
            RegistryError::InvalidRing(RingError::TooFewPoints { count: 2 })
        );
    }

    #[test]
    fn unknown_rename_target_fails() {
        let config = ProjectConfig::parse(
            r#"
            [[rename]]
            zone = "zone-9"
            name = "Nowhere"
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.build_session(),
            Err(ProjectError::Registry(RegistryError::NotFound { .. }))
        ));
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = ProjectConfig::parse(
            r#"
            [[zones]]
            kind = "circle"
            points = []
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ProjectError::Toml(_)));
    }
}
