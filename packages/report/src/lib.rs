#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! PDF report export.
//!
//! The exporter consumes an immutable [`ReportSnapshot`] and never reaches
//! back into the registry. Rendering happens in two steps: [`layout`]
//! paginates the snapshot into positioned text, lines, and filled boxes,
//! and [`pdf`] draws those pages with `printpdf`.

pub mod layout;
pub mod pdf;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use zone_map_analysis_models::AnalysisResult;
use zone_map_zone_models::{DateRange, MapType, Units, Zone, ZoneId};

/// Errors from report generation.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The PDF document could not be built or serialized.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Writing the report file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything the report needs, captured at export time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    /// Project title. A blank title renders as `"Project Report"`.
    pub title: String,
    /// Zones in registry order.
    pub zones: Vec<Zone>,
    /// Free-text location the user searched for, if any.
    pub search_context: String,
    /// Map center latitude as displayed in the form.
    pub center_lat: String,
    /// Map center longitude as displayed in the form.
    pub center_lng: String,
    pub date_range: DateRange,
    pub map_type: MapType,
    /// Analysis per zone. Zones without an entry get no analysis section.
    pub analysis_by_zone_id: BTreeMap<ZoneId, AnalysisResult>,
    pub units: Units,
}

impl ReportSnapshot {
    /// The title to print, falling back to `"Project Report"`.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Project Report"
        } else {
            &self.title
        }
    }
}

/// File name for a report generated on `date`: the title with every
/// non-alphanumeric character replaced by `_`, then `_YYYYMMDD.pdf`.
#[must_use]
pub fn report_filename(title: &str, date: NaiveDate) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    format!("{stem}_{}.pdf", date.format("%Y%m%d"))
}

/// Lays out and renders `snapshot` as PDF bytes.
///
/// # Errors
///
/// Returns [`ReportError::Pdf`] if the document cannot be serialized.
pub fn render_report(
    snapshot: &ReportSnapshot,
    generated: DateTime<Local>,
) -> Result<Vec<u8>, ReportError> {
    let pages = layout::layout(snapshot, &generated.format("%Y-%m-%d %H:%M:%S").to_string());
    pdf::render(&pages, snapshot.display_title())
}

/// Renders `snapshot` into `dir` and returns the path written.
///
/// # Errors
///
/// Returns [`ReportError`] if rendering or writing the file fails.
pub fn write_report(snapshot: &ReportSnapshot, dir: &Path) -> Result<PathBuf, ReportError> {
    let now = Local::now();
    let bytes = render_report(snapshot, now)?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(report_filename(&snapshot.title, now.date_naive()));
    std::fs::write(&path, bytes)?;

    log::info!(
        "Wrote report for {} zones to {}",
        snapshot.zones.len(),
        path.display()
    );

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_replaces_punctuation() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            report_filename("Lake Basin: Phase 2", date),
            "Lake_Basin__Phase_2_20240309.pdf"
        );
    }

    #[test]
    fn filename_replaces_non_ascii() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(report_filename("Zoné", date), "Zon__20251231.pdf");
    }

    #[test]
    fn blank_title_falls_back() {
        let snapshot = ReportSnapshot {
            title: "  ".to_owned(),
            ..ReportSnapshot::default()
        };
        assert_eq!(snapshot.display_title(), "Project Report");
    }
}
