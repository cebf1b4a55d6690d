#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Suitability and risk analysis results for a zone.
//!
//! These mirror the JSON an analysis backend returns per zone
//! (`snake_case` keys). The report renders them as-is; nothing in the
//! workspace computes them. [`AnalysisResult::placeholder`] supplies the
//! fixed values the map panel displays while no backend is connected.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Qualitative risk band.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "PascalCase")]
#[strum(ascii_case_insensitive)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    /// Used for seasonality, where a pronounced pattern is the notable case.
    Strong,
}

/// A scored risk with its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    /// 0-100.
    pub score: u8,
    pub label: RiskLevel,
}

impl std::fmt::Display for RiskScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.score, self.label)
    }
}

/// Land-suitability sub-scores, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityComponents {
    pub moisture_quality: f64,
    pub excess_water_quality: f64,
    pub terrain_quality: f64,
    pub temperature_quality: f64,
    pub accessibility_quality: f64,
}

impl SuitabilityComponents {
    /// Label/value pairs in display order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("Moisture Quality", self.moisture_quality),
            ("Excess Water Quality", self.excess_water_quality),
            ("Terrain Quality", self.terrain_quality),
            ("Temperature Quality", self.temperature_quality),
            ("Accessibility Quality", self.accessibility_quality),
        ]
    }
}

/// Overall land suitability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suitability {
    /// 0-100.
    pub score: u8,
    /// FAO land suitability class, e.g. `"S2 - Moderately Suitable"`.
    pub fao_class: String,
    pub components: SuitabilityComponents,
}

/// Risk scores by hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Risks {
    pub flood: RiskScore,
    pub dryness: RiskScore,
    pub shoreline: RiskScore,
    pub seasonality: RiskScore,
}

impl Risks {
    /// Label/score pairs in display order.
    #[must_use]
    pub const fn entries(&self) -> [(&'static str, RiskScore); 4] {
        [
            ("Flood Risk", self.flood),
            ("Dryness Risk", self.dryness),
            ("Shoreline Risk", self.shoreline),
            ("Seasonality Risk", self.seasonality),
        ]
    }
}

/// A titled list of findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryPanel {
    pub title: String,
    pub bullets: Vec<String>,
}

/// Everything known about one zone's analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub suitability: Suitability,
    pub risks: Risks,
    /// Rendered in order.
    pub summary_panels: Vec<SummaryPanel>,
}

const PLACEHOLDER_BULLETS: [&str; 5] = [
    "High Water Levels",
    "Rapid Flow Increase",
    "Soil Saturation",
    "Rainfall Surge",
    "Critical Threshold",
];

const PLACEHOLDER_PANELS: [&str; 4] = ["Flood Risk", "Water Snapshot", "Risk Breakdown", "Outlook Panel"];

impl AnalysisResult {
    /// The static values shown before a real analysis is available.
    #[must_use]
    pub fn placeholder() -> Self {
        let bullets: Vec<String> = PLACEHOLDER_BULLETS.iter().map(|b| (*b).to_owned()).collect();

        Self {
            suitability: Suitability {
                score: 72,
                fao_class: "S2 - Moderately Suitable".to_owned(),
                components: SuitabilityComponents {
                    moisture_quality: 0.78,
                    excess_water_quality: 0.64,
                    terrain_quality: 0.85,
                    temperature_quality: 0.81,
                    accessibility_quality: 0.52,
                },
            },
            risks: Risks {
                flood: RiskScore {
                    score: 55,
                    label: RiskLevel::Medium,
                },
                dryness: RiskScore {
                    score: 22,
                    label: RiskLevel::Low,
                },
                shoreline: RiskScore {
                    score: 48,
                    label: RiskLevel::Medium,
                },
                seasonality: RiskScore {
                    score: 81,
                    label: RiskLevel::Strong,
                },
            },
            summary_panels: PLACEHOLDER_PANELS
                .iter()
                .map(|title| SummaryPanel {
                    title: (*title).to_owned(),
                    bullets: bullets.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn placeholder_values() {
        let analysis = AnalysisResult::placeholder();
        assert_eq!(analysis.suitability.score, 72);
        assert_eq!(analysis.risks.flood.label, RiskLevel::Medium);
        assert_eq!(analysis.risks.dryness.label, RiskLevel::Low);
        assert_eq!(analysis.risks.shoreline.label, RiskLevel::Medium);
        assert_eq!(analysis.risks.seasonality.label, RiskLevel::Strong);
        assert_eq!(analysis.summary_panels.len(), 4);
        assert!(
            analysis
                .summary_panels
                .iter()
                .all(|p| p.bullets.len() == 5 && p.bullets[0] == "High Water Levels")
        );
    }

    #[test]
    fn risk_score_display() {
        let risk = RiskScore {
            score: 55,
            label: RiskLevel::Medium,
        };
        assert_eq!(risk.to_string(), "55 - Medium");
    }

    #[test]
    fn risk_level_parses_case_insensitively() {
        assert_eq!(RiskLevel::from_str("strong").unwrap(), RiskLevel::Strong);
        assert!(RiskLevel::from_str("extreme").is_err());
    }

    #[test]
    fn deserializes_backend_json() {
        let json = serde_json::json!({
            "suitability": {
                "score": 64,
                "fao_class": "S3 - Marginally Suitable",
                "components": {
                    "moisture_quality": 0.5,
                    "excess_water_quality": 0.4,
                    "terrain_quality": 0.9,
                    "temperature_quality": 0.7,
                    "accessibility_quality": 0.3
                }
            },
            "risks": {
                "flood": { "score": 80, "label": "High" },
                "dryness": { "score": 10, "label": "Low" },
                "shoreline": { "score": 30, "label": "Low" },
                "seasonality": { "score": 60, "label": "Medium" }
            },
            "summary_panels": [
                { "title": "Outlook", "bullets": ["Dry spell expected"] }
            ]
        });

        let analysis: AnalysisResult = serde_json::from_value(json).unwrap();
        assert_eq!(analysis.suitability.fao_class, "S3 - Marginally Suitable");
        assert_eq!(analysis.risks.flood.label, RiskLevel::High);
        assert_eq!(analysis.suitability.components.entries()[2], ("Terrain Quality", 0.9));
        assert_eq!(analysis.summary_panels[0].bullets, vec!["Dry spell expected"]);
    }
}
