//! Compile-time search service configuration.
//!
//! The region search service is defined in a TOML file under `services/`
//! and embedded at compile time.

use serde::Deserialize;

/// A region search service configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchServiceConfig {
    /// Unique identifier (e.g., `"nominatim"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Search endpoint URL.
    pub base_url: String,
    /// `User-Agent` header sent with every request. Public Nominatim
    /// rejects requests without one.
    pub user_agent: String,
    /// Minimum delay between requests in milliseconds.
    pub rate_limit_ms: u64,
    /// Quiet period after the last keystroke before a search is issued.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

const fn default_debounce_ms() -> u64 {
    500
}

const NOMINATIM_TOML: &str = include_str!("../services/nominatim.toml");

/// Returns the bundled Nominatim configuration.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (this is a compile-time
/// guarantee since the config is embedded).
#[must_use]
pub fn nominatim() -> SearchServiceConfig {
    toml::de::from_str(NOMINATIM_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse search service 'nominatim': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_nominatim() {
        let svc = nominatim();
        assert_eq!(svc.id, "nominatim");
        assert!(!svc.name.is_empty());
        assert!(svc.base_url.starts_with("https://"));
        assert!(!svc.user_agent.is_empty());
    }

    #[test]
    fn honors_public_rate_limit() {
        assert!(nominatim().rate_limit_ms >= 1000);
    }

    #[test]
    fn debounce_defaults_when_missing() {
        let svc: SearchServiceConfig = toml::de::from_str(
            r#"
            id = "local"
            name = "Local"
            base_url = "http://localhost:8080/search"
            user_agent = "test"
            rate_limit_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(svc.debounce_ms, 500);
    }
}
