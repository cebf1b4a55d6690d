//! Nominatim / OpenStreetMap region search.
//!
//! Nominatim has strict rate limits: **1 request per second** maximum on
//! the public instance. Callers debounce keystrokes before searching, and
//! [`NominatimSearch`] spaces its own requests by the service's
//! `rate_limit_ms`.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use zone_map_geometry::Bounds;
use zone_map_zone_models::LatLng;

use crate::{ProviderError, RegionSearch, service::SearchServiceConfig};

/// Region search backed by a Nominatim endpoint.
#[derive(Debug, Clone)]
pub struct NominatimSearch {
    client: reqwest::Client,
    base_url: String,
    throttle: Throttle,
}

/// Enforces a minimum gap between request starts.
///
/// Clones share the last request time.
#[derive(Debug, Clone)]
pub(crate) struct Throttle {
    min_gap: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl Throttle {
    pub(crate) fn new(min_gap: Duration) -> Self {
        Self {
            min_gap,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Sleeps until `min_gap` has passed since the previous call returned.
    pub(crate) async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.min_gap;
            if ready_at > Instant::now() {
                log::trace!("Throttling Nominatim request until {ready_at:?}");
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }
}

impl NominatimSearch {
    /// Builds a client for the service described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &SearchServiceConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            throttle: Throttle::new(Duration::from_millis(config.rate_limit_ms)),
        })
    }
}

impl RegionSearch for NominatimSearch {
    async fn search_region(&self, text: &str) -> Result<Option<Vec<LatLng>>, ProviderError> {
        self.throttle.wait().await;
        log::debug!("Nominatim search for '{text}'");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("q", text), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            log::warn!("Nominatim rate limit hit for '{text}'");
            return Err(ProviderError::RateLimited);
        }

        let body: serde_json::Value = resp.error_for_status()?.json().await?;
        let bounds = parse_response(&body)?;

        Ok(bounds.map(|b| b.corners().to_vec()))
    }
}

/// Parses the first result's `boundingbox` out of a Nominatim response.
///
/// Nominatim encodes the box as four strings ordered
/// `[south, north, west, east]`.
fn parse_response(body: &serde_json::Value) -> Result<Option<Bounds>, ProviderError> {
    let results = body.as_array().ok_or_else(|| ProviderError::Parse {
        message: "Nominatim response is not an array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Ok(None);
    };

    let raw = first["boundingbox"]
        .as_array()
        .filter(|values| values.len() == 4)
        .ok_or_else(|| ProviderError::Parse {
            message: "Missing boundingbox in Nominatim response".to_string(),
        })?;

    let mut parsed = [0.0_f64; 4];
    for (slot, value) in parsed.iter_mut().zip(raw) {
        *slot = value
            .as_str()
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| ProviderError::Parse {
                message: format!("Invalid boundingbox value in Nominatim response: {value}"),
            })?;
    }

    let [south, north, west, east] = parsed;

    Ok(Some(Bounds {
        south,
        west,
        north,
        east,
    }))
}
