//! Traffic condition adapters.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::model::TrafficCondition;
use crate::traits::TrafficProvider;

/// HTTP traffic service configuration.
#[derive(Debug, Clone)]
pub struct TrafficConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Condition reported when the service is unreachable or returns an
    /// unparseable label.
    pub fallback: TrafficCondition,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8100".to_string(),
            timeout_secs: 5,
            fallback: TrafficCondition::Moderate,
        }
    }
}

/// Blocking HTTP client for a traffic conditions endpoint.
///
/// Never fails the dispatch pipeline: any transport or parse problem is
/// folded into the configured fallback condition.
#[derive(Debug, Clone)]
pub struct HttpTrafficClient {
    config: TrafficConfig,
    client: reqwest::blocking::Client,
}

impl HttpTrafficClient {
    pub fn new(config: TrafficConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl TrafficProvider for HttpTrafficClient {
    fn condition(&self, from: (f64, f64), to: (f64, f64), at: DateTime<Utc>) -> TrafficCondition {
        let url = format!(
            "{}/conditions?from={:.6},{:.6}&to={:.6},{:.6}&at={}",
            self.config.base_url,
            from.0,
            from.1,
            to.0,
            to.1,
            at.to_rfc3339()
        );

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<TrafficResponse>());

        match response {
            Ok(body) => body
                .condition
                .as_deref()
                .and_then(TrafficCondition::from_label)
                .unwrap_or(self.config.fallback),
            Err(err) => {
                debug!("traffic lookup failed, using fallback: {err}");
                self.config.fallback
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct TrafficResponse {
    condition: Option<String>,
}

/// Fixed-condition provider for tests and offline deployments.
#[derive(Debug, Clone, Copy)]
pub struct FixedTraffic(pub TrafficCondition);

impl TrafficProvider for FixedTraffic {
    fn condition(&self, _from: (f64, f64), _to: (f64, f64), _at: DateTime<Utc>) -> TrafficCondition {
        self.0
    }
}
