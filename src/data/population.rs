//! Population statistics API client
//!
//! Fetches population-by-country histories. This is the enrichment source:
//! it never propagates failure. Any error is logged and degraded to an empty
//! list, leaving every country on its per-record fallback.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::countries::UPSTREAM_TIMEOUT;
use super::PopulationRecord;

/// Endpoint for population-by-country data
const POPULATION_BASE_URL: &str = "https://countriesnow.space/api/v0.1/countries/population";

/// Errors from the population source, swallowed at the client boundary
#[derive(Debug, Error)]
enum PopulationError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Envelope the population source wraps its payload in
#[derive(Debug, Deserialize)]
struct PopulationResponse {
    #[serde(default)]
    data: Vec<PopulationRecord>,
}

/// Client for fetching population histories
#[derive(Debug, Clone)]
pub struct PopulationClient {
    client: Client,
    base_url: String,
}

impl Default for PopulationClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PopulationClient {
    /// Creates a new client pointed at the default endpoint
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: POPULATION_BASE_URL.to_string(),
        }
    }

    /// Creates a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetches population histories for all countries
    ///
    /// Never fails: on any request or parse error this logs a warning and
    /// returns an empty list, so the merge falls back to each country's own
    /// population field.
    pub async fn fetch_populations(&self) -> Vec<PopulationRecord> {
        match self.fetch_from_api().await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "population source unavailable, continuing without enrichment"
                );
                Vec::new()
            }
        }
    }

    /// Fetches and unwraps the envelope; errors propagate to the caller above
    async fn fetch_from_api(&self) -> Result<Vec<PopulationRecord>, PopulationError> {
        let response = self
            .client
            .get(&self.base_url)
            .timeout(UPSTREAM_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        let text = response.text().await?;
        let envelope: PopulationResponse = serde_json::from_str(&text)?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_parses() {
        let body = r#"{
            "error": false,
            "msg": "all countries and population data retrieved",
            "data": [
                {"country": "India", "code": "IN",
                 "populationCounts": [{"year": 2020, "value": 500}]}
            ]
        }"#;

        let envelope: PopulationResponse = serde_json::from_str(body).expect("parse");

        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].country, "India");
    }

    #[test]
    fn test_missing_data_field_parses_empty() {
        let envelope: PopulationResponse =
            serde_json::from_str(r#"{"error": true, "msg": "oops"}"#).expect("parse");
        assert!(envelope.data.is_empty());
    }
}
