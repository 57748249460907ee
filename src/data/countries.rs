//! Country metadata API client
//!
//! Fetches the bulk "all countries" dataset. This is the essential source:
//! any failure here propagates and fails the whole refresh.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use super::RawCountry;

/// Bulk endpoint for the country dataset
const COUNTRIES_BASE_URL: &str = "https://restcountries.com/v3.1/all";

/// Per-request timeout for upstream calls
pub(crate) const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the essential country source
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP request failed (network error or non-success status)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Client for fetching the country dataset
#[derive(Debug, Clone)]
pub struct CountriesClient {
    client: Client,
    base_url: String,
}

impl Default for CountriesClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CountriesClient {
    /// Creates a new client pointed at the default endpoint
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: COUNTRIES_BASE_URL.to_string(),
        }
    }

    /// Creates a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetches the full country list
    ///
    /// # Returns
    /// * `Ok(Vec<RawCountry>)` - Every country record the source knows
    /// * `Err(UpstreamError)` - If the request or parsing fails
    pub async fn fetch_countries(&self) -> Result<Vec<RawCountry>, UpstreamError> {
        let response = self
            .client
            .get(&self.base_url)
            .timeout(UPSTREAM_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        let text = response.text().await?;
        let countries: Vec<RawCountry> = serde_json::from_str(&text)?;
        Ok(countries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_list_parses() {
        let body = r#"[
            {"name": {"common": "India", "official": "Republic of India"},
             "cca2": "IN", "cca3": "IND", "region": "Asia",
             "capital": ["New Delhi"], "timezones": ["UTC+05:30"],
             "area": 3287590.0, "population": 1380004385},
            {"name": {"common": "Tokelau"}}
        ]"#;

        let countries: Vec<RawCountry> = serde_json::from_str(body).expect("parse");

        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0].name.common, "India");
        assert_eq!(countries[0].population, Some(1_380_004_385));
        // Sparse records parse with everything optional absent
        assert_eq!(countries[1].name.common, "Tokelau");
        assert!(countries[1].population.is_none());
    }

    #[test]
    fn test_malformed_body_is_a_parse_error() {
        let result: Result<Vec<RawCountry>, serde_json::Error> =
            serde_json::from_str("{\"not\": \"an array\"}");
        assert!(result.is_err());
    }

    #[test]
    fn test_with_base_url_overrides_endpoint() {
        let client = CountriesClient::with_base_url("http://localhost:1/countries");
        assert_eq!(client.base_url, "http://localhost:1/countries");
    }
}
