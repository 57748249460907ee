//! Core data models for the country aggregation pipeline
//!
//! This module contains the wire shapes of both upstream sources, the merged
//! record served to clients, and the `Upstream` trait the cache refreshes
//! through.

pub mod countries;
pub mod merge;
pub mod population;

pub use countries::{CountriesClient, UpstreamError};
pub use merge::merge;
pub use population::PopulationClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured country name from the country source
///
/// The country source nests several name variants; the `common` display name
/// is the identity key used for population matching and identifier lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    /// Common display name, e.g. "India"
    pub common: String,
    /// Official long-form name, e.g. "Republic of India"
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub official: Option<String>,
    /// Native-language name variants, passed through verbatim
    #[serde(
        rename = "nativeName",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub native_name: Option<Value>,
}

/// A country record as returned by the country source, before merging
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCountry {
    /// Structured name object
    pub name: CountryName,
    /// Two-letter country code
    pub cca2: Option<String>,
    /// Three-letter country code
    pub cca3: Option<String>,
    /// Region, e.g. "Asia"
    pub region: Option<String>,
    /// Capital city names
    pub capital: Option<Vec<String>>,
    /// Timezone labels in source order, e.g. "Asia/Kolkata" or "UTC+05:30"
    pub timezones: Option<Vec<String>>,
    /// Land area in square kilometers
    pub area: Option<f64>,
    /// Flag image links, passed through verbatim
    pub flags: Option<Value>,
    /// Map links, passed through verbatim
    pub maps: Option<Value>,
    /// Currency table, passed through verbatim
    pub currencies: Option<Value>,
    /// The country source's own population figure, used as fallback
    pub population: Option<u64>,
}

/// A single yearly population measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyCount {
    /// Measurement year
    pub year: i32,
    /// Population count for that year
    pub value: u64,
}

/// A country's population history as returned by the population source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PopulationRecord {
    /// Country display name, matched case-insensitively against
    /// [`CountryName::common`]
    pub country: String,
    /// Yearly measurements in source order; only the last (most recent)
    /// value is used
    #[serde(rename = "populationCounts", default)]
    pub population_counts: Vec<YearlyCount>,
}

/// The merged record stored in the cache and served to clients
///
/// All fields except `population` are copied verbatim from the country
/// source. `population` comes preferentially from the population source,
/// falling back to the country source's own figure, else absent.
/// `population` always appears in JSON (`null` when absent); the other
/// optional fields are omitted when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryRecord {
    /// Structured name object; identity key for matching and lookup
    pub name: CountryName,
    /// Two-letter country code; secondary lookup key
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cca2: Option<String>,
    /// Three-letter country code; secondary lookup key
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cca3: Option<String>,
    /// Region, e.g. "Asia"
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub region: Option<String>,
    /// Capital city names
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub capital: Option<Vec<String>>,
    /// Timezone labels in source order
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timezones: Option<Vec<String>>,
    /// Land area in square kilometers
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub area: Option<f64>,
    /// Flag image links
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub flags: Option<Value>,
    /// Map links
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub maps: Option<Value>,
    /// Currency table
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub currencies: Option<Value>,
    /// Most recent population figure, `null` in JSON when absent
    #[serde(default)]
    pub population: Option<u64>,
}

/// The pair of upstream fetches a cache refresh runs
///
/// Country data is essential: its failure fails the whole refresh.
/// Population data is an enrichment: `fetch_populations` never fails, it
/// degrades to an empty list instead.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Fetches the full country list from the country source.
    async fn fetch_countries(&self) -> Result<Vec<RawCountry>, UpstreamError>;

    /// Fetches population histories, returning an empty list on any failure.
    async fn fetch_populations(&self) -> Vec<PopulationRecord>;
}

/// Production upstream pair backed by the two HTTP clients
#[derive(Debug, Clone, Default)]
pub struct HttpUpstream {
    countries: CountriesClient,
    population: PopulationClient,
}

impl HttpUpstream {
    /// Creates the production upstream pair with default endpoints
    pub fn new() -> Self {
        Self {
            countries: CountriesClient::new(),
            population: PopulationClient::new(),
        }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn fetch_countries(&self) -> Result<Vec<RawCountry>, UpstreamError> {
        self.countries.fetch_countries().await
    }

    async fn fetch_populations(&self) -> Vec<PopulationRecord> {
        self.population.fetch_populations().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(population: Option<u64>) -> CountryRecord {
        CountryRecord {
            name: CountryName {
                common: "India".to_string(),
                official: None,
                native_name: None,
            },
            cca2: Some("IN".to_string()),
            cca3: None,
            region: None,
            capital: None,
            timezones: None,
            area: None,
            flags: None,
            maps: None,
            currencies: None,
            population,
        }
    }

    #[test]
    fn test_population_serializes_as_null_when_absent() {
        let value = serde_json::to_value(record(None)).expect("serialize");

        assert_eq!(value["population"], json!(null));
        assert!(
            value.as_object().unwrap().contains_key("population"),
            "population key must be present even when absent"
        );
    }

    #[test]
    fn test_population_zero_is_preserved_not_nulled() {
        let value = serde_json::to_value(record(Some(0))).expect("serialize");
        assert_eq!(value["population"], json!(0));
    }

    #[test]
    fn test_absent_optional_fields_are_omitted() {
        let value = serde_json::to_value(record(Some(5))).expect("serialize");
        let object = value.as_object().unwrap();

        assert!(object.contains_key("cca2"));
        assert!(!object.contains_key("cca3"));
        assert!(!object.contains_key("timezones"));
        assert!(!object.contains_key("currencies"));
    }

    #[test]
    fn test_raw_country_parses_country_source_shape() {
        let json = json!({
            "name": {
                "common": "Japan",
                "official": "Japan",
                "nativeName": {"jpn": {"common": "日本"}}
            },
            "cca2": "JP",
            "cca3": "JPN",
            "region": "Asia",
            "capital": ["Tokyo"],
            "timezones": ["UTC+09:00"],
            "area": 377930.0,
            "flags": {"png": "https://example.test/jp.png"},
            "maps": {"googleMaps": "https://example.test/jp"},
            "currencies": {"JPY": {"name": "Japanese yen", "symbol": "¥"}},
            "population": 125836021u64,
            "unmodeled_field": true
        });

        let raw: RawCountry = serde_json::from_value(json).expect("parse");

        assert_eq!(raw.name.common, "Japan");
        assert!(raw.name.native_name.is_some());
        assert_eq!(raw.cca2.as_deref(), Some("JP"));
        assert_eq!(raw.timezones.as_deref(), Some(&["UTC+09:00".to_string()][..]));
        assert_eq!(raw.population, Some(125836021));
    }

    #[test]
    fn test_population_record_parses_wire_format() {
        let json = json!({
            "country": "India",
            "code": "IN",
            "populationCounts": [
                {"year": 2020, "value": 500u64},
                {"year": 2023, "value": 1400000000u64}
            ]
        });

        let record: PopulationRecord = serde_json::from_value(json).expect("parse");

        assert_eq!(record.country, "India");
        assert_eq!(record.population_counts.len(), 2);
        assert_eq!(record.population_counts.last().unwrap().value, 1_400_000_000);
    }

    #[test]
    fn test_population_record_without_counts_parses_empty() {
        let record: PopulationRecord =
            serde_json::from_value(json!({"country": "Atlantis"})).expect("parse");
        assert!(record.population_counts.is_empty());
    }
}
