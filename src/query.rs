//! Query operations over the cached country list
//!
//! Each operation is stateless given a cache snapshot: identifier lookup,
//! pairwise comparison, uniform random pick, and local-time lookup.

use std::sync::Arc;

use rand::Rng;
use serde::Serialize;

use crate::cache::AggregateCache;
use crate::data::{CountryRecord, UpstreamError};
use crate::timezone;

/// Local-time lookup result for a country
#[derive(Debug, Clone, Serialize)]
pub struct LocalTime {
    /// Common display name of the country
    pub country: String,
    /// Timezone label the time was computed in
    pub timezone: String,
    /// Local timestamp formatted as `YYYY-MM-DD HH:mm:ss`
    pub time: String,
}

/// Pair of records produced by a comparison lookup
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    #[serde(rename = "A")]
    pub a: CountryRecord,
    #[serde(rename = "B")]
    pub b: CountryRecord,
}

/// Read-only query layer on top of the aggregate cache
pub struct QueryService {
    cache: Arc<AggregateCache>,
}

impl QueryService {
    /// Creates a query service over the given cache
    pub fn new(cache: Arc<AggregateCache>) -> Self {
        Self { cache }
    }

    /// Returns the full merged country list
    pub async fn all(&self) -> Result<Arc<Vec<CountryRecord>>, UpstreamError> {
        self.cache.get_all().await
    }

    /// Finds a country by common name, cca2 or cca3, case-insensitively
    ///
    /// Returns the first match in list order; list order is whatever the
    /// upstream produced and is not guaranteed stable across refreshes.
    pub async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<CountryRecord>, UpstreamError> {
        let countries = self.cache.get_all().await?;
        let needle = identifier.to_lowercase();

        Ok(countries
            .iter()
            .find(|country| {
                country.name.common.to_lowercase() == needle
                    || country
                        .cca2
                        .as_deref()
                        .is_some_and(|code| code.to_lowercase() == needle)
                    || country
                        .cca3
                        .as_deref()
                        .is_some_and(|code| code.to_lowercase() == needle)
            })
            .cloned())
    }

    /// Looks up both identifiers; `None` if either is missing
    pub async fn compare(
        &self,
        first: &str,
        second: &str,
    ) -> Result<Option<Comparison>, UpstreamError> {
        let a = self.find_by_identifier(first).await?;
        let b = self.find_by_identifier(second).await?;

        Ok(match (a, b) {
            (Some(a), Some(b)) => Some(Comparison { a, b }),
            _ => None,
        })
    }

    /// Picks one country uniformly at random; `None` if the list is empty
    pub async fn random_pick(&self) -> Result<Option<CountryRecord>, UpstreamError> {
        let countries = self.cache.get_all().await?;
        if countries.is_empty() {
            return Ok(None);
        }

        let index = rand::rng().random_range(0..countries.len());
        Ok(Some(countries[index].clone()))
    }

    /// Current local time for a country's first timezone (UTC if it has none)
    pub async fn local_time(&self, identifier: &str) -> Result<Option<LocalTime>, UpstreamError> {
        let Some(country) = self.find_by_identifier(identifier).await? else {
            return Ok(None);
        };

        let timezone = country
            .timezones
            .as_ref()
            .and_then(|zones| zones.first())
            .cloned()
            .unwrap_or_else(|| "UTC".to_string());
        let time = timezone::local_time_in(&timezone);

        Ok(Some(LocalTime {
            country: country.name.common,
            timezone,
            time,
        }))
    }
}
