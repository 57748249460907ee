//! Joins one country record with its best-matching population record.

use super::{CountryRecord, PopulationRecord, RawCountry};

/// Merges a country with the population dataset into a [`CountryRecord`].
///
/// Matching is a case-insensitive exact compare of the country's common name
/// against each population record's name; the first match wins. The merged
/// population is the last (most recent) yearly value of the matching record.
/// A match with no yearly values counts as no match. Without a usable match
/// the country source's own population field is used, else the field stays
/// absent. Everything else is copied verbatim.
pub fn merge(country: RawCountry, populations: &[PopulationRecord]) -> CountryRecord {
    let needle = country.name.common.to_lowercase();

    let population = populations
        .iter()
        .find(|record| record.country.to_lowercase() == needle)
        .and_then(|record| record.population_counts.last())
        .map(|count| count.value)
        .or(country.population);

    CountryRecord {
        name: country.name,
        cca2: country.cca2,
        cca3: country.cca3,
        region: country.region,
        capital: country.capital,
        timezones: country.timezones,
        area: country.area,
        flags: country.flags,
        maps: country.maps,
        currencies: country.currencies,
        population,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CountryName, YearlyCount};

    fn raw(common: &str, population: Option<u64>) -> RawCountry {
        RawCountry {
            name: CountryName {
                common: common.to_string(),
                ..Default::default()
            },
            population,
            ..Default::default()
        }
    }

    fn history(country: &str, counts: &[(i32, u64)]) -> PopulationRecord {
        PopulationRecord {
            country: country.to_string(),
            population_counts: counts
                .iter()
                .map(|&(year, value)| YearlyCount { year, value })
                .collect(),
        }
    }

    #[test]
    fn test_match_takes_last_yearly_value() {
        let populations = vec![history("India", &[(2020, 500), (2023, 1_400_000_000)])];

        let merged = merge(raw("India", None), &populations);

        assert_eq!(merged.population, Some(1_400_000_000));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let populations = vec![history("INDIA", &[(2023, 7)])];

        let merged = merge(raw("india", Some(1000)), &populations);

        assert_eq!(merged.population, Some(7));
    }

    #[test]
    fn test_no_match_falls_back_to_own_population() {
        let populations = vec![history("Japan", &[(2023, 9)])];

        let merged = merge(raw("India", Some(1000)), &populations);

        assert_eq!(merged.population, Some(1000));
    }

    #[test]
    fn test_no_match_and_no_own_population_is_absent() {
        let merged = merge(raw("India", None), &[]);
        assert_eq!(merged.population, None);
    }

    #[test]
    fn test_first_match_wins_on_duplicates() {
        let populations = vec![
            history("India", &[(2023, 111)]),
            history("India", &[(2023, 222)]),
        ];

        let merged = merge(raw("India", None), &populations);

        assert_eq!(merged.population, Some(111));
    }

    #[test]
    fn test_empty_history_falls_back() {
        let populations = vec![history("India", &[])];

        let merged = merge(raw("India", Some(42)), &populations);

        assert_eq!(merged.population, Some(42));
    }

    #[test]
    fn test_other_fields_copied_verbatim() {
        let mut country = raw("Japan", Some(125_000_000));
        country.cca2 = Some("JP".to_string());
        country.cca3 = Some("JPN".to_string());
        country.region = Some("Asia".to_string());
        country.capital = Some(vec!["Tokyo".to_string()]);
        country.timezones = Some(vec!["Asia/Tokyo".to_string()]);
        country.area = Some(377_930.0);

        let merged = merge(country, &[]);

        assert_eq!(merged.cca2.as_deref(), Some("JP"));
        assert_eq!(merged.cca3.as_deref(), Some("JPN"));
        assert_eq!(merged.region.as_deref(), Some("Asia"));
        assert_eq!(merged.capital.as_deref(), Some(&["Tokyo".to_string()][..]));
        assert_eq!(
            merged.timezones.as_deref(),
            Some(&["Asia/Tokyo".to_string()][..])
        );
        assert_eq!(merged.area, Some(377_930.0));
        assert_eq!(merged.population, Some(125_000_000));
    }
}
