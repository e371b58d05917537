use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::model::{CanonicalDataset, LayoffRecord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("invalid filter: {column} = '{value}' is outside the permitted values")]
    InvalidFilter { column: &'static str, value: String },
}

// ---------------------------------------------------------------------------
// Country filter – the only closed filter domain
// ---------------------------------------------------------------------------

/// Countries offered by the yearly-layoffs country dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CountryFilter {
    #[serde(rename = "United States of America")]
    UnitedStatesOfAmerica,
    #[serde(rename = "India")]
    India,
}

impl CountryFilter {
    pub const ALL: [CountryFilter; 2] = [CountryFilter::UnitedStatesOfAmerica, CountryFilter::India];

    /// The canonical Country value this option matches.
    pub fn as_str(self) -> &'static str {
        match self {
            CountryFilter::UnitedStatesOfAmerica => "United States of America",
            CountryFilter::India => "India",
        }
    }

    pub fn parse(value: &str) -> Result<Self, FilterError> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == value)
            .ok_or_else(|| FilterError::InvalidFilter {
                column: "Country",
                value: value.to_string(),
            })
    }
}

impl fmt::Display for CountryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Filter selection: the two sidebar dropdowns
// ---------------------------------------------------------------------------

/// Current sidebar selection.
///
/// Industry is free text: a value the dataset does not contain matches
/// nothing rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub industry: String,
    pub country: CountryFilter,
}

impl FilterSelection {
    /// Validate a selection coming from outside the dropdowns.
    pub fn new(industry: impl Into<String>, country: &str) -> Result<Self, FilterError> {
        Ok(Self {
            industry: industry.into(),
            country: CountryFilter::parse(country)?,
        })
    }

    /// First industry of the dataset and the first country option.
    pub fn default_for(dataset: &CanonicalDataset) -> Self {
        Self {
            industry: dataset.industries().first().cloned().unwrap_or_default(),
            country: CountryFilter::UnitedStatesOfAmerica,
        }
    }

    pub fn matches(&self, record: &LayoffRecord) -> bool {
        record.industry == self.industry && record.country == self.country.as_str()
    }
}

/// Return indices of records that pass both sidebar filters.
pub fn filtered_indices(dataset: &CanonicalDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exactly_the_two_countries() {
        assert_eq!(
            CountryFilter::parse("United States of America"),
            Ok(CountryFilter::UnitedStatesOfAmerica)
        );
        assert_eq!(CountryFilter::parse("India"), Ok(CountryFilter::India));
        for bad in ["United States", "india", "Germany", ""] {
            assert_eq!(
                CountryFilter::parse(bad),
                Err(FilterError::InvalidFilter {
                    column: "Country",
                    value: bad.to_string()
                })
            );
        }
    }

    #[test]
    fn selection_rejects_country_but_not_industry() {
        assert!(FilterSelection::new("No Such Industry", "India").is_ok());
        assert!(FilterSelection::new("Retail", "Canada").is_err());
    }

    #[test]
    fn country_serializes_as_display_name() {
        let json = serde_json::to_string(&CountryFilter::ALL).unwrap();
        assert_eq!(json, r#"["United States of America","India"]"#);
    }
}
