use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Scenario – CMIP6 Shared Socioeconomic Pathway
// ---------------------------------------------------------------------------

/// The four CMIP6 scenarios carried by the dataset.  `Ord` so scenarios have
/// a stable order in `BTreeSet`s and in the series list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Ssp126,
    Ssp245,
    Ssp370,
    Ssp585,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Ssp126,
        Scenario::Ssp245,
        Scenario::Ssp370,
        Scenario::Ssp585,
    ];

    /// Lowercase key as it appears in source tables (`ssp126`, …).
    pub fn key(self) -> &'static str {
        match self {
            Scenario::Ssp126 => "ssp126",
            Scenario::Ssp245 => "ssp245",
            Scenario::Ssp370 => "ssp370",
            Scenario::Ssp585 => "ssp585",
        }
    }

    /// Human-readable label for legends and tooltips.
    pub fn label(self) -> &'static str {
        match self {
            Scenario::Ssp126 => "SSP1-2.6",
            Scenario::Ssp245 => "SSP2-4.5",
            Scenario::Ssp370 => "SSP3-7.0",
            Scenario::Ssp585 => "SSP5-8.5",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
#[error("unrecognised scenario '{0}'")]
pub struct ParseScenarioError(pub String);

impl FromStr for Scenario {
    type Err = ParseScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ssp126" => Ok(Scenario::Ssp126),
            "ssp245" => Ok(Scenario::Ssp245),
            "ssp370" => Ok(Scenario::Ssp370),
            "ssp585" => Ok(Scenario::Ssp585),
            other => Err(ParseScenarioError(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// One model projection: temperature anomaly (°C vs. the 1850–1900 baseline)
/// for a country/scenario/year triple.  Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub country: String,
    pub scenario: Scenario,
    pub year: i32,
    pub anom: f64,
}

// ---------------------------------------------------------------------------
// ClimateDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed country index and year extent.
#[derive(Debug, Clone)]
pub struct ClimateDataset {
    /// All projection records (rows).
    pub records: Vec<Record>,
    /// Sorted unique country names.
    pub countries: Vec<String>,
    /// Inclusive (min, max) year across all records.
    pub year_range: (i32, i32),
}

impl ClimateDataset {
    /// Build the country index and year extent from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let countries: Vec<String> = records
            .iter()
            .map(|r| r.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut year_range = (i32::MAX, i32::MIN);
        for r in &records {
            year_range.0 = year_range.0.min(r.year);
            year_range.1 = year_range.1.max(r.year);
        }
        if records.is_empty() {
            year_range = (2015, 2100);
        }

        ClimateDataset {
            records,
            countries,
            year_range,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
