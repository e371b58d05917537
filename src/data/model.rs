use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const COMPANY: &str = "Company";
pub const INDUSTRY: &str = "Industry";
pub const COUNTRY: &str = "Country";
pub const LOCATION_HQ: &str = "Location_HQ";
pub const STAGE: &str = "Stage";
pub const DATE: &str = "Date";
pub const LAID_OFF_COUNT: &str = "Laid_Off_Count";
pub const FUNDS_RAISED: &str = "Funds_Raised";
pub const PERCENTAGE: &str = "Percentage";

/// Every column a source must provide, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    COMPANY,
    INDUSTRY,
    COUNTRY,
    LOCATION_HQ,
    STAGE,
    DATE,
    LAID_OFF_COUNT,
    FUNDS_RAISED,
    PERCENTAGE,
];

// ---------------------------------------------------------------------------
// Cell – a single value in a derived table
// ---------------------------------------------------------------------------

/// A dynamically-typed table value.
/// Group keys are `Vec<Cell>`, so `Cell` must be `Eq + Hash`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
}

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Cell::*;
        fn discriminant(v: &Cell) -> u8 {
            match v {
                Integer(_) => 0,
                Float(_) => 1,
                Date(_) => 2,
                Text(_) => 3,
            }
        }
        match (self, other) {
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for Cell {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Cell::Text(s) => s.hash(state),
            Cell::Integer(i) => i.hash(state),
            Cell::Float(f) => f.to_bits().hash(state),
            Cell::Date(d) => d.hash(state),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v:.4}"),
            Cell::Date(d) => write!(f, "{d}"),
        }
    }
}

impl Cell {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(v) => Some(*v),
            Cell::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn text(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// RawRecord – one row as found in the source
// ---------------------------------------------------------------------------

/// A layoff event before cleaning. Numeric columns may be missing and the
/// date is still text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Company", default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(rename = "Industry", default, deserialize_with = "null_as_empty")]
    pub industry: String,
    #[serde(rename = "Country", default, deserialize_with = "null_as_empty")]
    pub country: String,
    #[serde(rename = "Location_HQ", default, deserialize_with = "null_as_empty")]
    pub location_hq: String,
    #[serde(rename = "Stage", default, deserialize_with = "null_as_empty")]
    pub stage: String,
    #[serde(rename = "Date", default, deserialize_with = "date_text")]
    pub date: String,
    #[serde(rename = "Laid_Off_Count", default, deserialize_with = "missing_number")]
    pub laid_off_count: Option<f64>,
    #[serde(rename = "Funds_Raised", default, deserialize_with = "missing_number")]
    pub funds_raised: Option<f64>,
    #[serde(rename = "Percentage", default, deserialize_with = "missing_number")]
    pub percentage: Option<f64>,
}

/// Missing text (JSON `null`, empty CSV cell) becomes the empty string.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Cell spellings read as a missing value rather than as text.
const MISSING_SPELLINGS: [&str; 9] = ["", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None"];

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberCell {
    Number(f64),
    Text(String),
}

/// Numeric cell where `NaN`, `NA`, `null` and friends count as missing.
/// Anything else that is not a finite number is an error.
fn missing_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = match Option::<NumberCell>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(NumberCell::Number(v)) => v,
        Some(NumberCell::Text(s)) => {
            let s = s.trim();
            if MISSING_SPELLINGS.contains(&s) {
                return Ok(None);
            }
            s.parse::<f64>()
                .map_err(|_| de::Error::custom(format!("'{s}' is not a number")))?
        }
    };
    Ok(Some(value).filter(|v| v.is_finite()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DateCell {
    Text(String),
    EpochMillis(i64),
}

/// Dates are text in CSV, but `df.to_json()` writes epoch milliseconds.
fn date_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<DateCell>::deserialize(deserializer)? {
        Some(DateCell::Text(s)) => s,
        Some(DateCell::EpochMillis(ms)) => DateTime::from_timestamp_millis(ms)
            .map(|dt| dt.date_naive().to_string())
            .unwrap_or_else(|| ms.to_string()),
        None => String::new(),
    })
}

// ---------------------------------------------------------------------------
// LayoffRecord – one row of the canonical dataset
// ---------------------------------------------------------------------------

/// A cleaned layoff event: numeric gaps filled, date parsed, country normalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoffRecord {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Location_HQ")]
    pub location_hq: String,
    #[serde(rename = "Stage")]
    pub stage: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Laid_Off_Count")]
    pub laid_off_count: f64,
    #[serde(rename = "Funds_Raised")]
    pub funds_raised: f64,
    #[serde(rename = "Percentage")]
    pub percentage: f64,
}

impl LayoffRecord {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// The record as a row of cells, in `REQUIRED_COLUMNS` order.
    pub fn to_cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(&self.company),
            Cell::text(&self.industry),
            Cell::text(&self.country),
            Cell::text(&self.location_hq),
            Cell::text(&self.stage),
            Cell::Date(self.date),
            Cell::Float(self.laid_off_count),
            Cell::Float(self.funds_raised),
            Cell::Float(self.percentage),
        ]
    }
}

// ---------------------------------------------------------------------------
// FillValues – what the cleaner imputed
// ---------------------------------------------------------------------------

/// Mean used to fill one numeric column and how many cells received it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnFill {
    pub value: f64,
    pub filled: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FillValues {
    pub laid_off_count: ColumnFill,
    pub funds_raised: ColumnFill,
    pub percentage: ColumnFill,
}

// ---------------------------------------------------------------------------
// CanonicalDataset – the complete cleaned dataset
// ---------------------------------------------------------------------------

/// The cleaned dataset with its pre-computed industry index.
///
/// Read-only once built: every field is private and only borrowed out.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalDataset {
    records: Vec<LayoffRecord>,
    fill: FillValues,
    industries: Vec<String>,
}

impl CanonicalDataset {
    /// Build the industry index from cleaned records.
    pub(crate) fn from_records(records: Vec<LayoffRecord>, fill: FillValues) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut industries = Vec::new();
        for rec in &records {
            if seen.insert(rec.industry.as_str()) {
                industries.push(rec.industry.clone());
            }
        }
        CanonicalDataset {
            records,
            fill,
            industries,
        }
    }

    pub fn records(&self) -> &[LayoffRecord] {
        &self.records
    }

    pub fn fill_values(&self) -> &FillValues {
        &self.fill
    }

    /// Distinct Industry values in order of first appearance.
    pub fn industries(&self) -> &[String] {
        &self.industries
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
