use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::loader::LoadError;
use super::model::{
    CanonicalDataset, ColumnFill, FillValues, LayoffRecord, RawRecord, DATE, FUNDS_RAISED,
    LAID_OFF_COUNT, PERCENTAGE,
};

/// Country spellings rewritten to one canonical form.
const COUNTRY_ALIASES: [(&str, &str); 1] = [("United States", "United States of America")];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Turn raw records into the canonical dataset.
///
/// Fill means are taken over the whole input, before any view filters it.
pub fn canonicalize(raw: Vec<RawRecord>) -> Result<CanonicalDataset, LoadError> {
    let fill = FillValues {
        laid_off_count: column_fill(&raw, LAID_OFF_COUNT, |r| r.laid_off_count),
        funds_raised: column_fill(&raw, FUNDS_RAISED, |r| r.funds_raised),
        percentage: column_fill(&raw, PERCENTAGE, |r| r.percentage),
    };
    log::debug!("fill values: {fill:?}");

    let records = raw
        .into_iter()
        .enumerate()
        .map(|(row, r)| {
            let date = parse_date(&r.date).ok_or_else(|| LoadError::MalformedSchema {
                reason: format!("row {row}: {DATE} value '{}' is not a date", r.date),
            })?;
            Ok(LayoffRecord {
                company: r.company,
                industry: r.industry,
                country: normalize_country(r.country),
                location_hq: r.location_hq,
                stage: r.stage,
                date,
                laid_off_count: r.laid_off_count.unwrap_or(fill.laid_off_count.value),
                funds_raised: r.funds_raised.unwrap_or(fill.funds_raised.value),
                percentage: r.percentage.unwrap_or(fill.percentage.value),
            })
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    Ok(CanonicalDataset::from_records(records, fill))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Mean of the present values, with the number of gaps it will fill.
fn column_fill(raw: &[RawRecord], column: &str, get: impl Fn(&RawRecord) -> Option<f64>) -> ColumnFill {
    let mut sum = 0.0;
    let mut present = 0usize;
    for v in raw.iter().filter_map(&get) {
        sum += v;
        present += 1;
    }
    let filled = raw.len() - present;
    let value = if present == 0 {
        if filled > 0 {
            log::warn!("{column}: no values present, filling {filled} cells with 0");
        }
        0.0
    } else {
        sum / present as f64
    };
    ColumnFill { value, filled }
}

fn normalize_country(country: String) -> String {
    COUNTRY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == country)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(country)
}

/// Parse the date spellings seen in layoff exports.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
}
