use std::collections::BTreeSet;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Date32Type, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use super::clean::canonicalize;
use super::model::{
    CanonicalDataset, RawRecord, COMPANY, COUNTRY, DATE, FUNDS_RAISED, INDUSTRY, LAID_OFF_COUNT,
    LOCATION_HQ, PERCENTAGE, REQUIRED_COLUMNS, STAGE,
};

#[derive(Debug, Error)]
pub enum LoadError {
    /// The source is missing, unreadable, or of a kind we cannot read.
    #[error("data unavailable: {}: {reason}", .path.display())]
    DataUnavailable { path: PathBuf, reason: String },
    /// A required column is absent or a value cannot be interpreted.
    #[error("malformed schema: {reason}")]
    MalformedSchema { reason: String },
}

fn unavailable(path: &Path, reason: impl Display) -> LoadError {
    LoadError::DataUnavailable {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn malformed(reason: impl Into<String>) -> LoadError {
    LoadError::MalformedSchema {
        reason: reason.into(),
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a layoffs dataset.
pub fn load_file(path: &Path) -> Result<CanonicalDataset, LoadError> {
    let raw = read_raw(path)?;
    let dataset = canonicalize(raw)?;
    log::info!(
        "Loaded {} layoff records ({} industries) from {}",
        dataset.len(),
        dataset.industries().len(),
        path.display()
    );
    Ok(dataset)
}

/// Read raw records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one event per line (extra columns ignored)
/// * `.json`    – `[{ "Company": ..., "Laid_Off_Count": ..., ... }, ...]`
/// * `.parquet` – one column per field, numeric columns nullable
pub fn read_raw(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(unavailable(path, format!("unsupported file extension: .{other}"))),
    }
}

fn require_columns<'a>(present: impl IntoIterator<Item = &'a str>) -> Result<(), LoadError> {
    let present: BTreeSet<&str> = present.into_iter().collect();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !present.contains(c))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(malformed(format!("missing columns: {}", missing.join(", "))))
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| unavailable(path, e))?;

    let headers = reader.headers().map_err(|e| {
        if e.is_io_error() {
            unavailable(path, e)
        } else {
            malformed(format!("reading CSV headers: {e}"))
        }
    })?;
    require_columns(headers.iter())?;

    reader
        .deserialize::<RawRecord>()
        .enumerate()
        .map(|(row, result)| result.map_err(|e| malformed(format!("CSV row {row}: {e}"))))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| unavailable(path, e))?;
    let rows: Vec<Map<String, JsonValue>> = serde_json::from_str(&text)
        .map_err(|e| malformed(format!("expected an array of JSON objects: {e}")))?;

    require_columns(rows.iter().flat_map(|obj| obj.keys().map(String::as_str)))?;

    rows.into_iter()
        .enumerate()
        .map(|(row, obj)| {
            serde_json::from_value::<RawRecord>(JsonValue::Object(obj))
                .map_err(|e| malformed(format!("JSON row {row}: {e}")))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

fn load_parquet(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| unavailable(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| unavailable(path, format!("reading parquet metadata: {e}")))?;
    require_columns(builder.schema().fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder
        .build()
        .map_err(|e| unavailable(path, format!("building parquet reader: {e}")))?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.map_err(|e| unavailable(path, format!("reading record batch: {e}")))?;

        let company = string_column(&batch, COMPANY)?;
        let industry = string_column(&batch, INDUSTRY)?;
        let country = string_column(&batch, COUNTRY)?;
        let location_hq = string_column(&batch, LOCATION_HQ)?;
        let stage = string_column(&batch, STAGE)?;
        let date = date_column(&batch, DATE)?;
        let laid_off_count = float_column(&batch, LAID_OFF_COUNT)?;
        let funds_raised = float_column(&batch, FUNDS_RAISED)?;
        let percentage = float_column(&batch, PERCENTAGE)?;

        for row in 0..batch.num_rows() {
            records.push(RawRecord {
                company: company[row].clone(),
                industry: industry[row].clone(),
                country: country[row].clone(),
                location_hq: location_hq[row].clone(),
                stage: stage[row].clone(),
                date: date[row].clone(),
                laid_off_count: laid_off_count[row],
                funds_raised: funds_raised[row],
                percentage: percentage[row],
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, LoadError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| malformed(format!("Parquet file missing '{name}' column")))
}

/// Text column; nulls become empty strings.
fn string_column(batch: &RecordBatch, name: &str) -> Result<Vec<String>, LoadError> {
    let col = cast(column(batch, name)?.as_ref(), &DataType::Utf8)
        .map_err(|e| malformed(format!("'{name}' is not a text column: {e}")))?;
    Ok(col
        .as_string::<i32>()
        .iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect())
}

/// Any integer or float column, read as `f64`; nulls and non-finite values
/// are missing.
fn float_column(batch: &RecordBatch, name: &str) -> Result<Vec<Option<f64>>, LoadError> {
    let col = column(batch, name)?;
    if !col.data_type().is_numeric() {
        return Err(malformed(format!(
            "'{name}' is {:?}, expected a numeric column",
            col.data_type()
        )));
    }
    let col = cast(col.as_ref(), &DataType::Float64)
        .map_err(|e| malformed(format!("'{name}': {e}")))?;
    Ok(col
        .as_primitive::<Float64Type>()
        .iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect())
}

/// Dates as text, ready for the cleaner: temporal columns are formatted as
/// `YYYY-MM-DD`, text columns pass through.
fn date_column(batch: &RecordBatch, name: &str) -> Result<Vec<String>, LoadError> {
    let col = column(batch, name)?;
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => string_column(batch, name),
        other => {
            let dates = cast(col.as_ref(), &DataType::Date32)
                .map_err(|e| malformed(format!("'{name}' is {other:?}, not a date: {e}")))?;
            let dates = dates.as_primitive::<Date32Type>();
            Ok((0..dates.len())
                .map(|i| {
                    if dates.is_null(i) {
                        String::new()
                    } else {
                        dates
                            .value_as_date(i)
                            .map(|d| d.to_string())
                            .unwrap_or_default()
                    }
                })
                .collect())
        }
    }
}
