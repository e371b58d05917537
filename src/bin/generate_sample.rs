use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Date32Array, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;

use layoffs_dashboard::RawRecord;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    /// Roughly one cell in eight is left empty so the cleaner has work.
    fn sometimes_missing(&mut self, value: f64) -> Option<f64> {
        (self.next_f64() >= 0.125).then_some(value)
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

// (company, industry, headquarters, country)
const COMPANIES: [(&str, &str, &str, &str); 12] = [
    ("Northwind", "Retail", "Seattle", "United States"),
    ("Contoso", "Consumer", "SF Bay Area", "United States of America"),
    ("Fabrikam", "Hardware", "Austin", "United States"),
    ("Tailspin", "Travel", "Bengaluru", "India"),
    ("Wingtip", "Food", "Mumbai", "India"),
    ("Litware", "Crypto", "London", "United Kingdom"),
    ("Proseware", "Fintech", "Berlin", "Germany"),
    ("Adatum", "Healthcare", "Toronto", "Canada"),
    ("Woodgrove", "Finance", "New York City", "United States"),
    ("Lucerne", "Media", "Gurugram", "India"),
    ("Trey", "Other", "Singapore", "Singapore"),
    ("Coho", "Retail", "Sao Paulo", "Brazil"),
];

const STAGES: [&str; 7] = [
    "Acquired",
    "Post-IPO",
    "Private Equity",
    "Seed",
    "Series B",
    "Series D",
    "Unknown",
];

const ROWS: usize = 240;

fn generate(rng: &mut SimpleRng) -> Vec<(RawRecord, NaiveDate)> {
    let epoch = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap_or_default();
    (0..ROWS)
        .map(|_| {
            let (company, industry, hq, country) = COMPANIES[rng.below(COMPANIES.len())];
            let date = epoch + chrono::Duration::days(rng.below(4 * 365) as i64);

            let laid_off = (rng.next_f64().powi(3) * 2000.0 + 10.0).round();
            let funds = (rng.next_f64() * 5000.0).round();
            let share = (rng.next_f64() * 100.0).round() / 100.0;
            let laid_off_count = rng.sometimes_missing(laid_off);
            let funds_raised = rng.sometimes_missing(funds);
            let percentage = rng.sometimes_missing(share);

            let record = RawRecord {
                company: company.to_string(),
                industry: industry.to_string(),
                country: country.to_string(),
                location_hq: hq.to_string(),
                stage: rng.pick(&STAGES).to_string(),
                date: date.to_string(),
                laid_off_count,
                funds_raised,
                percentage,
            };
            (record, date)
        })
        .collect()
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_layoffs.csv".to_string());
    let output = Path::new(&output);

    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    if output.extension().and_then(|e| e.to_str()) == Some("parquet") {
        write_parquet(output, &rows)?;
    } else {
        write_csv(output, &rows)?;
    }

    println!("Wrote {} layoff events to {}", rows.len(), output.display());
    Ok(())
}

fn write_csv(path: &Path, rows: &[(RawRecord, NaiveDate)]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating output file")?;
    for (record, _) in rows {
        writer.serialize(record).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[(RawRecord, NaiveDate)]) -> Result<()> {
    let text = |f: fn(&RawRecord) -> &str| {
        StringArray::from(rows.iter().map(|(r, _)| f(r)).collect::<Vec<_>>())
    };
    let number = |f: fn(&RawRecord) -> Option<f64>| {
        Float64Array::from(rows.iter().map(|(r, _)| f(r)).collect::<Vec<_>>())
    };
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    let dates = Date32Array::from(
        rows.iter()
            .map(|(_, d)| (*d - epoch).num_days() as i32)
            .collect::<Vec<_>>(),
    );

    let schema = Arc::new(Schema::new(vec![
        Field::new("Company", DataType::Utf8, false),
        Field::new("Industry", DataType::Utf8, false),
        Field::new("Country", DataType::Utf8, false),
        Field::new("Location_HQ", DataType::Utf8, false),
        Field::new("Stage", DataType::Utf8, false),
        Field::new("Date", DataType::Date32, false),
        Field::new("Laid_Off_Count", DataType::Float64, true),
        Field::new("Funds_Raised", DataType::Float64, true),
        Field::new("Percentage", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(text(|r| r.company.as_str())),
            Arc::new(text(|r| r.industry.as_str())),
            Arc::new(text(|r| r.country.as_str())),
            Arc::new(text(|r| r.location_hq.as_str())),
            Arc::new(text(|r| r.stage.as_str())),
            Arc::new(dates),
            Arc::new(number(|r| r.laid_off_count)),
            Arc::new(number(|r| r.funds_raised)),
            Arc::new(number(|r| r.percentage)),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}
