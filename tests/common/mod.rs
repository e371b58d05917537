#![allow(dead_code)]

use std::path::{Path, PathBuf};

use layoffs_dashboard::data::clean::canonicalize;
use layoffs_dashboard::{CanonicalDataset, RawRecord};

pub const HEADER: &str =
    "Company,Location_HQ,Industry,Laid_Off_Count,Date,Source,Funds_Raised,Stage,Country,Percentage";

/// A raw record with every field filled in.
pub fn raw(company: &str, industry: &str, country: &str, date: &str, laid_off: f64) -> RawRecord {
    RawRecord {
        company: company.to_string(),
        industry: industry.to_string(),
        country: country.to_string(),
        location_hq: format!("{company} HQ"),
        stage: "Post-IPO".to_string(),
        date: date.to_string(),
        laid_off_count: Some(laid_off),
        funds_raised: Some(100.0),
        percentage: Some(0.1),
    }
}

pub fn with_stage(mut record: RawRecord, stage: &str) -> RawRecord {
    record.stage = stage.to_string();
    record
}

pub fn dataset(records: Vec<RawRecord>) -> CanonicalDataset {
    canonicalize(records).expect("fixture records are valid")
}

/// Write CSV lines under `HEADER` (column order as in public layoff exports).
pub fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut body = String::from(HEADER);
    for line in lines {
        body.push('\n');
        body.push_str(line);
    }
    body.push('\n');
    std::fs::write(&path, body).expect("write fixture");
    path
}

pub fn sample_lines() -> Vec<&'static str> {
    vec![
        "Amazon,Seattle,Retail,18000,2023-01-04,Bloomberg,108,Post-IPO,United States,0.05",
        "Byju's,Bengaluru,Education,2500,2022-10-31,Inc42,5500,Private Equity,India,",
        "Swiggy,Bengaluru,Food,,2023-01-20,Mint,3600,Series J,India,0.06",
        "Shopify,Ottawa,Retail,1000,2022-07-26,Shopify,122,Post-IPO,Canada,0.1",
        "Meta,SF Bay Area,Consumer,11000,2022-11-09,Meta,26000,Post-IPO,United States of America,0.13",
    ]
}
