use crate::data::filter::{filtered_indices, CountryFilter, FilterError, FilterSelection};
use crate::data::model::{
    CanonicalDataset, Cell, FUNDS_RAISED, LAID_OFF_COUNT, PERCENTAGE, REQUIRED_COLUMNS,
};

use super::aggregate::{sum_laid_off, to_view, top_n_view, GroupColumn};
use super::DerivedView;

pub const PREVIEW_ROWS: usize = 5;
pub const TOP_COUNTRIES: usize = 5;
pub const TOP_INDUSTRIES: usize = 5;
pub const TOP_COMPANIES_TABLE: usize = 50;
pub const TOP_COMPANIES_IN_INDUSTRY: usize = 10;
pub const TOP_COMPANIES_OVERALL: usize = 10;

/// Years covered by the recent-industries view.
pub const RECENT_YEARS: [i32; 2] = [2022, 2023];
/// Catch-all industry left out of the recent-industries ranking.
pub const EXCLUDED_INDUSTRY: &str = "Other";
/// Stages shown in the stage breakdown.
pub const STAGES: [&str; 4] = ["Acquired", "Post-IPO", "Private Equity", "Seed"];
/// Default cutoff year for the company tables.
pub const DEFAULT_CUTOFF_YEAR: i32 = 2020;

/// First rows of the canonical dataset, all columns.
pub fn raw_preview(dataset: &CanonicalDataset) -> DerivedView {
    let rows = dataset
        .records()
        .iter()
        .take(PREVIEW_ROWS)
        .map(|r| r.to_cells())
        .collect();
    DerivedView::with_rows(&REQUIRED_COLUMNS, rows)
}

/// Five countries with the most layoffs.
pub fn top_countries(dataset: &CanonicalDataset) -> DerivedView {
    top_n_view(dataset.records(), &[GroupColumn::Country], TOP_COUNTRIES)
}

/// Every country, most layoffs first.
pub fn countries_by_layoffs(dataset: &CanonicalDataset) -> DerivedView {
    top_n_view(dataset.records(), &[GroupColumn::Country], usize::MAX)
}

/// Five industries with the most layoffs in 2022–2023, "Other" excluded.
pub fn top_industries_recent(dataset: &CanonicalDataset) -> DerivedView {
    let recent = dataset
        .records()
        .iter()
        .filter(|r| RECENT_YEARS.contains(&r.year()) && r.industry != EXCLUDED_INDUSTRY);
    top_n_view(recent, &[GroupColumn::Industry], TOP_INDUSTRIES)
}

/// Layoffs per year for one industry in one of the two selectable countries.
///
/// Fails only when `country` is not a selectable country; an industry with
/// no matching records gives an empty view.
pub fn yearly_layoffs(
    dataset: &CanonicalDataset,
    industry: &str,
    country: &str,
) -> Result<DerivedView, FilterError> {
    let selection = FilterSelection {
        industry: industry.to_string(),
        country: CountryFilter::parse(country)?,
    };
    Ok(yearly_layoffs_for(dataset, &selection))
}

/// [`yearly_layoffs`] for an already validated selection.
pub fn yearly_layoffs_for(dataset: &CanonicalDataset, selection: &FilterSelection) -> DerivedView {
    let records = dataset.records();
    let slice = filtered_indices(dataset, selection)
        .into_iter()
        .map(|i| &records[i]);
    let keys = [GroupColumn::Year];
    let mut groups = sum_laid_off(slice, &keys);
    groups.sort_by(|a, b| a.key.cmp(&b.key));
    to_view(&keys, groups)
}

/// Top 50 company/location groups since `cutoff_year`, with each group's
/// share of the layoffs within those 50.
pub fn top_companies_since(dataset: &CanonicalDataset, cutoff_year: i32) -> DerivedView {
    let keys = [
        GroupColumn::Company,
        GroupColumn::Industry,
        GroupColumn::LocationHq,
        GroupColumn::Country,
    ];
    let since = dataset.records().iter().filter(|r| r.year() >= cutoff_year);
    let mut view = top_n_view(since, &keys, TOP_COMPANIES_TABLE);

    // Denominator is the truncated set, so the column sums to 100.
    let total: f64 = view.numbers(LAID_OFF_COUNT).iter().sum();
    let count_idx = keys.len();
    view.columns.push(PERCENTAGE.to_string());
    for row in &mut view.rows {
        let count = row[count_idx].as_f64().unwrap_or(0.0);
        let share = if total == 0.0 { 0.0 } else { count / total * 100.0 };
        row.push(Cell::Float(share));
    }
    view
}

/// Top 10 companies of one industry since `cutoff_year`.
pub fn top_companies_in_industry(
    dataset: &CanonicalDataset,
    cutoff_year: i32,
    industry: &str,
) -> DerivedView {
    let slice = dataset
        .records()
        .iter()
        .filter(|r| r.year() >= cutoff_year && r.industry == industry);
    top_n_view(
        slice,
        &[GroupColumn::Company, GroupColumn::Industry],
        TOP_COMPANIES_IN_INDUSTRY,
    )
}

/// Layoffs per stage for the four tracked stages, ordered by stage name.
pub fn layoffs_by_stage(dataset: &CanonicalDataset) -> DerivedView {
    let keys = [GroupColumn::Stage];
    let tracked = dataset
        .records()
        .iter()
        .filter(|r| STAGES.contains(&r.stage.as_str()));
    let mut groups = sum_laid_off(tracked, &keys);
    groups.sort_by(|a, b| a.key.cmp(&b.key));
    to_view(&keys, groups)
}

/// One point per record: funds raised against layoffs.
pub fn funding_vs_layoffs(dataset: &CanonicalDataset) -> DerivedView {
    let rows = dataset
        .records()
        .iter()
        .map(|r| vec![Cell::Float(r.funds_raised), Cell::Float(r.laid_off_count)])
        .collect();
    DerivedView::with_rows(&[FUNDS_RAISED, LAID_OFF_COUNT], rows)
}

/// Ten companies with the most layoffs over the whole dataset.
pub fn top_companies_overall(dataset: &CanonicalDataset) -> DerivedView {
    top_n_view(dataset.records(), &[GroupColumn::Company], TOP_COMPANIES_OVERALL)
}
