use serde::Serialize;

use crate::data::filter::{CountryFilter, FilterSelection};
use crate::data::model::{
    CanonicalDataset, COMPANY, COUNTRY, FUNDS_RAISED, INDUSTRY, LAID_OFF_COUNT, PERCENTAGE, STAGE,
};
use crate::views::chart::{ChartKind, ChartSpec, NumberFormat, TableStyle};
use crate::views::queries;
use crate::views::DerivedView;

pub const TITLE: &str = "Layoffs Analysis Dashboard";

// ---------------------------------------------------------------------------
// Dashboard document
// ---------------------------------------------------------------------------

/// One section of the page: a derived table and how to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub id: &'static str,
    pub heading: String,
    pub view: DerivedView,
    pub chart: ChartSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_style: Option<TableStyle>,
}

/// Dropdown options and the current choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sidebar {
    pub industries: Vec<String>,
    pub countries: [CountryFilter; 2],
    pub selection: FilterSelection,
}

/// The whole page, in display order, as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub title: &'static str,
    pub sidebar: Sidebar,
    pub panels: Vec<Panel>,
}

impl Dashboard {
    /// Run every panel query against the dataset.
    pub fn build(dataset: &CanonicalDataset, selection: &FilterSelection, cutoff_year: i32) -> Self {
        let industry = selection.industry.as_str();
        let total_layoffs = "Total Layoffs";

        let panels = vec![
            Panel {
                id: "raw_data",
                heading: "Raw data".into(),
                view: queries::raw_preview(dataset),
                chart: ChartSpec::new(ChartKind::Table, "Raw data"),
                table_style: None,
            },
            Panel {
                id: "top_countries",
                heading: "Top 5 Countries with Most Layoffs".into(),
                view: queries::top_countries(dataset),
                chart: ChartSpec::new(ChartKind::Bar, "Top 5 Countries with Most Layoffs")
                    .x(COUNTRY)
                    .y(LAID_OFF_COUNT)
                    .color(COUNTRY)
                    .label(LAID_OFF_COUNT, total_layoffs),
                table_style: None,
            },
            Panel {
                id: "countries_by_layoffs",
                heading: "Layoffs by Country".into(),
                view: queries::countries_by_layoffs(dataset),
                chart: ChartSpec::new(ChartKind::Bar, "Total Layoffs by Country")
                    .x(LAID_OFF_COUNT)
                    .y(COUNTRY)
                    .color(LAID_OFF_COUNT)
                    .horizontal()
                    .label(LAID_OFF_COUNT, total_layoffs)
                    .label(COUNTRY, "Country")
                    .hide_legend(),
                table_style: None,
            },
            Panel {
                id: "top_industries_recent",
                heading: "Top 5 Industries with Most Layoffs in 2022 and 2023".into(),
                view: queries::top_industries_recent(dataset),
                chart: ChartSpec::new(ChartKind::Bar, "Top 5 Industries with Most Layoffs (2022-2023)")
                    .x(LAID_OFF_COUNT)
                    .y(INDUSTRY)
                    .color(INDUSTRY)
                    .horizontal()
                    .label(LAID_OFF_COUNT, total_layoffs),
                table_style: None,
            },
            Panel {
                id: "yearly_layoffs",
                heading: "Number of Layoffs per year".into(),
                view: queries::yearly_layoffs_for(dataset, selection),
                chart: ChartSpec::new(
                    ChartKind::Line,
                    format!("Yearly Layoffs in {} ({industry})", selection.country),
                )
                .x("Year")
                .y(LAID_OFF_COUNT)
                .categorical_x()
                .label(LAID_OFF_COUNT, total_layoffs),
                table_style: None,
            },
            Panel {
                id: "top_companies",
                heading: format!("Top 50 Companies with Most Layoffs (Since {cutoff_year})"),
                view: queries::top_companies_since(dataset, cutoff_year),
                chart: ChartSpec::new(ChartKind::Table, "Top 50 Companies with Most Layoffs"),
                table_style: Some(
                    TableStyle::default()
                        .format(LAID_OFF_COUNT, NumberFormat::ThousandsInteger)
                        .format(PERCENTAGE, NumberFormat::Percent2)
                        .highlight_max(LAID_OFF_COUNT)
                        .highlight_min(PERCENTAGE)
                        .bar(PERCENTAGE),
                ),
            },
            Panel {
                id: "top_companies_in_industry",
                heading: "Top 10 Companies Based on Industry (All Countries)".into(),
                view: queries::top_companies_in_industry(dataset, cutoff_year, industry),
                chart: ChartSpec::new(
                    ChartKind::Treemap,
                    format!("Layoffs by Company in {industry} Industry"),
                )
                .path(&[INDUSTRY, COMPANY])
                .y(LAID_OFF_COUNT)
                .color(LAID_OFF_COUNT),
                table_style: None,
            },
            Panel {
                id: "layoffs_by_stage",
                heading: "Layoffs by Company Stage".into(),
                view: queries::layoffs_by_stage(dataset),
                chart: ChartSpec::new(ChartKind::Pie, "Layoffs by Company Stage")
                    .x(STAGE)
                    .y(LAID_OFF_COUNT)
                    .color(STAGE),
                table_style: None,
            },
            Panel {
                id: "funding_vs_layoffs",
                heading: "Impact of Funding on Layoffs".into(),
                view: queries::funding_vs_layoffs(dataset),
                chart: ChartSpec::new(ChartKind::Scatter, "Impact of Funding on Layoffs")
                    .x(FUNDS_RAISED)
                    .y(LAID_OFF_COUNT)
                    .label(FUNDS_RAISED, "Funds Raised")
                    .label(LAID_OFF_COUNT, "Number of Layoffs"),
                table_style: None,
            },
        ];

        Dashboard {
            title: TITLE,
            sidebar: Sidebar {
                industries: dataset.industries().to_vec(),
                countries: CountryFilter::ALL,
                selection: selection.clone(),
            },
            panels,
        }
    }

    pub fn panel(&self, id: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }
}
