mod common;

use std::sync::Arc;

use common::{sample_lines, write_csv};
use layoffs_dashboard::{CountryFilter, Dashboard, FilterSelection, LoadError, Session};
use tempfile::tempdir;

#[test]
fn dataset_is_cached_until_source_changes() {
    let dir = tempdir().unwrap();
    let lines = sample_lines();
    let path = write_csv(dir.path(), "layoffs.csv", &lines[..2]);

    let mut session = Session::open(&path);
    let first = session.dataset().unwrap();
    let again = session.dataset().unwrap();
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(session.cache().load_count(), 1);
    assert_eq!(first.len(), 2);

    write_csv(dir.path(), "layoffs.csv", &lines);
    let reloaded = session.dataset().unwrap();
    assert_eq!(session.cache().load_count(), 2);
    assert_eq!(reloaded.len(), 5);
    // The old snapshot is untouched.
    assert_eq!(first.len(), 2);
}

#[test]
fn invalidate_forces_reload() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "layoffs.csv", &sample_lines());
    let mut session = Session::open(&path);
    let first = session.dataset().unwrap();
    session.invalidate();
    let second = session.dataset().unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
    assert_eq!(session.cache().load_count(), 2);
}

#[test]
fn vanished_source_is_unavailable() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "layoffs.csv", &sample_lines());
    let mut session = Session::open(&path);
    session.dataset().unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(session.dataset(), Err(LoadError::DataUnavailable { .. })));
}

fn yearly_counts(session: &mut Session) -> Vec<f64> {
    let dashboard = session.dashboard(2020).unwrap();
    dashboard.panel("yearly_layoffs").unwrap().view.numbers("Laid_Off_Count")
}

#[test]
fn selection_defaults_then_validates() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "layoffs.csv", &sample_lines());
    let mut session = Session::open(&path);

    let default = session.selection().unwrap();
    assert_eq!(default.industry, "Retail");
    assert_eq!(default.country, CountryFilter::UnitedStatesOfAmerica);
    assert_eq!(yearly_counts(&mut session), [18000.0]);

    session.select("Food", "India").unwrap();
    // Swiggy's count is the column mean.
    assert_eq!(yearly_counts(&mut session), [8125.0]);

    assert!(session.select("Food", "Canada").is_err());
    assert_eq!(session.selection().unwrap().industry, "Food");
}

#[test]
fn dashboard_lists_panels_in_display_order() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "layoffs.csv", &sample_lines());
    let mut session = Session::open(&path);
    session.select("Retail", "United States of America").unwrap();

    let dashboard = session.dashboard(2020).unwrap();
    let ids: Vec<&str> = dashboard.panels.iter().map(|p| p.id).collect();
    assert_eq!(
        ids,
        [
            "raw_data",
            "top_countries",
            "countries_by_layoffs",
            "top_industries_recent",
            "yearly_layoffs",
            "top_companies",
            "top_companies_in_industry",
            "layoffs_by_stage",
            "funding_vs_layoffs",
        ]
    );

    let top = dashboard.panel("top_countries").unwrap();
    assert_eq!(top.view.texts("Country")[0], "United States of America");

    let yearly = dashboard.panel("yearly_layoffs").unwrap();
    assert_eq!(yearly.view.numbers("Laid_Off_Count"), [18000.0]);

    let table = dashboard.panel("top_companies").unwrap();
    assert!(table.table_style.is_some());
    assert_eq!(table.view.len(), 5);
}

#[test]
fn dashboard_serializes_for_the_renderer() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "layoffs.csv", &sample_lines());
    let mut session = Session::open(&path);
    let dataset = session.dataset().unwrap();
    let selection = FilterSelection::new("Food", "India").unwrap();

    let dashboard = Dashboard::build(&dataset, &selection, 2020);
    let json = serde_json::to_value(&dashboard).unwrap();

    assert_eq!(json["title"], "Layoffs Analysis Dashboard");
    assert_eq!(json["sidebar"]["countries"][1], "India");
    assert_eq!(json["sidebar"]["selection"]["industry"], "Food");
    assert_eq!(json["sidebar"]["industries"].as_array().unwrap().len(), 4);

    let stage = &json["panels"][7];
    assert_eq!(stage["chart"]["kind"], "pie");
    assert_eq!(stage["chart"]["x"], "Stage");

    let table = &json["panels"][5];
    assert_eq!(table["table_style"]["formats"]["Percentage"], "percent2");
    assert_eq!(table["view"]["columns"][5], "Percentage");

    let treemap = &json["panels"][6];
    assert_eq!(treemap["chart"]["path"][1], "Company");
    assert_eq!(treemap["view"]["rows"][0][0], "Swiggy");
}
