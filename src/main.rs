use std::process::ExitCode;

use anyhow::{Context, Result};

use layoffs_dashboard::{CountryFilter, DashboardConfig, Session};

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = DashboardConfig::from_env().context("reading configuration")?;

    let mut session = Session::open(&config.data_path);
    let dataset = session
        .dataset()
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    let industry = config
        .industry
        .clone()
        .or_else(|| dataset.industries().first().cloned())
        .unwrap_or_default();
    let country = config
        .country
        .as_deref()
        .unwrap_or(CountryFilter::UnitedStatesOfAmerica.as_str());
    session
        .select(industry, country)
        .context("applying sidebar selection")?;

    let dashboard = session.dashboard(config.cutoff_year)?;
    log::info!(
        "Built {} panels for {} records",
        dashboard.panels.len(),
        dataset.len()
    );

    let json = serde_json::to_string_pretty(&dashboard).context("serializing dashboard")?;
    match &config.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
