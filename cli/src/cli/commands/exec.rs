use std::path::PathBuf;

use sqlrunner_core::config::load_config;
use sqlrunner_core::Workbench;

use super::print_outcome;

pub async fn run(config_path: Option<PathBuf>, query: String) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let workbench = Workbench::from_config(&config)?;

    if !workbench.session.is_authenticated().await {
        anyhow::bail!("Not logged in. Run `sqlrunner login` first.");
    }

    match workbench.runner.execute(&query).await {
        Some(outcome) => print_outcome(&outcome),
        None => anyhow::bail!("Nothing to execute: query text is empty"),
    }

    Ok(())
}
