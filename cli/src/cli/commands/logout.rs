use std::path::PathBuf;

use sqlrunner_core::config::load_config;
use sqlrunner_core::Workbench;

pub async fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let workbench = Workbench::from_config(&config)?;

    if !workbench.session.is_authenticated().await {
        println!("No active session.");
        return Ok(());
    }

    workbench.logout().await;
    println!("Logged out.");

    Ok(())
}
