use std::path::PathBuf;

use sqlrunner_core::config::load_config;
use sqlrunner_core::Workbench;

use super::print_table_detail;

pub async fn run(config_path: Option<PathBuf>, table: Option<String>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let workbench = Workbench::from_config(&config)?;

    if !workbench.session.is_authenticated().await {
        anyhow::bail!("Not logged in. Run `sqlrunner login` first.");
    }

    match table {
        Some(name) => match workbench.catalog.select_table(&name).await {
            Some(detail) => print_table_detail(&detail),
            None => anyhow::bail!("Table {:?} not available", name),
        },
        None => {
            let tables = workbench.catalog.list_tables().await;
            if tables.is_empty() {
                println!("No tables available.");
                return Ok(());
            }

            for name in tables {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
