use std::path::PathBuf;

use sqlrunner_core::config::{default_config_path, expand_path, load_config};
use sqlrunner_core::Workbench;

pub async fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let session_dir = expand_path(&config.session.directory);

    println!("SQL Runner Status");
    println!("=================");
    println!();
    println!("Configuration:");
    println!("  Config file: {:?}", default_config_path());
    println!("  Session dir: {:?}", session_dir);
    println!();
    println!("Server settings:");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);
    println!("  Backend: {}", config.backend.base_url);
    println!();

    let workbench = Workbench::from_config(&config)?;
    if workbench.session.is_authenticated().await {
        println!("Session: logged in");
    } else {
        println!("Session: not logged in");
    }

    // Check if the gateway is reachable
    println!();
    let url = format!("http://{}:{}/healthz", config.server.host, config.server.port);
    match reqwest::get(&url).await {
        Ok(resp) if resp.status().is_success() => {
            println!("Gateway: RUNNING");
        }
        _ => {
            println!("Gateway: NOT RUNNING");
        }
    }

    Ok(())
}
