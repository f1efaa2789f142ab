use std::io::Write;
use std::path::PathBuf;

use sqlrunner_core::config::load_config;
use sqlrunner_core::Workbench;

pub async fn run(config_path: Option<PathBuf>, username: Option<String>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let workbench = Workbench::from_config(&config)?;

    let username = match username {
        Some(username) => username,
        None => prompt("Username: ")?,
    };
    let password = prompt("Password: ")?;

    if workbench.login(&username, &password).await {
        println!("Logged in as {}.", username);
        let tables = workbench.catalog.tables().await;
        if !tables.is_empty() {
            println!("{} table(s) available.", tables.len());
        }
    } else {
        anyhow::bail!("Login failed: invalid credentials or backend unreachable");
    }

    Ok(())
}

pub(crate) fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{}", label);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
