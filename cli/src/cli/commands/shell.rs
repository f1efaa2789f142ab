use std::io::Write;
use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};

use sqlrunner_core::config::load_config;
use sqlrunner_core::Workbench;

use super::login::prompt;
use super::{print_outcome, print_table_detail};

const MAX_LOGIN_ATTEMPTS: usize = 3;

pub async fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let workbench = Workbench::from_config(&config)?;
    workbench.startup().await;

    if !workbench.session.is_authenticated().await {
        let mut logged_in = false;
        for _ in 0..MAX_LOGIN_ATTEMPTS {
            let username = prompt("Username: ")?;
            let password = prompt("Password: ")?;
            if workbench.login(&username, &password).await {
                logged_in = true;
                break;
            }
            println!("Login failed.");
        }
        if !logged_in {
            anyhow::bail!("Could not log in after {} attempts", MAX_LOGIN_ATTEMPTS);
        }
    }

    let tables = workbench.catalog.tables().await;
    if !tables.is_empty() {
        println!("Connected. {} table(s) available.", tables.len());
    } else {
        println!("Connected.");
    }
    println!("Type SQL to execute; \\tables, \\table NAME, \\history, \\clear, \\quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("sql> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line {
            "" => continue,
            "\\quit" | "\\q" => break,
            "\\tables" => {
                let tables = workbench.catalog.list_tables().await;
                if tables.is_empty() {
                    println!("No tables available.");
                } else {
                    for name in tables {
                        println!("{}", name);
                    }
                }
            }
            "\\history" => {
                let entries = workbench.history.entries().await;
                if entries.is_empty() {
                    println!("No queries yet.");
                }
                for entry in entries {
                    let status = if entry.success { "ok " } else { "err" };
                    match entry.execution_time {
                        Some(seconds) => println!(
                            "[{:>3}] {} {:.4}s  {}",
                            entry.id, status, seconds, entry.query
                        ),
                        None => println!("[{:>3}] {}         {}", entry.id, status, entry.query),
                    }
                }
            }
            "\\clear" => {
                workbench.history.clear().await;
                println!("History cleared.");
            }
            _ if line.starts_with("\\table ") => {
                let name = line["\\table ".len()..].trim();
                match workbench.catalog.select_table(name).await {
                    Some(detail) => print_table_detail(&detail),
                    None => println!("Table {:?} not available.", name),
                }
            }
            _ if line.starts_with('\\') => {
                println!("Unknown command: {}", line);
            }
            query => {
                match workbench.runner.execute(query).await {
                    Some(outcome) => print_outcome(&outcome),
                    // Empty text never reaches here; this is the busy case.
                    None => println!("A query is already running."),
                }
            }
        }
    }

    println!("Bye.");
    Ok(())
}
