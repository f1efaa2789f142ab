pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sqlrunner")]
#[command(author, version, about = "SQL Runner CLI - query gateway and workbench for a tabular backend")]
pub struct Cli {
    /// Path to config file (checked in order: local config.toml, ~/.config/sqlrunner/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the query gateway server
    Start {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Open an interactive query session
    Shell,

    /// Log in and persist the session credential
    Login {
        /// Username (prompted for when omitted)
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Log out and clear the persisted credential
    Logout,

    /// List tables, or show one table's schema and sample rows
    Tables {
        /// Table name to inspect
        table: Option<String>,
    },

    /// Execute a single query
    Exec {
        /// Query text
        query: String,
    },

    /// Show gateway and session status
    Status,
}
