use clap::Parser;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sqlrunner=info".parse()?)
                .add_directive("sqlrunner_core=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Start { port } => {
            cli::commands::start::run(cli.config, port).await?;
        }
        Commands::Shell => {
            cli::commands::shell::run(cli.config).await?;
        }
        Commands::Login { username } => {
            cli::commands::login::run(cli.config, username).await?;
        }
        Commands::Logout => {
            cli::commands::logout::run(cli.config).await?;
        }
        Commands::Tables { table } => {
            cli::commands::tables::run(cli.config, table).await?;
        }
        Commands::Exec { query } => {
            cli::commands::exec::run(cli.config, query).await?;
        }
        Commands::Status => {
            cli::commands::status::run(cli.config).await?;
        }
    }

    Ok(())
}
