//! famctl CLI - family data access for the guardian management app
//!
//! - Family listing and detail queries (`families` subcommand)
//! - Schema migrations (`migrate`)
//! - HTTP API server (`serve`)

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "famctl",
    author,
    version,
    about = "Family, child and tutor records for the guardian management app",
    long_about = "Query families (parents, children and tutors) from Postgres, \
                  manage the schema, and serve the family HTTP API."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Query families (list, show)
    Families(commands::families::FamiliesArgs),
    /// Create or update the database schema
    Migrate(commands::migrate::MigrateArgs),
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so clap `env` fallbacks see .env values
    let dotenv = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    dotenv.log();

    match cli.command {
        Commands::Families(args) => commands::run_families(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Serve(args) => commands::run_serve(args).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_family_show() {
        let cli = Cli::try_parse_from(["famctl", "families", "show", "42", "--format", "json"])
            .unwrap();
        match cli.command {
            Commands::Families(args) => {
                assert_eq!(args.format, commands::families::OutputFormat::Json);
                assert!(matches!(
                    args.command,
                    commands::families::FamiliesCommand::Show { user_id: 42 }
                ));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
