//! exhibit: terminal front end for knowledge-base biography exhibits
//!
//! Reads the pre-generated JSON of an exhibit site (a local build directory
//! or the deployed URL) and renders each route as Markdown:
//! - `people`, `entity`, `map`, `about`, `news`, `home` for single pages
//! - `search` for quoted-phrase aware search over the site's index
//! - `browse` for an interactive session

mod cli;
mod config;
mod data;
mod error;
mod http;
mod model;
mod properties;
mod router;
mod search;
mod session;
mod views;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Settings;
use error::AppError;
use router::Route;
use session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let Some(command) = cli.command else {
        eprintln!("Error: No command specified. Use --help for usage information.");
        std::process::exit(1);
    };

    // Handle result and exit with appropriate code
    match run_command(command, &cli.global).await {
        Ok(Some(output)) => {
            println!("{}", output);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

/// Execute one command; `None` when the command wrote its own output
async fn run_command(command: Commands, global: &cli::GlobalArgs) -> Result<Option<String>> {
    let settings = Settings::resolve(global)?;
    let mut session = Session::open(&settings).await?;

    let route = match command {
        Commands::Home => Route::Home,
        Commands::People(args) => Route::People { list: args.list },
        Commands::Entity(args) => Route::Entity {
            id: args.id,
            list: None,
        },
        Commands::Search(args) => Route::Search { term: args.term() },
        Commands::About => Route::About,
        Commands::News => Route::News,
        Commands::Map(args) if args.geojson => {
            let index = session.loader().source().location_information().await?;
            let places = properties::process_locations(&index);
            let collection = views::map::geojson(&places);
            return Ok(Some(
                serde_json::to_string_pretty(&collection).context("Failed to serialize GeoJSON")?,
            ));
        }
        Commands::Map(_) => Route::Map,
        Commands::Version => {
            return Ok(Some(session.version().map(str::to_string).unwrap_or_else(|| {
                format!("exhibit {} (no data version banner)", env!("CARGO_PKG_VERSION"))
            })));
        }
        Commands::Open(args) => Route::parse(&args.path)?,
        Commands::Browse => {
            session.browse().await?;
            return Ok(None);
        }
    };

    Ok(Some(session.visit(route).await?))
}

/// Map an error to the process exit code
fn get_exit_code(err: &anyhow::Error) -> i32 {
    if let Some(app_error) = err.downcast_ref::<AppError>() {
        return app_error.exit_code();
    }

    let err_str = err.to_string().to_lowercase();

    if err_str.contains("invalid") || err_str.contains("config") {
        1 // Invalid arguments or configuration
    } else if err_str.contains("network") || err_str.contains("connection") {
        2 // Network or fetch error
    } else if err_str.contains("not found") {
        3 // Not found error
    } else if err_str.contains("timeout") {
        4 // Timeout error
    } else {
        5 // Other application errors
    }
}
