//! CLI definitions
//!
//! Every site route has a command; `open` and `browse` take route paths.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::search::IndexBackend;

/// Exhibit CLI
#[derive(Parser, Debug)]
#[command(name = "exhibit")]
#[command(about = "Browse and search a knowledge-base biography exhibit", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalArgs,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

/// Options shared by every command; unset ones fall back to the config file
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Site base: a directory holding `data/` or an http(s) URL
    #[arg(long, global = true, env = "EXHIBIT_DATA")]
    pub data: Option<String>,

    /// Config file (defaults to <config dir>/exhibit/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Search backend: inverted or fuzzy
    #[arg(long, global = true, env = "EXHIBIT_BACKEND")]
    pub backend: Option<IndexBackend>,

    /// Request timeout in seconds for remote data
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Show property keys on entity pages
    #[arg(long, global = true)]
    pub show_property_info: bool,

    /// Mark new, updated and removed content
    #[arg(long, global = true)]
    pub show_changes: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Landing page
    Home,
    /// Gallery of people
    People(PeopleArgs),
    /// Entity detail page
    Entity(EntityArgs),
    /// Search the exhibit; quote phrases for exact matches
    Search(SearchArgs),
    /// About the exhibit
    About,
    /// News items
    News,
    /// Every place referenced by the exhibit
    Map(MapArgs),
    /// Data version banner
    Version,
    /// Render a site path such as /entity/Q42
    Open(OpenArgs),
    /// Interactive session reading paths from stdin
    Browse,
}

#[derive(Args, Debug, Clone)]
pub struct PeopleArgs {
    /// Entity list file under data/ (without .json)
    #[arg(short = 'l', long)]
    pub list: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct EntityArgs {
    /// Entity id (Q42)
    pub id: String,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Search terms; words are joined with spaces
    pub query: Vec<String>,
}

impl SearchArgs {
    pub fn term(&self) -> Option<String> {
        let joined = self.query.join(" ");
        (!joined.trim().is_empty()).then_some(joined)
    }
}

#[derive(Args, Debug, Clone)]
pub struct MapArgs {
    /// Print a GeoJSON FeatureCollection instead of Markdown
    #[arg(long)]
    pub geojson: bool,
}

#[derive(Args, Debug, Clone)]
pub struct OpenArgs {
    /// Site path
    pub path: String,
}
