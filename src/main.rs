//! FencePlan command line front end.
//!
//! Plans a project file against a pricing catalog and prints the plan as
//! pretty JSON.

use anyhow::{Context, Result};
use clap::Parser;
use fenceplan::settings::Config;
use fenceplan::{init_logging, plan_project, Catalog, Project, BUILD_DATE, VERSION};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "fenceplan")]
#[command(about = "Plan and price a fence project against a catalog")]
struct Cli {
    /// Project JSON saved by the editor
    project: PathBuf,

    /// Pricing catalog JSON
    catalog: PathBuf,

    /// Engine configuration (.json or .toml); the platform config file is
    /// used when present otherwise
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print only the quote
    #[arg(long)]
    quote_only: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => match Config::default_path() {
            Ok(path) => Config::load_or_default(&path)
                .with_context(|| format!("loading config {}", path.display())),
            Err(_) => Ok(Config::default()),
        },
    }
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    info!(version = VERSION, build_date = BUILD_DATE, "fenceplan");

    let config = load_config(cli.config.as_ref())?;

    let catalog = Catalog::load(&cli.catalog)
        .with_context(|| format!("loading catalog {}", cli.catalog.display()))?;

    let content = std::fs::read_to_string(&cli.project)
        .with_context(|| format!("reading project {}", cli.project.display()))?;
    let project: Project = serde_json::from_str(&content)
        .with_context(|| format!("parsing project {}", cli.project.display()))?;

    let plan = plan_project(&project, &catalog, &config).context("planning project")?;

    let output = if cli.quote_only {
        serde_json::to_string_pretty(&plan.quote)?
    } else {
        serde_json::to_string_pretty(&plan)?
    };
    println!("{}", output);
    Ok(())
}
