//! gowebgen CLI tool

#![forbid(unsafe_code)]

mod commands;
mod prompt;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use commands::{NewArgs, NewCommand, TableArgs, TableCommand};
use gowebgen::config::GeneratorSettings;

#[derive(Parser)]
#[command(name = "gowebgen")]
#[command(version)]
#[command(about = "Generate Go web projects and CRUD slices", long_about = None)]
struct Cli {
    /// Settings file layered over `./gowebgen.toml`
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Defaults to `new` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new Go web project
    New(NewArgs),
    /// Add a model, DAO, service and handler for one table
    CreateTable(TableArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    gowebgen::observability::init(cli.verbose).context("Failed to initialize logging")?;

    let settings =
        GeneratorSettings::load(cli.config.as_deref()).context("Failed to load settings")?;
    tracing::debug!(search_dirs = ?settings.templates.search_dirs, "settings loaded");

    match cli.command {
        Some(Commands::New(args)) => NewCommand::new(args, settings).execute()?,
        Some(Commands::CreateTable(args)) => TableCommand::new(args, settings).execute()?,
        None => NewCommand::new(NewArgs::default(), settings).execute()?,
    }

    Ok(())
}
