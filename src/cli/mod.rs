//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::core::settings::BuilderSettings;
use crate::infra::dirs::SkaDirs;
use commands::Commands;

/// ska-builder - Build Ska conda packages in build order
///
/// Clones and updates package sources and runs `conda build` for each
/// package listed in the build order file.
#[derive(Parser, Debug)]
#[command(name = "ska-builder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Settings file (defaults to config.toml in the config directory)
    #[arg(long, global = true, env = "SKA_BUILDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Work root for source checkouts and build output
    #[arg(long, global = true, env = "SKA_ROOT")]
    pub root: Option<PathBuf>,

    /// Directory containing pkg_defs/ and build_order.txt
    #[arg(long, global = true, env = "SKA_RECIPES_DIR")]
    pub recipes: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Resolve settings from the settings file and command-line overrides
    pub fn settings(&self) -> Result<BuilderSettings> {
        let settings = match &self.config {
            Some(path) => BuilderSettings::load_from_path(path),
            None => BuilderSettings::load(&SkaDirs::new()),
        }
        .context("Failed to load settings")?;

        Ok(settings
            .with_root(self.root.clone())
            .with_recipes(self.recipes.clone()))
    }

    /// Execute the CLI command
    pub fn run(mut self) -> Result<()> {
        if let Some(cmd) = self.command.take() {
            let settings = self.settings()?;
            cmd.run(&settings)
        } else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
