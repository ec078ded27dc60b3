//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod clone;
pub mod doctor;
pub mod list;

use anyhow::Result;
use clap::Subcommand;

use crate::core::settings::BuilderSettings;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clone package sources without building
    Clone {
        /// Package to clone (clones every package in the build order if omitted)
        package: Option<String>,
    },

    /// Pull and build a single package unconditionally
    Build {
        /// Package name
        package: String,
    },

    /// Build packages whose latest tag changed on pull
    BuildUpdated {
        /// Build every package regardless of tag changes
        #[arg(long)]
        all: bool,
    },

    /// Pull and build every package in the build order
    BuildAll,

    /// Show the build order
    List,

    /// Check system dependencies
    Doctor,
}

impl Commands {
    /// Execute the command
    pub fn run(self, settings: &BuilderSettings) -> Result<()> {
        match self {
            Self::Clone { package } => clone::execute(settings, package.as_deref()),
            Self::Build { package } => build::execute(settings, build::BuildTarget::One(package)),
            Self::BuildUpdated { all } => {
                build::execute(settings, build::BuildTarget::Updated { new_only: !all })
            }
            Self::BuildAll => build::execute(settings, build::BuildTarget::All),
            Self::List => list::execute(settings),
            Self::Doctor => doctor::execute(settings),
        }
    }
}
