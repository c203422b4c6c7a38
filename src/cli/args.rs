//! Command line argument parsing.

use crate::version::BumpLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Build and distribution pipeline for the IRKit Updater desktop app
#[derive(Parser, Debug)]
#[command(
    name = "irkit-build",
    version,
    about = "Build and distribution pipeline for the IRKit Updater desktop app",
    long_about = "Builds the platform-agnostic Build Tree (stylesheets, scripts, bundled \
dependencies, static assets) and packages it into per-platform zip distributables \
via electron-packager.

Usage:
  irkit-build build
  irkit-build dist
  irkit-build bump patch
  irkit-build watch"
)]
pub struct Args {
    /// Project root containing package.json and the source trees
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Print per-task progress
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Pipeline operations.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Populate the Build Tree (styles, HTML, scripts, modules, assets)
    Build,
    /// Remove the Build Tree and prior distribution artifacts
    Clean,
    /// Clean, then populate the Build Tree
    Cleanbuild,
    /// Clean, build, package every platform target and notify
    Dist,
    /// Increment the manifest version, commit and tag
    Bump {
        /// Version field to increment
        #[arg(value_enum)]
        level: BumpLevel,
    },
    /// Extract translatable strings and convert catalogs to JSON
    L10n,
    /// Rebuild stylesheets on change and serve live-reload signals
    Watch {
        /// Address the live-reload broadcaster binds to
        #[arg(long, default_value = "127.0.0.1:35729")]
        addr: String,
    },
    /// Send the completion notification (for testing the notifier setup)
    Notify,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
