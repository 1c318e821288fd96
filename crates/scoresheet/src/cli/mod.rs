//! Command-line interface for the `vbrsheet` binary.

pub mod actions;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

pub use commands::{
    ConfigCommand, FilenameCommand, LicenceCommand, LicenceRoleArg, RenderCommand, SignCommand,
    SignatureRoleArg,
};

/// vbrsheet - Render volleyball score sheets
///
/// Turns a recorded match snapshot into a printable HTML score sheet, with
/// licences and signatures kept in a local store.
#[derive(Debug, Parser)]
#[command(name = "vbrsheet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a score sheet
    Render(RenderCommand),

    /// Print the file name a score sheet would get
    Filename(FilenameCommand),

    /// Manage licence numbers
    #[command(subcommand)]
    Licence(LicenceCommand),

    /// Record a signature
    Sign(SignCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
