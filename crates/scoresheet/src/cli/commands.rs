//! CLI subcommand arguments.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::scoresheet::{LicenceRole, SignatureRole};

/// Render command arguments.
#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Match snapshot (JSON)
    pub snapshot: PathBuf,

    /// Output directory (defaults to `render.output_dir`)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// JPEG logo printed in the header
    #[arg(long, value_name = "IMG")]
    pub logo: Option<PathBuf>,

    /// Remarks text; use `\n` separated lines
    #[arg(long, conflicts_with = "remarks_file")]
    pub remarks: Option<String>,

    /// Read remarks from a file
    #[arg(long, value_name = "FILE")]
    pub remarks_file: Option<PathBuf>,

    /// Print the document instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

/// Filename command arguments.
#[derive(Debug, Args)]
pub struct FilenameCommand {
    /// Match snapshot (JSON)
    pub snapshot: PathBuf,
}

/// Licence commands.
#[derive(Debug, Subcommand)]
pub enum LicenceCommand {
    /// Record a licence number
    Set {
        /// Match id
        game: String,
        /// Whose licence
        #[arg(value_enum)]
        role: LicenceRoleArg,
        /// Licence number
        value: String,
    },

    /// Show licences and signatories recorded for a match
    Show {
        /// Match id
        game: String,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Forget licences and signatures recorded for a match
    Clear {
        /// Match id
        game: String,
    },
}

/// Sign command arguments.
#[derive(Debug, Args)]
pub struct SignCommand {
    /// Match id
    pub game: String,

    /// Who signs
    #[arg(value_enum)]
    pub role: SignatureRoleArg,

    /// Printed name
    #[arg(short, long)]
    pub name: String,

    /// PNG of the handwritten signature
    #[arg(short, long, value_name = "PNG")]
    pub image: Option<PathBuf>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Licence role argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LicenceRoleArg {
    /// First referee
    Ref1,
    /// Second referee
    Ref2,
    /// Scorer
    Scorer,
    /// Home assistant coach
    HomeCoach,
    /// Guest assistant coach
    GuestCoach,
    /// Home staff
    HomeStaff,
    /// Guest staff
    GuestStaff,
}

impl From<LicenceRoleArg> for LicenceRole {
    fn from(arg: LicenceRoleArg) -> Self {
        match arg {
            LicenceRoleArg::Ref1 => Self::Referee1,
            LicenceRoleArg::Ref2 => Self::Referee2,
            LicenceRoleArg::Scorer => Self::Scorer,
            LicenceRoleArg::HomeCoach => Self::HomeAssistantCoach,
            LicenceRoleArg::GuestCoach => Self::GuestAssistantCoach,
            LicenceRoleArg::HomeStaff => Self::HomeStaff,
            LicenceRoleArg::GuestStaff => Self::GuestStaff,
        }
    }
}

/// Signature role argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SignatureRoleArg {
    /// First referee
    Referee1,
    /// Second referee
    Referee2,
    /// Scorer
    Scorer,
    /// Home captain
    HomeCaptain,
    /// Guest captain
    GuestCaptain,
    /// Home coach
    HomeCoach,
    /// Guest coach
    GuestCoach,
}

impl From<SignatureRoleArg> for SignatureRole {
    fn from(arg: SignatureRoleArg) -> Self {
        match arg {
            SignatureRoleArg::Referee1 => Self::Referee1,
            SignatureRoleArg::Referee2 => Self::Referee2,
            SignatureRoleArg::Scorer => Self::Scorer,
            SignatureRoleArg::HomeCaptain => Self::HomeCaptain,
            SignatureRoleArg::GuestCaptain => Self::GuestCaptain,
            SignatureRoleArg::HomeCoach => Self::HomeCoach,
            SignatureRoleArg::GuestCoach => Self::GuestCoach,
        }
    }
}
