//! `vbr-scoresheet` - Printable score sheets for recorded volleyball matches
//!
//! This library renders a finished match into a self-contained HTML score
//! sheet and keeps the licences and signatures collected at the table.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod scoresheet;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use game::{StoredGame, StoredGameView};
pub use logging::init_logging;
pub use scoresheet::{
    render, score_sheet_filename, RenderSettings, ScoreSheet, ScoreSheetBuilder,
    ScoreSheetOptions,
};
pub use storage::{Storage, StorageStats};
