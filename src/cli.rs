//! Command-line interface definitions
//!
//! Provides CLI argument parsing using clap for the preset engine.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::settings::CountMode;

/// Manage reading speed presets and settings
#[derive(Parser, Debug, Clone)]
#[command(name = "readspeed-presets")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration directory (settings document and editable presets)
    #[arg(long, value_name = "DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Directory with the bundled default preset files
    #[arg(long, value_name = "DIR", global = true)]
    pub bundled_dir: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Enable diagnostic mode (auto-log to temp file)
    #[arg(short, long, global = true)]
    pub diagnostic: bool,

    /// Log directory (implies diagnostic mode)
    #[arg(short = 'l', long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log file name (implies diagnostic mode)
    #[arg(short = 'f', long, value_name = "FILE", global = true)]
    pub log_file: Option<String>,

    /// Increase logging verbosity (-v, -vv)
    /// Note: RUST_LOG env var takes priority over this flag
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors)
    /// Note: RUST_LOG env var takes priority over this flag
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Language selection shared by the preset commands
#[derive(Args, Debug, Clone, Default)]
pub struct LangArg {
    /// Language tag (defaults to the selected language)
    #[arg(long = "lang", value_name = "TAG")]
    pub lang: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the normalized settings document
    Show,

    /// List the presets shown for a language
    List(LangArg),

    /// Add a preset (replaces a user preset with the same name)
    Create {
        #[command(flatten)]
        lang: LangArg,
        #[arg(long)]
        name: String,
        #[arg(long)]
        wpm: u32,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a user preset or hide a default
    Delete {
        #[command(flatten)]
        lang: LangArg,
        name: String,
    },

    /// Replace a preset, optionally renaming it
    Edit {
        #[command(flatten)]
        lang: LangArg,
        /// Name of the preset being edited
        original: String,
        /// New name (defaults to the original name)
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        wpm: u32,
        #[arg(long)]
        description: Option<String>,
    },

    /// Remove overrides of defaults and show hidden defaults again
    Restore(LangArg),

    /// Copy bundled default preset files into the config directory
    Seed,

    /// Select the active language
    SetLanguage { tag: String },

    /// Select the word counting mode
    SetCountMode { mode: CountModeArg },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountModeArg {
    Precise,
    Simple,
}

impl From<CountModeArg> for CountMode {
    fn from(arg: CountModeArg) -> Self {
        match arg {
            CountModeArg::Precise => CountMode::Precise,
            CountModeArg::Simple => CountMode::Simple,
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config_dir: None,
            bundled_dir: None,
            yes: false,
            diagnostic: false,
            log_dir: None,
            log_file: None,
            verbose: 0,
            quiet: false,
            command: Command::Show,
        }
    }
}

impl Cli {
    /// Check if diagnostic mode is enabled (output to file)
    ///
    /// Returns true if `--diagnostic` is set, or if `--log-dir` or `--log-file` is specified.
    pub fn is_diagnostic(&self) -> bool {
        self.diagnostic || self.log_dir.is_some() || self.log_file.is_some()
    }

    /// Get the log level based on CLI arguments
    ///
    /// - `--quiet`: ERROR
    /// - default: INFO
    /// - `-v`: DEBUG
    /// - `-vv` or more: TRACE
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else {
            match self.verbose {
                0 => tracing::Level::INFO,
                1 => tracing::Level::DEBUG,
                _ => tracing::Level::TRACE,
            }
        }
    }

    /// Get the log file path for diagnostic mode
    ///
    /// Defaults to `readspeed-presets-{timestamp}.log` in the system temp directory.
    pub fn log_path(&self) -> PathBuf {
        let dir = self
            .log_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir);

        let filename = self.log_file.clone().unwrap_or_else(|| {
            let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            format!("readspeed-presets-{timestamp}.log")
        });

        dir.join(filename)
    }
}
