//! Launch options for Chatkeep
//!
//! This module defines the launch options of the interactive chat
//! front-end using clap's derive API. There are no batch subcommands:
//! every invocation starts an interactive session.

use clap::Parser;
use std::path::PathBuf;

/// Chatkeep - terminal chat with saved transcripts
///
/// Talk to a hosted model and keep each conversation as a named
/// transcript file you can reopen or delete later.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatkeep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory holding saved transcripts (overrides history.dir)
    #[arg(long, value_name = "DIR")]
    pub history_dir: Option<PathBuf>,

    /// Override the provider from config (gemini, ollama)
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Override the model of the selected provider
    #[arg(short, long)]
    pub model: Option<String>,

    /// Start with a saved transcript loaded (file name or 1-based index)
    #[arg(short, long, value_name = "REF")]
    pub open: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed launch options
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            history_dir: None,
            provider: None,
            model: None,
            open: None,
        }
    }
}
