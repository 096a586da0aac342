//! Command-line arguments for `quotebook`.

use clap::{Parser, Subcommand};
use quotebook_api::config::{DB_PATH_ENV, PASSWORD_ENV, USERNAME_ENV};
use quotebook_core::OrderNumber;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "quotebook")]
#[command(version, about = "Manage stored quotes from the terminal", long_about = None)]
pub struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = DB_PATH_ENV, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Login name presented for the session
    #[arg(long, global = true, env = USERNAME_ENV)]
    pub user: Option<String>,

    /// Password presented for the session
    #[arg(long, global = true, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: Option<String>,

    /// Write rolling log files into this directory
    #[arg(long, global = true, env = "QUOTEBOOK_LOG_DIR", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "QUOTEBOOK_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that the core library is linked
    Ping,
    /// List quote summaries, newest first
    List {
        /// One name, or "first last" in either order
        query: Option<String>,
    },
    /// Suggest customer names matching a fragment
    Suggest { term: String },
    /// Print one quote
    Show { order_number: OrderNumber },
    /// Create a quote from a JSON object
    Create {
        /// JSON file to read; `-` or omitted reads stdin
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Replace a quote's fields from a JSON object
    Update {
        order_number: OrderNumber,
        /// JSON file to read; `-` or omitted reads stdin
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Delete a quote
    Delete { order_number: OrderNumber },
}
