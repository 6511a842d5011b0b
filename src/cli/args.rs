//! CLI argument definitions using clap
//!
//! Commands:
//! - filekeep create <path> [--content <text>]
//! - filekeep read <path>
//! - filekeep write <path> <content>
//! - filekeep append <path> <content>
//! - filekeep search <path> <item> [--ignore-case]
//! - filekeep count <path> <item> [--ignore-case]
//! - filekeep delete-content <path> <item>
//! - filekeep delete-file <path>
//! - filekeep find <name> [--root <dir>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// filekeep - create, edit, search and delete text files
#[derive(Parser, Debug)]
#[command(name = "filekeep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new file; fails if it already exists
    Create {
        path: PathBuf,
        /// Initial content, written after the creation preamble
        #[arg(long, default_value = "")]
        content: String,
    },

    /// Print a file's content
    Read { path: PathBuf },

    /// Overwrite a file
    Write { path: PathBuf, content: String },

    /// Append to a file
    Append { path: PathBuf, content: String },

    /// Find the first occurrence of a character or word
    Search {
        path: PathBuf,
        item: String,
        #[arg(long)]
        ignore_case: bool,
    },

    /// Count occurrences of a character or word
    Count {
        path: PathBuf,
        item: String,
        #[arg(long)]
        ignore_case: bool,
    },

    /// Remove every occurrence of a phrase from a file
    DeleteContent { path: PathBuf, item: String },

    /// Delete a file
    DeleteFile { path: PathBuf },

    /// Find a file by name under a directory tree
    Find {
        name: String,
        /// Directory to search (defaults to the configured search root)
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
