//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// cfgtree - Query lazily resolved configuration trees
#[derive(Parser, Debug)]
#[command(name = "cfgtree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root file or directory of the configuration tree
    #[arg(short, long, global = true, default_value = ".", env = "CFGTREE_ROOT")]
    pub root: PathBuf,

    /// TOML file with tree options (default file, aliases, disabled tags)
    #[arg(short, long, global = true, env = "CFGTREE_OPTIONS")]
    pub options: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the value at a path
    ///
    /// Strings are printed raw, everything else as JSON. A missing path is
    /// an error.
    ///
    /// Examples:
    ///   cfgtree get app/debug
    ///   cfgtree --root config get app/db/host    (key `host` of config/app/db.json)
    Get {
        /// Slash-delimited, case-insensitive path
        path: String,

        /// Print strings as JSON too
        #[arg(long)]
        json: bool,
    },

    /// Print whether a path exists; exits with status 1 when it does not
    Exists {
        /// Slash-delimited, case-insensitive path
        path: String,
    },

    /// List the keys at a path (the root when omitted)
    Keys {
        /// Slash-delimited, case-insensitive path
        path: Option<String>,
    },

    /// Export the subtree at a path (the root when omitted) as JSON
    Dump {
        /// Slash-delimited, case-insensitive path
        path: Option<String>,
    },

    /// List the type tags that have a loader
    Formats,
}
