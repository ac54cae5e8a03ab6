//! CLI commands and argument parsing

use crate::config::{ENV_API_TOKEN, ENV_BASE_URL};
use crate::schema::ResourceKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Make.com resource reconciliation CLI
#[derive(Parser, Debug)]
#[command(name = "make-provider")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API token
    #[arg(long, global = true, env = ENV_API_TOKEN, hide_env_values = true)]
    pub api_token: Option<String>,

    /// API base URL
    #[arg(long, global = true, env = ENV_BASE_URL)]
    pub base_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a resource
    Create {
        /// Resource kind (`scenario`, `data_store`, `make_team`, ...)
        kind: ResourceKind,

        /// Record JSON file, or `-` for stdin
        #[arg(short, long)]
        record: PathBuf,
    },

    /// Refresh a resource from the remote
    Read {
        kind: ResourceKind,

        #[arg(long)]
        id: String,
    },

    /// Update an existing resource
    Update {
        kind: ResourceKind,

        #[arg(long)]
        id: String,

        /// Record JSON file, or `-` for stdin
        #[arg(short, long)]
        record: PathBuf,
    },

    /// Delete a resource (a missing resource counts as deleted)
    Delete {
        kind: ResourceKind,

        #[arg(long)]
        id: String,
    },

    /// Bring an existing resource under management
    Import {
        kind: ResourceKind,

        #[arg(long)]
        id: String,
    },

    /// Fetch a resource without managing it
    Lookup {
        kind: ResourceKind,

        #[arg(long)]
        id: String,
    },

    /// Show the attribute descriptor for a kind
    Schema { kind: ResourceKind },
}

impl Commands {
    /// Resource kind the command targets
    pub fn kind(&self) -> ResourceKind {
        match self {
            Commands::Create { kind, .. }
            | Commands::Read { kind, .. }
            | Commands::Update { kind, .. }
            | Commands::Delete { kind, .. }
            | Commands::Import { kind, .. }
            | Commands::Lookup { kind, .. }
            | Commands::Schema { kind } => *kind,
        }
    }
}
