//! CLI command definitions for the `folk` binary.
//!
//! Uses clap derive macros for argument parsing. Commands are grouped by
//! entity (e.g., `folk tag create`, `folk user assign`).

pub mod admin;
pub mod category;
pub mod skill;
pub mod status;
pub mod table;
pub mod tag;
pub mod user;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use folksonomy_core::repository::SortOrder;
use folksonomy_types::tag::TagState;

/// Curate a folksonomy of tags, skills and the users who have them.
#[derive(Parser)]
#[command(name = "folk", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Data directory (defaults to $FOLKSONOMY_DATA_DIR, then ~/.folksonomy).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage generic tags (create, list, show, update, delete, accept, reject).
    Tag {
        #[command(subcommand)]
        action: tag::TagCommand,
    },

    /// Manage skills and their categories.
    Skill {
        #[command(subcommand)]
        action: skill::SkillCommand,
    },

    /// Manage skill categories.
    Category {
        #[command(subcommand)]
        action: category::CategoryCommand,
    },

    /// Manage users and the skills assigned to them.
    User {
        #[command(subcommand)]
        action: user::UserCommand,
    },

    /// Print the admin configuration of every registered model.
    Admin {
        /// Only this model (e.g. "tag", "user_skill").
        model: Option<String>,
    },

    /// Show counts per model and approval state.
    Status,

    /// Start the admin REST API server.
    Serve {
        /// Port to listen on (defaults to the configured port).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to the configured host).
        #[arg(long)]
        host: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Listing options shared by tags and skills.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only records in this state (proposed, accepted, rejected).
    #[arg(long)]
    pub state: Option<String>,

    /// Only records that are not aliases.
    #[arg(long, conflicts_with = "aliases")]
    pub roots: bool,

    /// Only aliases.
    #[arg(long)]
    pub aliases: bool,

    /// Case-insensitive search over the admin search fields.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort by field (name, state, created_at, updated_at).
    #[arg(long, default_value = "name")]
    pub sort: String,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,

    /// Maximum rows (defaults to the configured list limit).
    #[arg(long)]
    pub limit: Option<i64>,

    #[arg(long)]
    pub offset: Option<i64>,
}

impl ListArgs {
    pub fn parsed_state(&self) -> anyhow::Result<Option<TagState>> {
        self.state
            .as_deref()
            .map(|s| s.parse::<TagState>().map_err(|e| anyhow::anyhow!(e)))
            .transpose()
    }

    /// `Some(true)` for --roots, `Some(false)` for --aliases.
    pub fn root_only(&self) -> Option<bool> {
        match (self.roots, self.aliases) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    pub fn sort_order(&self) -> SortOrder {
        if self.desc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}
