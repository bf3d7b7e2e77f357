//! Command line definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "kanban", version, about = "Multi-user kanban boards over SQLite")]
pub struct Cli {
    /// Config file (TOML, YAML or JSON); defaults to ./kanban.{toml,yaml,json}
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Database file, overriding the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Id of the user the command runs as
    #[arg(long, global = true, env = "KANBAN_USER", value_name = "ID")]
    pub user: Option<i64>,

    /// Debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Errors only
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the database and schema
    Init,

    /// Run an operation, e.g. `kanban exec "move task" '{"id":3,"toColumnId":2,"newIndex":0}'`
    Exec {
        /// Operation as "verb noun"
        op: String,
        /// JSON parameters; `-` reads them from stdin
        params: Option<String>,
    },

    /// List supported operations
    Ops,

    /// Show recent activity, newest first
    Activity {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}
