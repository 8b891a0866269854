//! CLI interface for edgegate

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "edgegate")]
#[command(version)]
#[command(about = "Session-aware edge gate for the academy web portal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new edgegate.toml configuration file
    Init,

    /// Run the gate in front of the configured upstream
    Serve {
        /// Bind host (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Evaluate the policy for a hypothetical request
    Decide {
        /// Request path, e.g. /dashboard/courses
        path: String,

        /// Role of the authenticated identity; omit for anonymous
        #[arg(short, long)]
        role: Option<String>,
    },

    /// Print the ordered policy rule table
    Routes {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Audit the policy for redirect cycles and unresolved chains
    Check,

    /// Mint a development access token (production tokens come from the auth service)
    Token {
        /// Role claim for the token
        #[arg(short, long)]
        role: String,

        /// Subject claim; a random UUID when omitted
        #[arg(short, long)]
        subject: Option<String>,

        /// Token lifetime in seconds (defaults to the configured access TTL)
        #[arg(long)]
        ttl: Option<i64>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
