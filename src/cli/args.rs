//! CLI argument definitions using clap
//!
//! Commands:
//! - querystore serve [--config <path>] [--server <addr>] [--port <n>]
//! - querystore check [--config <path>] [--server <addr>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::config::Overrides;
use crate::observability::LogFormat;

/// querystore - stores rule-based query documents in a JSON document store
#[derive(Parser, Debug)]
#[command(name = "querystore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Document store address (host:port)
    #[arg(long)]
    pub server: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service until SIGINT or SIGTERM
    Serve {
        #[command(flatten)]
        common: CommonArgs,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Keep documents in process instead of the configured store
        #[arg(long)]
        memory_store: bool,
    },

    /// Connect, authenticate and ping the document store
    Check {
        #[command(flatten)]
        common: CommonArgs,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

impl CommonArgs {
    /// Config overrides carried by these flags
    pub fn overrides(&self, port: Option<u16>) -> Overrides {
        Overrides {
            store_address: self.server.clone(),
            port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from([
            "querystore",
            "serve",
            "--server",
            "redis.local:6380",
            "--port",
            "9000",
            "--log-format",
            "text",
        ])
        .unwrap();

        match cli.command {
            Command::Serve {
                common,
                port,
                memory_store,
            } => {
                assert_eq!(common.server.as_deref(), Some("redis.local:6380"));
                assert_eq!(common.log_format, LogFormat::Text);
                assert_eq!(port, Some(9000));
                assert!(!memory_store);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_check_defaults() {
        let cli = Cli::try_parse_from(["querystore", "check"]).unwrap();
        match cli.command {
            Command::Check { common } => {
                assert!(common.config.is_none());
                assert!(common.server.is_none());
                assert_eq!(common.log_format, LogFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        assert!(Cli::try_parse_from(["querystore", "serve", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
