//! Server configuration from command-line flags and environment variables.

use crate::task::services::DEFAULT_LIST_LIMIT;
use clap::Parser;
use std::net::{Ipv4Addr, SocketAddr};

/// Port used when neither `--port` nor `TODO_PORT` is given.
pub const DEFAULT_PORT: u16 = 7540;

/// Database file used when neither `--database` nor `TODO_DBFILE` is given.
pub const DEFAULT_DATABASE: &str = "scheduler.db";

/// Runtime settings for the scheduler server.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "scheduler_server", version, about = "Task scheduler HTTP server")]
pub struct ServerConfig {
    /// TCP port to listen on.
    #[arg(long, env = "TODO_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Path of the `SQLite` database file; created on first start.
    #[arg(long, env = "TODO_DBFILE", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// Maximum number of tasks returned by a listing.
    #[arg(
        long,
        env = "TODO_LIST_LIMIT",
        default_value_t = DEFAULT_LIST_LIMIT,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub list_limit: u32,

    /// Maximum number of pooled database connections.
    #[arg(
        long,
        env = "TODO_POOL_SIZE",
        default_value_t = 4,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub pool_size: u32,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, env = "TODO_LOG", default_value = "info")]
    pub log_filter: String,
}

impl ServerConfig {
    /// Returns the address to bind, on all IPv4 interfaces.
    #[must_use]
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
