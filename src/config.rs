//! Client configuration resolved from command-line flags and environment

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::controller::DEFAULT_MAX_RESULTS;
use crate::history::HISTORY_CAPACITY;
use crate::utils::get_data_dir;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Global flags shared by every subcommand
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Base URL of the episode lookup service
    #[arg(long, global = true, env = "EPISODE_FINDER_SERVER", default_value = DEFAULT_SERVER_URL)]
    pub server: String,

    /// Number of episodes requested for keyword searches
    #[arg(
        long,
        global = true,
        env = "EPISODE_FINDER_MAX_RESULTS",
        default_value_t = DEFAULT_MAX_RESULTS
    )]
    pub max_results: usize,

    /// Request timeout in seconds
    #[arg(
        long,
        global = true,
        env = "EPISODE_FINDER_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub timeout: u64,

    /// Directory holding the search history
    #[arg(long, global = true, env = "EPISODE_FINDER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_url: String,
    pub max_results: usize,
    pub history_capacity: usize,
    pub timeout: Duration,
    pub data_dir: PathBuf,
}

impl ClientConfig {
    pub fn from_args(args: &ConfigArgs) -> Result<Self> {
        let data_dir = match &args.data_dir {
            Some(dir) => dir.clone(),
            None => get_data_dir()?,
        };

        Ok(Self {
            server_url: args.server.trim().to_string(),
            max_results: args.max_results.max(1),
            history_capacity: HISTORY_CAPACITY,
            timeout: Duration::from_secs(args.timeout.max(1)),
            data_dir,
        })
    }

    /// Log file used while the interactive UI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("episode-finder.log")
    }
}
