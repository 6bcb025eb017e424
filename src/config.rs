//! Server configuration from environment variables.
//!
//! HOST (default 0.0.0.0), PORT (default 8080), LEAGUE_DATA_FILE (optional JSON snapshot path),
//! SNAPSHOT_INTERVAL_SECS (default 300). Unparseable values fall back to the default.

use std::path::PathBuf;
use std::time::Duration;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_snapshot_interval() -> Duration {
    Duration::from_secs(300)
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Where league state is loaded from and snapshotted to. None keeps everything in memory.
    pub data_file: Option<PathBuf>,
    pub snapshot_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: None,
            snapshot_interval: default_snapshot_interval(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup` (variable name -> value).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = non_empty("HOST").unwrap_or_else(default_host);
        let port = non_empty("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or_else(default_port);
        let data_file = non_empty("LEAGUE_DATA_FILE").map(PathBuf::from);
        let snapshot_interval = non_empty("SNAPSHOT_INTERVAL_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
            .unwrap_or_else(default_snapshot_interval);

        Self {
            host,
            port,
            data_file,
            snapshot_interval,
        }
    }

    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
