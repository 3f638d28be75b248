use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::models::CategoryTable;

/// Overrides the database location when set.
pub(crate) const DB_PATH_ENV: &str = "FINTRACK_DB";

const DB_FILE_NAME: &str = "fintrack.db";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) categories: CategoryTable,
}

impl Config {
    pub(crate) fn load() -> Result<Self> {
        let db_path = match std::env::var_os(DB_PATH_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => default_db_path()?,
        };
        Ok(Self {
            db_path,
            categories: CategoryTable::default(),
        })
    }
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "fintrack", "fintrack")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join(DB_FILE_NAME))
}

/// Install the global log subscriber. Output goes to stderr so it never mixes
/// with command output; `RUST_LOG` overrides the default `warn` level.
pub(crate) fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second call (tests) leaves the first subscriber in place.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
