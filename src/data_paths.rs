use std::path::{Path, PathBuf};

/// Default data directory (the current working directory)
pub const DEFAULT_DATA_DIR: &str = ".";

/// Credential file name, relative to the data directory
pub const CREDENTIALS_FILE: &str = "credentials.txt";

/// Per-user portfolio directory, relative to the data directory
pub const PORTFOLIO_DIR: &str = "portfolio_files";

/// Log directory, relative to the data directory
pub const LOGS_DIR: &str = "logs";

/// Optional configuration file, relative to the data directory
pub const CONFIG_FILE: &str = "config.json";

/// Helper struct to manage data paths
#[derive(Clone, Debug)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    /// Create a new DataPaths instance with the given root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root data directory
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Get the shared credentials file
    pub fn credentials_file(&self) -> PathBuf {
        self.root.join(CREDENTIALS_FILE)
    }

    /// Get the portfolio directory (one file per user)
    pub fn portfolio_dir(&self) -> PathBuf {
        self.root.join(PORTFOLIO_DIR)
    }

    /// Get the portfolio file for a specific user
    pub fn portfolio_file(&self, username: &str) -> PathBuf {
        self.portfolio_dir().join(format!("{}.txt", username))
    }

    /// Get the logs directory
    pub fn logs(&self) -> PathBuf {
        self.root.join(LOGS_DIR)
    }

    /// Get the optional configuration file
    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Ensure all directories exist
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(self.portfolio_dir())?;
        std::fs::create_dir_all(self.logs())?;
        Ok(())
    }
}
