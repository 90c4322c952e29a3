//! Engine configuration.
//!
//! Stores configuration in JSON format at `~/.haltctl/config.json`.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::StopSignal;
use crate::error::{Error, Result};

/// Fixed wait granted after a failed signal send, after a failed kill,
/// and the floor for the wait after a successful kill.
pub const GRACE_PERIOD: Duration = Duration::from_secs(2);

/// Engine-wide settings, consulted only when neither the caller nor the
/// process supply a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Stop timeout in seconds. Negative means never force.
    #[serde(default = "default_stop_timeout")]
    pub default_stop_timeout: i64,

    /// Signal sent first when a process has none configured.
    #[serde(default)]
    pub default_stop_signal: StopSignal,

    /// How long to wait for the exit after a successful kill, in seconds.
    #[serde(default = "default_kill_wait")]
    pub kill_wait_seconds: u64,
}

fn default_stop_timeout() -> i64 {
    10
}

fn default_kill_wait() -> u64 {
    10
}

impl EngineConfig {
    /// Bound for the post-kill wait; never shorter than [`GRACE_PERIOD`].
    pub fn kill_wait(&self) -> Duration {
        Duration::from_secs(self.kill_wait_seconds).max(GRACE_PERIOD)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_stop_timeout: default_stop_timeout(),
            default_stop_signal: StopSignal::default(),
            kill_wait_seconds: default_kill_wait(),
        }
    }
}

/// Configuration store for engine settings.
///
/// Handles reading and writing configuration to `~/.haltctl/config.json`.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a new config store with the default path.
    ///
    /// Default path: `~/.haltctl/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        let config_path = home.join(".haltctl").join("config.json");

        Ok(Self { config_path })
    }

    /// Create a config store with a custom path (for testing).
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub async fn load(&self) -> Result<EngineConfig> {
        if !self.config_path.exists() {
            return Ok(EngineConfig::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub async fn save(&self, config: &EngineConfig) -> Result<()> {
        if let Some(config_dir) = self.config_path.parent() {
            fs::create_dir_all(config_dir)
                .await
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        // Write atomically by writing to temp file then renaming
        let temp_path = self.config_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to create temp config file: {}", e)))?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| Error::Config(format!("Failed to sync config: {}", e)))?;

        fs::rename(&temp_path, &self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to rename config file: {}", e)))?;

        Ok(())
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Get the default stop timeout in seconds.
    pub async fn get_default_stop_timeout(&self) -> Result<i64> {
        Ok(self.load().await?.default_stop_timeout)
    }

    /// Set the default stop timeout in seconds. Negative disables forced kills.
    pub async fn set_default_stop_timeout(&self, seconds: i64) -> Result<()> {
        let mut config = self.load().await?;
        config.default_stop_timeout = seconds;
        self.save(&config).await
    }

    /// Get the default stop signal.
    pub async fn get_default_stop_signal(&self) -> Result<StopSignal> {
        Ok(self.load().await?.default_stop_signal)
    }

    /// Set the default stop signal.
    pub async fn set_default_stop_signal(&self, signal: StopSignal) -> Result<()> {
        let mut config = self.load().await?;
        config.default_stop_signal = signal;
        self.save(&config).await
    }

    /// Set the post-kill wait in seconds.
    pub async fn set_kill_wait_seconds(&self, seconds: u64) -> Result<()> {
        let mut config = self.load().await?;
        config.kill_wait_seconds = seconds;
        self.save(&config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_store() -> (ConfigStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        (ConfigStore::with_path(path), dir)
    }

    #[tokio::test]
    async fn test_load_nonexistent() {
        let (store, _dir) = test_store();
        let config = store.load().await.unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.default_stop_timeout, 10);
        assert_eq!(config.default_stop_signal, StopSignal::TERM);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let (store, _dir) = test_store();

        let config = EngineConfig {
            default_stop_timeout: -1,
            default_stop_signal: "SIGINT".parse().unwrap(),
            kill_wait_seconds: 30,
        };
        store.save(&config).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_setters() {
        let (store, _dir) = test_store();

        store.set_default_stop_timeout(25).await.unwrap();
        store
            .set_default_stop_signal("HUP".parse().unwrap())
            .await
            .unwrap();
        store.set_kill_wait_seconds(5).await.unwrap();

        assert_eq!(store.get_default_stop_timeout().await.unwrap(), 25);
        assert_eq!(
            store.get_default_stop_signal().await.unwrap().name(),
            "SIGHUP"
        );
        assert_eq!(store.load().await.unwrap().kill_wait_seconds, 5);
    }

    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let (store, _dir) = test_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), r#"{"defaultStopTimeout": 3}"#).unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.default_stop_timeout, 3);
        assert_eq!(config.default_stop_signal, StopSignal::TERM);
        assert_eq!(config.kill_wait_seconds, 10);
    }

    #[tokio::test]
    async fn test_invalid_signal_in_file() {
        let (store, _dir) = test_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), r#"{"defaultStopSignal": "SIGBOGUS"}"#).unwrap();

        assert!(matches!(store.load().await, Err(Error::Config(_))));
    }

    #[test]
    fn test_kill_wait_floor() {
        let config = EngineConfig {
            kill_wait_seconds: 0,
            ..Default::default()
        };
        assert_eq!(config.kill_wait(), GRACE_PERIOD);

        let config = EngineConfig {
            kill_wait_seconds: 15,
            ..Default::default()
        };
        assert_eq!(config.kill_wait(), Duration::from_secs(15));
    }
}
