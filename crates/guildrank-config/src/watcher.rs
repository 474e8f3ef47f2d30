//! Hot reloading of the configuration file.

use crate::cache::ConfigCache;
use crate::loader::{ConfigError, ConfigLoader};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Quiet period that merges the burst of events editors produce on save.
const DEBOUNCE: Duration = Duration::from_millis(250);

/// Reloads the file behind `loader` into `cache`.
///
/// An invalid file is reported and the previous configuration stays live.
pub async fn reload(loader: &ConfigLoader, cache: &ConfigCache) -> Result<(), ConfigError> {
    let loaded = loader.load().await?;
    cache.update(loaded);
    info!("Configuration reloaded");
    Ok(())
}

/// Watches the configuration file and reloads it on change.
///
/// Dropping the watcher stops reloading.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    task: JoinHandle<()>,
}

impl ConfigWatcher {
    /// Starts watching. Must be called from within a tokio runtime.
    pub fn spawn(loader: ConfigLoader, cache: Arc<ConfigCache>) -> Result<Self, ConfigError> {
        let path = loader.path().ok_or(ConfigError::MissingPath)?.to_path_buf();
        let file_name = path.file_name().map(ToOwned::to_owned);
        let dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| std::path::PathBuf::from("."), ToOwned::to_owned);

        let (tx, mut rx) = mpsc::channel(16);
        // Editors often replace the file, so watch the directory and filter.
        let mut watcher =
            notify::recommended_watcher(move |res: notify::Result<notify::Event>| match res {
                Ok(event) => {
                    let relevant = (event.kind.is_modify() || event.kind.is_create())
                        && event
                            .paths
                            .iter()
                            .any(|p| p.file_name().map(ToOwned::to_owned) == file_name);
                    if relevant {
                        let _ = tx.try_send(());
                    }
                }
                Err(e) => warn!("Configuration watcher error: {}", e),
            })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        info!("Watching {} for configuration changes", path.display());

        let task = tokio::spawn(async move {
            while rx.recv().await.is_some() {
                tokio::time::sleep(DEBOUNCE).await;
                while rx.try_recv().is_ok() {}

                if let Err(e) = reload(&loader, &cache).await {
                    warn!("Ignoring invalid configuration change: {}", e);
                }
            }
        });

        Ok(Self {
            _watcher: watcher,
            task,
        })
    }
}

impl Drop for ConfigWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}
