//! Theme Service
//!
//! The site's default light/dark preference. Visitors carry their own choice
//! in a cookie; this value applies when they have none. Readers subscribe to
//! a watch channel, and the only writer is [`ThemeService::toggle`], which
//! persists the new value before publishing it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::watch;

/// Color scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeError::Unknown(other.to_string())),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme persistence errors
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to access theme file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse theme file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Unknown theme: {0}")]
    Unknown(String),

    #[error("Theme store unavailable")]
    Unavailable,
}

/// Where the preference lives between runs
pub trait ThemeStore: Send + Sync {
    /// The stored preference, if any
    fn load(&self) -> Result<Option<Theme>, ThemeError>;

    fn save(&self, theme: Theme) -> Result<(), ThemeError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

/// TOML file holding `theme = "dark"`
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, e: std::io::Error) -> ThemeError {
        ThemeError::Io {
            path: self.path.clone(),
            error: e.to_string(),
        }
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Result<Option<Theme>, ThemeError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let file: ThemeFile = toml::from_str(&content).map_err(|e| ThemeError::Parse {
            path: self.path.clone(),
            error: e.to_string(),
        })?;
        Ok(Some(file.theme))
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let content = toml::to_string(&ThemeFile { theme }).map_err(|e| ThemeError::Parse {
            path: self.path.clone(),
            error: e.to_string(),
        })?;
        std::fs::write(&self.path, content).map_err(|e| self.io_error(e))
    }
}

/// Store that keeps the preference in memory
#[derive(Default)]
pub struct MemoryThemeStore {
    value: Mutex<Option<Theme>>,
}

impl MemoryThemeStore {
    pub fn new(initial: Option<Theme>) -> Self {
        Self {
            value: Mutex::new(initial),
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<Theme>, ThemeError> {
        self.value
            .lock()
            .map(|v| *v)
            .map_err(|_| ThemeError::Unavailable)
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeError> {
        let mut value = self.value.lock().map_err(|_| ThemeError::Unavailable)?;
        *value = Some(theme);
        Ok(())
    }
}

/// Site default theme with observer semantics
pub struct ThemeService {
    tx: watch::Sender<Theme>,
    store: Arc<dyn ThemeStore>,
    /// Serializes toggles so persist and publish stay in step
    write_lock: tokio::sync::Mutex<()>,
}

impl ThemeService {
    /// Read the persisted preference, defaulting to light
    pub fn init(store: impl ThemeStore + 'static) -> Self {
        let initial = match store.load() {
            Ok(theme) => theme.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to read theme preference: {}", e);
                Theme::default()
            }
        };
        tracing::debug!(theme = %initial, "Theme initialized");

        let (tx, _) = watch::channel(initial);
        Self {
            tx,
            store: Arc::new(store),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn current(&self) -> Theme {
        *self.tx.borrow()
    }

    /// Receiver notified on every change
    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.tx.subscribe()
    }

    /// Flip the theme, persist it, then publish it.
    ///
    /// The store write runs on the blocking pool.
    pub async fn toggle(&self) -> Result<Theme, ThemeError> {
        let _guard = self.write_lock.lock().await;

        let next = self.current().toggled();
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.save(next))
            .await
            .map_err(|_| ThemeError::Unavailable)??;
        self.tx.send_replace(next);

        tracing::info!(theme = %next, "Theme toggled");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_is_light() {
        let service = ThemeService::init(MemoryThemeStore::default());
        assert_eq!(service.current(), Theme::Light);
    }

    #[tokio::test]
    async fn test_double_toggle_restores() {
        let service = ThemeService::init(MemoryThemeStore::new(Some(Theme::Dark)));
        let original = service.current();

        service.toggle().await.unwrap();
        assert_ne!(service.current(), original);
        service.toggle().await.unwrap();
        assert_eq!(service.current(), original);
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!(" Dark ".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert!(matches!("sepia".parse::<Theme>(), Err(ThemeError::Unknown(_))));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let service = ThemeService::init(MemoryThemeStore::default());
        let mut rx = service.subscribe();

        service.toggle().await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_file_store_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("theme.toml");

        let service = ThemeService::init(FileThemeStore::new(&path));
        assert_eq!(service.current(), Theme::Light);
        service.toggle().await.unwrap();

        let reloaded = ThemeService::init(FileThemeStore::new(&path));
        assert_eq!(reloaded.current(), Theme::Dark);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("theme.toml");
        std::fs::write(&path, "theme = \"purple\"").unwrap();

        let store = FileThemeStore::new(&path);
        assert!(matches!(store.load(), Err(ThemeError::Parse { .. })));
        assert_eq!(ThemeService::init(store).current(), Theme::Light);
    }
}
