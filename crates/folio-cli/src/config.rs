//! `config.toml` under the data directory. Every key is optional; a missing
//! file means defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use folio_core::{
    Catalog, DEFAULT_CONTACT_DELAY_MS, DEFAULT_LEAVE_MS, DEFAULT_STAGGER_MS, FEED_PER_PAGE,
    TransitionTiming,
};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "config.toml";

const DEFAULT_CATALOG: &str = include_str!("../assets/projects.toml");

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Project catalog to load instead of the built-in one.
    pub catalog: Option<PathBuf>,
    pub feed: FeedConfig,
    pub transition: TransitionConfig,
    pub contact: ContactConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub user: String,
    pub api_base: String,
    pub per_page: u8,
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            user: "TurkiAlslamah".to_string(),
            api_base: "https://api.github.com".to_string(),
            per_page: FEED_PER_PAGE,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub leave_ms: u64,
    pub stagger_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            leave_ms: DEFAULT_LEAVE_MS,
            stagger_ms: DEFAULT_STAGGER_MS,
        }
    }
}

impl TransitionConfig {
    pub fn timing(&self) -> TransitionTiming {
        TransitionTiming {
            leave: Duration::from_millis(self.leave_ms),
            stagger: Duration::from_millis(self.stagger_ms),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub delay_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_CONTACT_DELAY_MS,
        }
    }
}

impl ContactConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

impl FolioConfig {
    /// Load `config.toml` from `dir`. Absence is not an error; a file that
    /// fails to parse is.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml_str(&content)
                .with_context(|| format!("failed to parse {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load the project catalog: explicit override, then configured path,
    /// then the built-in catalog.
    pub fn load_catalog(&self, override_path: Option<&Path>) -> Result<Catalog> {
        match override_path.or(self.catalog.as_deref()) {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read catalog {}", path.display()))?;
                Catalog::from_toml_str(&content)
                    .with_context(|| format!("failed to load catalog {}", path.display()))
            }
            None => Catalog::from_toml_str(DEFAULT_CATALOG).context("built-in catalog is invalid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_missing() {
        let dir = TempDir::new().unwrap();
        let config = FolioConfig::load(dir.path()).unwrap();
        assert_eq!(config.feed.per_page, 6);
        assert_eq!(config.feed.api_base, "https://api.github.com");
        assert_eq!(config.transition.leave_ms, 300);
        assert_eq!(config.contact.delay_ms, 2000);
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_partial_override() {
        let config = FolioConfig::from_toml_str(
            "[feed]\nuser = \"octocat\"\n\n[transition]\nleave_ms = 0\n",
        )
        .unwrap();
        assert_eq!(config.feed.user, "octocat");
        assert_eq!(config.feed.per_page, 6);
        assert_eq!(config.transition.timing().leave, Duration::ZERO);
        assert_eq!(config.transition.stagger_ms, 50);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[feed\nuser = 1").unwrap();
        assert!(FolioConfig::load(dir.path()).is_err());
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = FolioConfig::default().load_catalog(None).unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.categories().contains(&"web"));
    }

    #[test]
    fn test_catalog_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mine.toml");
        std::fs::write(
            &path,
            "[[project]]\nname = \"Solo\"\ncategory = \"cli\"\ndate = \"2021-02-03\"\n",
        )
        .unwrap();
        let catalog = FolioConfig::default().load_catalog(Some(&path)).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].name, "Solo");
    }
}
