//! Project configuration read from `.taskmaster/config.toml`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use taskmaster_core::{SortOption, TaskFilter};

use crate::filter_util::parse_sort_option;
use crate::task_draft::DraftPolicy;

const CONFIG_DIR: &str = ".taskmaster";
const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration loaded from `.taskmaster/config.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// `[store]` section.
    #[serde(default)]
    pub store: StoreConfig,
    /// `[input]` section.
    #[serde(default)]
    pub input: InputConfig,
    /// `[view]` section.
    #[serde(default)]
    pub view: ViewConfig,
}

impl ProjectConfig {
    /// Default location of the config file below `dir`.
    pub fn default_path(dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load configuration from `dir/.taskmaster/config.toml`, falling back to defaults.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let config_path = Self::default_path(dir);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::from_path(&config_path)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn from_path(config_path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;
        tracing::debug!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.view.initial_sort().map(|_| ())
    }
}

/// Store bootstrap options.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default = "default_true")]
    seed_examples: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_examples: true,
        }
    }
}

impl StoreConfig {
    /// Whether a fresh store is filled with the example tasks.
    pub const fn seed_examples(&self) -> bool {
        self.seed_examples
    }
}

/// Input validation options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    #[serde(default)]
    strict_due_dates: bool,
}

impl InputConfig {
    /// Policy applied to drafts before they reach the store.
    pub const fn draft_policy(&self) -> DraftPolicy {
        DraftPolicy {
            strict_due_dates: self.strict_due_dates,
        }
    }
}

/// Initial list view.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewConfig {
    #[serde(default = "default_true")]
    show_completed: bool,
    #[serde(default)]
    sort: Option<String>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            show_completed: true,
            sort: None,
        }
    }
}

impl ViewConfig {
    /// Filter applied when the list is first shown.
    pub const fn initial_filter(&self) -> TaskFilter {
        TaskFilter::new(self.show_completed, None)
    }

    /// Sort applied when the list is first shown, if any.
    pub fn initial_sort(&self) -> Result<Option<SortOption>> {
        let Some(token) = self.sort.as_deref() else {
            return Ok(None);
        };
        let option = parse_sort_option(token).context("invalid [view] sort")?;
        Ok(Some(option))
    }
}

const fn default_true() -> bool {
    true
}
