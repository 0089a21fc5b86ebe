use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::{
    search::DEFAULT_TOP_K,
    storage::{self, StorageManager},
    tariff::ColumnMap,
};

const CONFIG_FILE: &str = "config.yaml";

/// Default tariff table file name, resolved against the base directory
const DEFAULT_TARIFF_PATH: &str = "Tariff.csv";

/// Configuration for candidate search
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of candidates requested per invoice line
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_tariff_path() -> String {
    DEFAULT_TARIFF_PATH.to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_tariff_path")]
    pub tariff_path: String,
    #[serde(default)]
    pub columns: ColumnMap,
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tariff_path: default_tariff_path(),
            columns: ColumnMap::default(),
            search: SearchConfig::default(),
            base_path: String::new(),
        }
    }
}

impl Config {
    fn validate(&self) -> anyhow::Result<()> {
        if self.tariff_path.trim().is_empty() {
            bail!("tariff_path must not be empty");
        }

        if self.search.top_k == 0 {
            bail!("search.top_k must be greater than 0");
        }

        let columns = &self.columns;
        if columns.code.trim().is_empty() || columns.desc_en.trim().is_empty() {
            bail!("columns.code and columns.desc_en must name a header");
        }

        Ok(())
    }

    pub fn load_with(base_path: &str) -> anyhow::Result<Self> {
        let store = storage::BackendLocal::new(base_path)
            .with_context(|| format!("failed to create base directory {base_path}"))?;

        // create new if does not exist
        if !store.exists(CONFIG_FILE) {
            store
                .write(CONFIG_FILE, serde_yml::to_string(&Self::default())?.as_bytes())
                .context("failed to write default config")?;
        }

        let config_str =
            String::from_utf8(store.read(CONFIG_FILE)?).context("config file is not valid utf8")?;
        let mut config: Self = serde_yml::from_str(&config_str).context("config is malformed")?;

        config.base_path = base_path.to_string();

        config.validate()?;

        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let store = storage::BackendLocal::new(&self.base_path)?;

        let config_str = serde_yml::to_string(&self)?;
        store.write(CONFIG_FILE, config_str.as_bytes())?;
        Ok(())
    }

    /// Tariff table location; relative paths are taken from the base directory.
    pub fn tariff_path(&self) -> PathBuf {
        let path = Path::new(&self.tariff_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            Path::new(&self.base_path).join(path)
        }
    }
}
