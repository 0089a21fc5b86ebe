use crate::{
    app::service::AppService,
    classify::Classifier,
    config::Config,
    lookup::LookupService,
    search::SearchService,
};
use anyhow::{Context, Result};
use homedir::my_home;
use std::path::{Path, PathBuf};

/// Application factory: the single place where the lookup table is built
/// and handed to the services that read it.
pub struct AppFactory;

impl AppFactory {
    /// Create an application service from the configured tariff table.
    ///
    /// `tariff_override` replaces the configured table path. No vector
    /// backend is attached; searches report the service as unavailable.
    pub fn create_app_service(paths: &AppPaths, tariff_override: Option<&Path>) -> Result<AppService> {
        let config = Self::create_config(&paths.base_path)?;
        let lookup = Self::create_lookup_service(&config, tariff_override);

        Ok(AppService::new(
            config,
            SearchService::without_backend(lookup),
            Classifier::new(),
        ))
    }

    /// Build the lookup table once. A missing or unreadable table yields an
    /// empty service rather than an error.
    pub fn create_lookup_service(config: &Config, tariff_override: Option<&Path>) -> LookupService {
        let tariff_path = tariff_override
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.tariff_path());

        LookupService::load_or_empty(&tariff_path, &config.columns)
    }

    /// Get application paths with validation
    pub fn get_paths() -> Result<AppPaths> {
        let base_path = Self::get_base_path()?;

        // Ensure base directory exists
        std::fs::create_dir_all(&base_path)
            .context("Failed to create application base directory")?;

        Ok(AppPaths { base_path })
    }

    pub fn create_config(base_path: &str) -> Result<Config> {
        Config::load_with(base_path)
            .with_context(|| format!("Failed to load config from {base_path}"))
    }

    /// Get the base path for the application
    fn get_base_path() -> Result<String> {
        if let Ok(base_path) = std::env::var("HSC_BASE_PATH") {
            return Ok(base_path);
        }

        let home = my_home()
            .map_err(|e| anyhow::anyhow!("Could not determine home directory: {e:?}"))?
            .context("Home directory path is empty")?;

        Ok(PathBuf::from(home)
            .join(".local/share/hsc")
            .to_string_lossy()
            .to_string())
    }
}

/// Application paths structure
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub base_path: String,
}
