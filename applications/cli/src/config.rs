/// Application configuration
use crate::error::{CliError, Result};
use musica_catalog::CatalogConfig;
use musica_library::LibraryConfig;
use musica_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "musica.toml";

/// Environment variable prefix, e.g. `MUSICA_PLAYER__VOLUME=0.4`
pub const ENV_PREFIX: &str = "MUSICA";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub player: PlayerConfig,
    pub library: LibraryConfig,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Load from `path` (or `musica.toml` if present) and `MUSICA_` variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load with an explicit environment map instead of the process environment
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Nested keys use a double underscore so field names keep their own
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let app: Self = config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))?;
        app.validate()?;
        Ok(app)
    }

    /// Reject values the components would otherwise silently clamp
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.player.volume) {
            return Err(CliError::Config(format!(
                "player.volume must be between 0 and 1, got {}",
                self.player.volume
            )));
        }
        if self.catalog.default_limit == 0 || self.catalog.chart_limit == 0 {
            return Err(CliError::Config("catalog limits must be positive".into()));
        }
        Ok(())
    }
}
