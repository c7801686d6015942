//! Configuration loading.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::{
    domain::{Environment, EnvironmentError},
    scene::SceneError,
};

/// Top-level configuration, read from TOML.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ParkConfig {
    /// Scene files merged into the environment, in order. Relative paths are resolved against
    /// the directory of the configuration file.
    #[serde(default)]
    pub scenes: Vec<PathBuf>,

    #[serde(default)]
    pub environment: EnvironmentConfig,

    #[serde(default)]
    pub query: QueryConfig,
}

/// Park dimensions
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EnvironmentConfig {
    /// Park width (default: 51)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Park height (default: 51)
    #[serde(default = "default_height")]
    pub height: u32,

    /// Cell size of the park grid (default: 3)
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            grid_size: default_grid_size(),
        }
    }
}

/// Free-space query parameters
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct QueryConfig {
    /// Robot radius used to inflate obstacles (default: 0.0)
    #[serde(default)]
    pub robot_radius: f64,
}

fn default_width() -> u32 {
    51
}

fn default_height() -> u32 {
    51
}

fn default_grid_size() -> u32 {
    3
}

impl ParkConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content)?;

        if let Some(base) = path.parent() {
            for scene in &mut config.scenes {
                if scene.is_relative() {
                    *scene = base.join(&*scene);
                }
            }
        }
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Builds the environment and merges every configured scene into it.
    pub fn environment(&self) -> Result<Environment, ConfigError> {
        let mut environment = Environment::new(
            self.environment.width,
            self.environment.height,
            self.environment.grid_size,
        )?;
        for scene in &self.scenes {
            info!("Loading scene from {:?}", scene);
            environment.load_file(scene)?;
        }
        Ok(environment)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file {} could not be read", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("configuration error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tests::asset_path;

    #[test]
    fn test_config_defaults() {
        let config = ParkConfig::from_toml("").unwrap();
        assert_eq!(config, ParkConfig::default());
        assert_eq!(config.environment.width, 51);
        assert_eq!(config.environment.height, 51);
        assert_eq!(config.environment.grid_size, 3);
        assert_abs_diff_eq!(config.query.robot_radius, 0.0);
        assert!(config.scenes.is_empty());
    }

    #[test]
    fn test_config_partial_section() {
        let config = ParkConfig::from_toml("[environment]\nwidth = 100\n").unwrap();
        assert_eq!(config.environment.width, 100);
        assert_eq!(config.environment.height, 51);
    }

    #[test]
    fn test_config_negative_dimension() {
        assert!(matches!(
            ParkConfig::from_toml("[environment]\nwidth = -1\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_config_zero_dimension() {
        let config = ParkConfig::from_toml("[environment]\ngrid_size = 0\n").unwrap();
        assert!(matches!(
            config.environment(),
            Err(ConfigError::Environment(
                EnvironmentError::InvalidConfiguration(_)
            ))
        ));
    }

    #[test]
    fn test_config_load() {
        let config = ParkConfig::load(asset_path("park.toml")).unwrap();
        assert_eq!(config.scenes, vec![asset_path("park.json")]);
        assert_abs_diff_eq!(config.query.robot_radius, 0.5);

        let environment = config.environment().unwrap();
        assert_eq!(environment.width(), 51);
        assert_eq!(environment.obstacles().len(), 7);
        assert!(!environment.is_free(25.0, 25.0, config.query.robot_radius));
    }

    #[test]
    fn test_config_load_missing_scene() {
        let config = ParkConfig::from_toml(r#"scenes = ["does/not/exist.json"]"#).unwrap();
        assert!(matches!(
            config.environment(),
            Err(ConfigError::Scene(SceneError::SourceNotFound { .. }))
        ));
    }

    #[test]
    fn test_config_load_missing_file() {
        assert!(matches!(
            ParkConfig::load(asset_path("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
