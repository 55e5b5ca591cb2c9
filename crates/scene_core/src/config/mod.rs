//! Runtime configuration
//!
//! Settings files are TOML or RON, picked by file extension.

use std::path::{Path, PathBuf};

pub use serde::{Deserialize, Serialize};

/// On-disk formats understood by [`Config`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Format implied by a path's extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Settings that can be loaded from and saved to disk
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Parse settings from a string in the given format
    fn from_str_as(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        Ok(match format {
            ConfigFormat::Toml => toml::from_str(contents)?,
            ConfigFormat::Ron => ron::from_str(contents)?,
        })
    }

    /// Render settings as a string in the given format
    fn to_string_as(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        Ok(match format {
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())?,
        })
    }

    /// Load settings from a `.toml` or `.ron` file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_str_as(&contents, format)?;
        log::debug!("Loaded {:?} settings from {}", format, path.display());
        Ok(config)
    }

    /// Save settings to a `.toml` or `.ron` file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = self.to_string_as(ConfigFormat::from_path(path)?)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Errors raised while loading or saving settings
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML input did not match the settings layout
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Settings could not be rendered as TOML
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// RON input did not match the settings layout
    #[error("RON parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    /// Settings could not be rendered as RON
    #[error("RON serialization error: {0}")]
    RonSerialize(#[from] ron::Error),

    /// The file extension is neither `.toml` nor `.ron`
    #[error("Unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Runtime settings for a [`World`](crate::world::World)
///
/// Missing keys fall back to [`RuntimeConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Default `env_logger` filter used when `RUST_LOG` is unset
    pub log_filter: String,

    /// Number of object slots to reserve up front
    pub object_capacity: usize,

    /// Number of component slots to reserve up front
    pub component_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            object_capacity: 64,
            component_capacity: 256,
        }
    }
}

impl Config for RuntimeConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("scene_core_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_toml_round_trip() {
        let path = temp_path("runtime.toml");
        let config = RuntimeConfig {
            log_filter: "scene_core=debug".to_string(),
            object_capacity: 8,
            component_capacity: 32,
        };

        config.save_to_file(&path).unwrap();
        let loaded = RuntimeConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_round_trip() {
        let path = temp_path("runtime.ron");
        let config = RuntimeConfig {
            object_capacity: 3,
            ..Default::default()
        };

        config.save_to_file(&path).unwrap();
        let loaded = RuntimeConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: RuntimeConfig = toml::from_str("object_capacity = 5\n").unwrap();
        assert_eq!(config.object_capacity, 5);
        assert_eq!(config.component_capacity, 256);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_unsupported_format() {
        let result = RuntimeConfig::load_from_file("settings.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(ref path)) if path == Path::new("settings.json")));

        let result = RuntimeConfig::default().save_to_file("settings");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = RuntimeConfig::load_from_file(temp_path("missing.ron"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_parse_errors_keep_source() {
        let path = temp_path("broken.toml");
        std::fs::write(&path, "object_capacity = \"lots\"").unwrap();
        let result = RuntimeConfig::load_from_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));

        let result = RuntimeConfig::from_str_as("(object_capacity: -1)", ConfigFormat::Ron);
        assert!(matches!(result, Err(ConfigError::RonParse(_))));
    }
}
