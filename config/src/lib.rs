//! Configuration file loading and lexicon descriptions for cogseq.
//!
//! The config file lives at `~/.cogseq/config.toml`. Every section is
//! optional; command-line flags override whatever the file sets.

mod lexicon;

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use lexicon::{LexiconSpec, LexiconSpecError, TokenSpec, catalog, lookup};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CogseqConfig {
    pub experiment: Option<ExperimentConfig>,
    pub logging: Option<LoggingConfig>,
    /// Extra lexicons, shadowing catalog entries of the same name.
    #[serde(default)]
    pub lexicons: Vec<LexiconSpec>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperimentConfig {
    pub seed: Option<u64>,
    pub runs: Option<usize>,
    pub strategy: Option<String>,
    pub lexicon: Option<String>,
    /// `attribute1` or `attribute2`. Unset selects the two-value policy.
    pub bias: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive such as `info` or `cogseq_core=trace`.
    pub filter: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl CogseqConfig {
    /// Load the config from its default location. `Ok(None)` if there is no
    /// file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path).map(Some),
            _ => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn experiment(&self) -> ExperimentConfig {
        self.experiment.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn log_filter(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.filter.as_deref())
    }

    /// Resolve a lexicon by name, preferring the file's own definitions.
    #[must_use]
    pub fn lexicon(&self, name: &str) -> Option<LexiconSpec> {
        lookup(name, &self.lexicons)
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".cogseq").join("config.toml"))
}
