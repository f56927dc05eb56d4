use std::{io, path::Path};

use serde::{Deserialize, Serialize};

/// Configuration for aligning relation spans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Truncate encodings to this many tokens, special tokens included. When unset, the
    /// tokenizer's own truncation settings are used.
    pub max_seq_length: Option<usize>,

    /// Insert special tokens like `[CLS]` and `[SEP]` when encoding
    pub add_special_tokens: bool,

    /// Drop special tokens when decoding span text
    pub skip_special_tokens: bool,

    /// Number of samples aligned together
    pub batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_seq_length: None,
            add_special_tokens: true,
            skip_special_tokens: false,
            batch_size: 32,
        }
    }
}

impl Config {
    /// Load a config from a JSON file. Missing fields take their default values.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await.map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Config Error
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("unable to read config file {path}: {source}")]
    Read {
        /// The config file path
        path: String,

        /// The underlying failure
        source: io::Error,
    },

    /// The config file is not valid JSON for a config
    #[error("unable to parse config file {path}: {source}")]
    Parse {
        /// The config file path
        path: String,

        /// The underlying failure
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"max_seq_length": 128}"#).unwrap();

        assert_eq!(
            config,
            Config {
                max_seq_length: Some(128),
                ..Config::default()
            }
        );
        assert!(config.add_special_tokens);
        assert!(!config.skip_special_tokens);
    }

    #[tokio::test]
    async fn test_load() {
        let path = std::env::temp_dir().join(format!("span-aligner-config-{}.json", std::process::id()));
        tokio::fs::write(&path, r#"{"batch_size": 8, "skip_special_tokens": true}"#)
            .await
            .unwrap();

        let config = Config::load(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(config.batch_size, 8);
        assert!(config.skip_special_tokens);
        assert_eq!(config.max_seq_length, None);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = Config::load("does/not/exist.json").await;

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
