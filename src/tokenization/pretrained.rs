use std::path::Path;

use tokenizers::{Tokenizer, TruncationParams};

use super::{BatchEncoding, Error, SpanTokenizer};
use crate::{pipelines::relation_extraction::Config, utils::hugging_face};

/// Truncation limit used when neither the config nor the tokenizer sets one
pub const DEFAULT_MAX_SEQ_LENGTH: usize = 512;

/// A pretrained Hugging Face tokenizer prepared for span alignment
#[derive(Clone)]
pub struct Pretrained {
    /// The underlying tokenizer, with truncation applied
    tokenizer: Tokenizer,

    /// Whether to insert special tokens such as `[CLS]` and `[SEP]` when encoding
    add_special_tokens: bool,

    /// Whether to drop special tokens when decoding span text
    skip_special_tokens: bool,
}

impl Pretrained {
    /// Wrap a tokenizer so that encodings are always truncated.
    ///
    /// The limit comes from the config if set, then from the tokenizer's own truncation settings,
    /// and finally falls back to [`DEFAULT_MAX_SEQ_LENGTH`].
    pub fn new(mut tokenizer: Tokenizer, config: &Config) -> Result<Self, Error> {
        let max_length = match (config.max_seq_length, tokenizer.get_truncation()) {
            (Some(max_length), _) => Some(max_length),
            (None, Some(_)) => None,
            (None, None) => {
                debug!(
                    "Tokenizer has no truncation configured, using {}",
                    DEFAULT_MAX_SEQ_LENGTH
                );

                Some(DEFAULT_MAX_SEQ_LENGTH)
            }
        };

        if let Some(max_length) = max_length {
            tokenizer
                .with_truncation(Some(TruncationParams {
                    max_length,
                    ..Default::default()
                }))
                .map_err(Error::Truncation)?;
        }

        Ok(Self {
            tokenizer,
            add_special_tokens: config.add_special_tokens,
            skip_special_tokens: config.skip_special_tokens,
        })
    }

    /// Load a tokenizer from a local `tokenizer.json` file
    pub fn from_file(path: impl AsRef<Path>, config: &Config) -> Result<Self, Error> {
        let path = path.as_ref();

        let tokenizer = Tokenizer::from_file(path).map_err(|reason| Error::Load {
            path: path.display().to_string(),
            reason,
        })?;

        info!("Loaded tokenizer from {}", path.display());

        Self::new(tokenizer, config)
    }

    /// Download the tokenizer for a model on the Hugging Face Hub, or reuse the cached copy.
    ///
    /// Without a configured `max_seq_length`, the model's `model_max_length` from its
    /// `tokenizer_config.json` is used when the Hub provides one.
    pub async fn from_hub(model_name: &str, config: &Config) -> Result<Self, Error> {
        let path = hugging_face::download_tokenizer(model_name)
            .await
            .map_err(|source| Error::Download {
                model: model_name.to_string(),
                source,
            })?;

        let mut config = config.clone();
        if config.max_seq_length.is_none() {
            config.max_seq_length = hugging_face::model_max_length(model_name).await;
        }

        Self::from_file(path, &config)
    }

    /// Load a tokenizer from a local file if `name_or_path` exists, otherwise from the Hub
    pub async fn load(name_or_path: &str, config: &Config) -> Result<Self, Error> {
        if Path::new(name_or_path).is_file() {
            Self::from_file(name_or_path, config)
        } else {
            Self::from_hub(name_or_path, config).await
        }
    }
}

impl SpanTokenizer for Pretrained {
    fn encode_batch(&self, texts: &[String]) -> Result<BatchEncoding, Error> {
        let inputs: Vec<&str> = texts.iter().map(String::as_str).collect();

        // Char offsets rather than byte offsets, since spans index characters
        let encodings = self
            .tokenizer
            .encode_batch_char_offsets(inputs, self.add_special_tokens)
            .map_err(Error::Encode)?;

        Ok(BatchEncoding::from_encodings(encodings))
    }

    fn decode_batch(&self, sequences: &[&[u32]]) -> Result<Vec<String>, Error> {
        self.tokenizer
            .decode_batch(sequences, self.skip_special_tokens)
            .map_err(Error::Decode)
    }
}
