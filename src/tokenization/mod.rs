/// Column-wise batch encodings with char-to-token lookup
pub mod encoding;

/// Hugging Face `tokenizers` implementation
pub mod pretrained;

#[cfg(test)]
pub(crate) mod fixtures;

pub use encoding::BatchEncoding;
pub use pretrained::Pretrained;

/// The tokenizer capabilities needed to align character spans with tokens.
///
/// Any tokenizer that can encode a batch of texts with per-token character offsets and decode
/// token id sequences back into text can be used for alignment.
pub trait SpanTokenizer {
    /// Encode every text in the batch at once, with truncation and special tokens applied
    fn encode_batch(&self, texts: &[String]) -> Result<BatchEncoding, Error>;

    /// Decode each token id sequence independently into a string
    fn decode_batch(&self, sequences: &[&[u32]]) -> Result<Vec<String>, Error>;
}

/// Tokenization Error
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The tokenizer failed to encode the batch
    #[error("unable to encode batch: {0}")]
    Encode(tokenizers::Error),

    /// The tokenizer failed to decode a token sequence
    #[error("unable to decode tokens: {0}")]
    Decode(tokenizers::Error),

    /// The tokenizer file could not be read or parsed
    #[error("unable to load tokenizer from {path}: {reason}")]
    Load {
        /// Where the tokenizer was loaded from
        path: String,

        /// The underlying failure
        reason: tokenizers::Error,
    },

    /// The tokenizer could not be downloaded from the Hugging Face Hub
    #[error("unable to download tokenizer for {model}: {source}")]
    Download {
        /// The model name on the Hub
        model: String,

        /// The underlying failure
        source: hf_hub::api::tokio::ApiError,
    },

    /// The truncation settings were rejected by the tokenizer
    #[error("invalid truncation settings: {0}")]
    Truncation(tokenizers::Error),
}
