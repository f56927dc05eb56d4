use serde::{Deserialize, Serialize};
use tokenizers::Encoding;

/// The encoding of a batch of texts, stored column-wise with one entry per sample.
///
/// The serialized fields mirror what a Hugging Face tokenizer returns for a batch. The per-sample
/// encodings are kept for span lookups but are not part of the serialized record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchEncoding {
    /// Token ids for each sample
    pub input_ids: Vec<Vec<u32>>,

    /// Segment ids for each sample
    pub token_type_ids: Vec<Vec<u32>>,

    /// Attention mask for each sample
    pub attention_mask: Vec<Vec<u32>>,

    /// 1 where the tokenizer inserted a special token, 0 elsewhere. Always included, so consumers
    /// can mask out `[CLS]`/`[SEP]` positions without re-tokenizing.
    pub special_tokens_mask: Vec<Vec<u32>>,

    /// The encodings the columns were built from, used for char-to-token lookups
    #[serde(skip)]
    pub encodings: Vec<Encoding>,
}

impl BatchEncoding {
    /// Build a batch encoding from per-sample Hugging Face encodings
    pub fn from_encodings(encodings: Vec<Encoding>) -> Self {
        let batch_size = encodings.len();

        let mut batch = Self {
            input_ids: Vec::with_capacity(batch_size),
            token_type_ids: Vec::with_capacity(batch_size),
            attention_mask: Vec::with_capacity(batch_size),
            special_tokens_mask: Vec::with_capacity(batch_size),
            encodings: Vec::with_capacity(batch_size),
        };

        for encoding in encodings {
            batch.input_ids.push(encoding.get_ids().to_vec());
            batch.token_type_ids.push(encoding.get_type_ids().to_vec());
            batch.attention_mask.push(encoding.get_attention_mask().to_vec());
            batch
                .special_tokens_mask
                .push(encoding.get_special_tokens_mask().to_vec());
            batch.encodings.push(encoding);
        }

        batch
    }

    /// The number of samples in the batch
    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    /// Returns true if the batch holds no samples
    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }

    /// The token ids of one sample
    pub fn ids(&self, sample: usize) -> Option<&[u32]> {
        self.input_ids.get(sample).map(Vec::as_slice)
    }

    /// Find the index of the token in `sample` that contains the character at `char_offset`.
    ///
    /// Returns `None` when no regular token covers the offset: the character was truncated away,
    /// is whitespace between tokens, or the sample doesn't exist. Special tokens cover no
    /// characters, so they never match.
    pub fn char_to_token(&self, sample: usize, char_offset: usize) -> Option<usize> {
        self.encodings.get(sample)?.char_to_token(char_offset, 0)
    }
}
