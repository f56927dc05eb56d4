use serde::{Deserialize, Serialize};

use crate::tokenization::BatchEncoding;

/// Token-level spans for one sample, plus the text decoded from each span's tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleSpans {
    /// Subject span starts, as inclusive token indices
    pub subj_starts: Vec<usize>,

    /// Subject span ends, as inclusive token indices
    pub subj_ends: Vec<usize>,

    /// Object span starts, as inclusive token indices
    pub obj_starts: Vec<usize>,

    /// Object span ends, as inclusive token indices
    pub obj_ends: Vec<usize>,

    /// Decoded subject text for each retained candidate
    pub subjects: Vec<String>,

    /// Decoded object text for each retained candidate
    pub objects: Vec<String>,
}

/// The tokenized batch merged with the aligned token spans of every sample.
///
/// Every list has one entry per sample, and within a sample the span lists and decoded texts all
/// have one entry per retained candidate, in their original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignedBatch {
    /// The tokenizer output, passed through unchanged
    #[serde(flatten)]
    pub encoding: BatchEncoding,

    /// Decoded subject texts
    pub subjects: Vec<Vec<String>>,

    /// Decoded object texts
    pub objects: Vec<Vec<String>>,

    /// Subject token span starts
    pub subj_token_span_starts: Vec<Vec<usize>>,

    /// Subject token span ends (inclusive)
    pub subj_token_span_ends: Vec<Vec<usize>>,

    /// Object token span starts
    pub obj_token_span_starts: Vec<Vec<usize>>,

    /// Object token span ends (inclusive)
    pub obj_token_span_ends: Vec<Vec<usize>>,
}

impl AlignedBatch {
    /// Start an output batch around an encoding, with room for `batch_size` samples
    pub fn new(encoding: BatchEncoding, batch_size: usize) -> Self {
        Self {
            encoding,
            subjects: Vec::with_capacity(batch_size),
            objects: Vec::with_capacity(batch_size),
            subj_token_span_starts: Vec::with_capacity(batch_size),
            subj_token_span_ends: Vec::with_capacity(batch_size),
            obj_token_span_starts: Vec::with_capacity(batch_size),
            obj_token_span_ends: Vec::with_capacity(batch_size),
        }
    }

    /// Append the spans of the next sample
    pub fn push(&mut self, spans: SampleSpans) {
        self.subjects.push(spans.subjects);
        self.objects.push(spans.objects);
        self.subj_token_span_starts.push(spans.subj_starts);
        self.subj_token_span_ends.push(spans.subj_ends);
        self.obj_token_span_starts.push(spans.obj_starts);
        self.obj_token_span_ends.push(spans.obj_ends);
    }

    /// The number of samples in the batch
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// Returns true if the batch holds no samples
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// The number of candidates retained across all samples
    pub fn num_retained(&self) -> usize {
        self.subjects.iter().map(Vec::len).sum()
    }

    /// Split the batch into one record per sample
    pub fn into_records(self) -> Vec<Record> {
        let len = self.len();

        let mut input_ids = self.encoding.input_ids.into_iter();
        let mut token_type_ids = self.encoding.token_type_ids.into_iter();
        let mut attention_mask = self.encoding.attention_mask.into_iter();
        let mut special_tokens_mask = self.encoding.special_tokens_mask.into_iter();
        let mut subjects = self.subjects.into_iter();
        let mut objects = self.objects.into_iter();
        let mut subj_starts = self.subj_token_span_starts.into_iter();
        let mut subj_ends = self.subj_token_span_ends.into_iter();
        let mut obj_starts = self.obj_token_span_starts.into_iter();
        let mut obj_ends = self.obj_token_span_ends.into_iter();

        (0..len)
            .map(|_| Record {
                input_ids: input_ids.next().unwrap_or_default(),
                token_type_ids: token_type_ids.next().unwrap_or_default(),
                attention_mask: attention_mask.next().unwrap_or_default(),
                special_tokens_mask: special_tokens_mask.next().unwrap_or_default(),
                subjects: subjects.next().unwrap_or_default(),
                objects: objects.next().unwrap_or_default(),
                subj_token_span_starts: subj_starts.next().unwrap_or_default(),
                subj_token_span_ends: subj_ends.next().unwrap_or_default(),
                obj_token_span_starts: obj_starts.next().unwrap_or_default(),
                obj_token_span_ends: obj_ends.next().unwrap_or_default(),
            })
            .collect()
    }
}

/// One sample of an aligned batch, with the same field names as the batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Token ids
    pub input_ids: Vec<u32>,

    /// Segment ids
    pub token_type_ids: Vec<u32>,

    /// Attention mask
    pub attention_mask: Vec<u32>,

    /// Special tokens mask
    pub special_tokens_mask: Vec<u32>,

    /// Decoded subject texts
    pub subjects: Vec<String>,

    /// Decoded object texts
    pub objects: Vec<String>,

    /// Subject token span starts
    pub subj_token_span_starts: Vec<usize>,

    /// Subject token span ends (inclusive)
    pub subj_token_span_ends: Vec<usize>,

    /// Object token span starts
    pub obj_token_span_starts: Vec<usize>,

    /// Object token span ends (inclusive)
    pub obj_token_span_ends: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn aligned() -> AlignedBatch {
        let encoding = BatchEncoding {
            input_ids: vec![vec![2, 4, 5, 6, 3], vec![2, 6, 3]],
            token_type_ids: vec![vec![0; 5], vec![0; 3]],
            attention_mask: vec![vec![1; 5], vec![1; 3]],
            special_tokens_mask: vec![vec![1, 0, 0, 0, 1], vec![1, 0, 1]],
            encodings: vec![],
        };

        let mut batch = AlignedBatch::new(encoding, 2);
        batch.push(SampleSpans {
            subj_starts: vec![1],
            subj_ends: vec![1],
            obj_starts: vec![3],
            obj_ends: vec![3],
            subjects: vec!["Alice".to_string()],
            objects: vec!["Bob".to_string()],
        });
        batch.push(SampleSpans::default());

        batch
    }

    #[test]
    fn test_into_records() {
        let records = aligned().into_records();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            Record {
                input_ids: vec![2, 4, 5, 6, 3],
                token_type_ids: vec![0; 5],
                attention_mask: vec![1; 5],
                special_tokens_mask: vec![1, 0, 0, 0, 1],
                subjects: vec!["Alice".to_string()],
                objects: vec!["Bob".to_string()],
                subj_token_span_starts: vec![1],
                subj_token_span_ends: vec![1],
                obj_token_span_starts: vec![3],
                obj_token_span_ends: vec![3],
            }
        );
        assert_eq!(records[1].input_ids, vec![2, 6, 3]);
        assert!(records[1].subjects.is_empty());
        assert!(records[1].obj_token_span_ends.is_empty());
    }

    #[test]
    fn test_serializes_as_merged_mapping() {
        let value = serde_json::to_value(aligned()).unwrap();

        assert_eq!(value["input_ids"][1], serde_json::json!([2, 6, 3]));
        assert_eq!(value["subjects"], serde_json::json!([["Alice"], []]));
        assert_eq!(value["obj_token_span_starts"], serde_json::json!([[3], []]));
        assert!(value.get("encoding").is_none());
        assert!(value.get("encodings").is_none());
    }

    #[test]
    fn test_num_retained() {
        let batch = aligned();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.num_retained(), 1);
    }
}
