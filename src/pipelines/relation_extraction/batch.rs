use derive_new::new;
use serde::{Deserialize, Serialize};

use super::Item;

/// A half-open character range `[start, end)` into a sample's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct CharSpan {
    /// First character of the span
    pub start: usize,

    /// One past the last character of the span
    pub end: usize,
}

impl CharSpan {
    /// Zero-width spans carry no text and can't be aligned
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The offset of the last character in the span, if it has one
    pub fn last(&self) -> Option<usize> {
        self.end.checked_sub(1).filter(|last| *last >= self.start)
    }
}

/// A subject and object span paired by their position within a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Candidate {
    /// The subject mention
    pub subject: CharSpan,

    /// The object mention
    pub object: CharSpan,
}

/// A batch of texts with relation candidates annotated as character spans
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Batch {
    /// The input text of each sample
    pub text: Vec<String>,

    /// Subject start offsets, per sample and candidate
    pub subj_char_span_starts: Vec<Vec<usize>>,

    /// Subject exclusive end offsets, per sample and candidate
    pub subj_char_span_ends: Vec<Vec<usize>>,

    /// Object start offsets, per sample and candidate
    pub obj_char_span_starts: Vec<Vec<usize>>,

    /// Object exclusive end offsets, per sample and candidate
    pub obj_char_span_ends: Vec<Vec<usize>>,
}

impl Batch {
    /// Collect items into a column-wise batch
    pub fn from_items<'a, I: Item + 'a>(items: impl IntoIterator<Item = &'a I>) -> Self {
        let mut batch = Self::default();

        for item in items {
            batch.text.push(item.input().to_string());
            batch
                .subj_char_span_starts
                .push(item.subj_char_span_starts().to_vec());
            batch
                .subj_char_span_ends
                .push(item.subj_char_span_ends().to_vec());
            batch
                .obj_char_span_starts
                .push(item.obj_char_span_starts().to_vec());
            batch.obj_char_span_ends.push(item.obj_char_span_ends().to_vec());
        }

        batch
    }

    /// The number of samples in the batch
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if the batch holds no samples
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check that every span list lines up with the texts and with each other.
    ///
    /// Subjects and objects are paired by position, so each sample must carry the same number of
    /// subject and object candidates, and every start needs an end that doesn't precede it.
    pub fn validate(&self) -> Result<(), MalformedBatch> {
        let samples = self.len();

        for (field, column) in self.columns() {
            if column.len() != samples {
                return Err(MalformedBatch::SampleCount {
                    field,
                    expected: samples,
                    found: column.len(),
                });
            }
        }

        for sample in 0..samples {
            let expected = self.subj_char_span_starts[sample].len();

            for (field, column) in self.columns() {
                let found = column[sample].len();

                if found != expected {
                    return Err(MalformedBatch::CandidateCount {
                        sample,
                        field,
                        expected,
                        found,
                    });
                }
            }

            for (candidate, pair) in self.candidates(sample).enumerate() {
                for (role, span) in [("subject", pair.subject), ("object", pair.object)] {
                    if span.end < span.start {
                        return Err(MalformedBatch::InvertedSpan {
                            sample,
                            candidate,
                            role,
                            start: span.start,
                            end: span.end,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Iterate over the candidates of one sample in their original order
    pub fn candidates(&self, sample: usize) -> impl Iterator<Item = Candidate> + '_ {
        let subj_starts = row(&self.subj_char_span_starts, sample);
        let subj_ends = row(&self.subj_char_span_ends, sample);
        let obj_starts = row(&self.obj_char_span_starts, sample);
        let obj_ends = row(&self.obj_char_span_ends, sample);

        subj_starts
            .iter()
            .zip(subj_ends)
            .zip(obj_starts.iter().zip(obj_ends))
            .map(|((&subj_start, &subj_end), (&obj_start, &obj_end))| {
                Candidate::new(
                    CharSpan::new(subj_start, subj_end),
                    CharSpan::new(obj_start, obj_end),
                )
            })
    }

    fn columns(&self) -> [(&'static str, &Vec<Vec<usize>>); 4] {
        [
            ("subj_char_span_starts", &self.subj_char_span_starts),
            ("subj_char_span_ends", &self.subj_char_span_ends),
            ("obj_char_span_starts", &self.obj_char_span_starts),
            ("obj_char_span_ends", &self.obj_char_span_ends),
        ]
    }
}

fn row(values: &[Vec<usize>], sample: usize) -> &[usize] {
    values.get(sample).map(Vec::as_slice).unwrap_or_default()
}

/// A batch whose span lists don't line up
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedBatch {
    /// A span list has a different number of samples than the text list
    #[error("malformed batch: `{field}` has {found} samples, expected {expected}")]
    SampleCount {
        /// The span list that disagrees
        field: &'static str,

        /// The number of texts
        expected: usize,

        /// The number of entries in the span list
        found: usize,
    },

    /// A sample has a different number of entries in one span list than the others
    #[error("malformed batch: sample {sample} has {found} entries in `{field}`, expected {expected}")]
    CandidateCount {
        /// The sample index
        sample: usize,

        /// The span list that disagrees
        field: &'static str,

        /// The number of subject start offsets for the sample
        expected: usize,

        /// The number of entries in the span list
        found: usize,
    },

    /// A span ends before it starts
    #[error("malformed batch: sample {sample} candidate {candidate} has a {role} span ending at {end} before its start {start}")]
    InvertedSpan {
        /// The sample index
        sample: usize,

        /// The candidate index within the sample
        candidate: usize,

        /// Either "subject" or "object"
        role: &'static str,

        /// The span start offset
        start: usize,

        /// The span end offset
        end: usize,
    },
}
