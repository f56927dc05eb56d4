use crate::tokenization::{self, BatchEncoding, SpanTokenizer};

use super::{
    batch::{Candidate, CharSpan, MalformedBatch},
    output::SampleSpans,
    AlignedBatch, Batch,
};

/// An inclusive `[start, end]` range of token indices within one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TokenSpan {
    start: usize,
    end: usize,
}

/// A token span along with the token ids it covers
#[derive(Debug, Clone, Copy)]
struct AlignedSpan<'a> {
    span: TokenSpan,
    ids: &'a [u32],
}

/// Why a candidate was left out of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dropped {
    /// The subject or object span is zero-width
    Degenerate,

    /// A span boundary fell outside every regular token
    Unmapped,
}

/// Align the character-level subject and object spans of a batch with the tokens produced by
/// `tokenizer`.
///
/// The whole batch is encoded once. Each candidate whose subject or object is zero-width, or
/// whose span boundaries don't land inside a regular token (truncated text, special tokens,
/// whitespace), is dropped. The rest keep their order and get their token spans plus the text
/// decoded from each span's token ids.
pub fn align<T: SpanTokenizer + ?Sized>(
    batch: &Batch,
    tokenizer: &T,
) -> Result<AlignedBatch, Error> {
    batch.validate()?;

    let encoding = tokenizer.encode_batch(&batch.text)?;

    let mut spans = Vec::with_capacity(batch.len());
    let (mut degenerate, mut unmapped) = (0, 0);

    for sample in 0..batch.len() {
        let mut sample_spans = SampleSpans::default();
        let mut subj_tokens: Vec<&[u32]> = Vec::new();
        let mut obj_tokens: Vec<&[u32]> = Vec::new();

        for (index, candidate) in batch.candidates(sample).enumerate() {
            let (subject, object) = match align_candidate(&encoding, sample, candidate) {
                Ok(pair) => pair,
                Err(reason) => {
                    trace!("Dropping candidate {index} of sample {sample}: {reason:?}");

                    match reason {
                        Dropped::Degenerate => degenerate += 1,
                        Dropped::Unmapped => unmapped += 1,
                    }

                    continue;
                }
            };

            sample_spans.subj_starts.push(subject.span.start);
            sample_spans.subj_ends.push(subject.span.end);
            sample_spans.obj_starts.push(object.span.start);
            sample_spans.obj_ends.push(object.span.end);

            subj_tokens.push(subject.ids);
            obj_tokens.push(object.ids);
        }

        sample_spans.subjects = tokenizer.decode_batch(&subj_tokens)?;
        sample_spans.objects = tokenizer.decode_batch(&obj_tokens)?;

        spans.push(sample_spans);
    }

    let mut aligned = AlignedBatch::new(encoding, batch.len());
    for sample_spans in spans {
        aligned.push(sample_spans);
    }

    debug!(
        "Aligned {} samples: {} candidates retained, {} degenerate, {} unmapped",
        aligned.len(),
        aligned.num_retained(),
        degenerate,
        unmapped
    );

    Ok(aligned)
}

/// Resolve both spans of a candidate, or report why it can't be kept. Both spans have to resolve
/// before either is recorded.
fn align_candidate(
    encoding: &BatchEncoding,
    sample: usize,
    candidate: Candidate,
) -> Result<(AlignedSpan<'_>, AlignedSpan<'_>), Dropped> {
    if candidate.subject.is_empty() || candidate.object.is_empty() {
        return Err(Dropped::Degenerate);
    }

    let subject = to_token_span(encoding, sample, candidate.subject).ok_or(Dropped::Unmapped)?;
    let object = to_token_span(encoding, sample, candidate.object).ok_or(Dropped::Unmapped)?;

    Ok((subject, object))
}

/// Map a half-open character span onto the inclusive range of tokens covering its first and last
/// characters, along with the token ids in that range
fn to_token_span(
    encoding: &BatchEncoding,
    sample: usize,
    span: CharSpan,
) -> Option<AlignedSpan<'_>> {
    let start = encoding.char_to_token(sample, span.start)?;
    let end = encoding.char_to_token(sample, span.last()?)?;

    let ids = encoding.ids(sample)?.get(start..=end)?;

    Some(AlignedSpan {
        span: TokenSpan { start, end },
        ids,
    })
}

/// Alignment Error
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The batch's span lists don't line up
    #[error(transparent)]
    MalformedBatch(#[from] MalformedBatch),

    /// The tokenizer failed to encode or decode
    #[error(transparent)]
    Tokenizer(#[from] tokenization::Error),
}
