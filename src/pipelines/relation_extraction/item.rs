use std::fmt::Debug;

/// A trait for items that carry relation annotations as character spans
pub trait Item: Send + Sync + Clone + Debug {
    /// Returns the input text for the item
    fn input(&self) -> &str;

    /// Returns the start offsets of each subject candidate
    fn subj_char_span_starts(&self) -> &[usize];

    /// Returns the exclusive end offsets of each subject candidate
    fn subj_char_span_ends(&self) -> &[usize];

    /// Returns the start offsets of each object candidate
    fn obj_char_span_starts(&self) -> &[usize];

    /// Returns the exclusive end offsets of each object candidate
    fn obj_char_span_ends(&self) -> &[usize];
}
