/// Span alignment
pub mod align;

/// Character-span batches
pub mod batch;

/// Alignment config
pub mod config;

/// Relation Extraction Items
pub mod item;

/// Aligned output batches and records
pub mod output;

pub use align::{align, Error};
pub use batch::{Batch, MalformedBatch};
pub use config::Config;
pub use item::Item;
pub use output::{AlignedBatch, Record};
