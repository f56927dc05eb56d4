/// Relation Extraction
pub mod relation_extraction;
