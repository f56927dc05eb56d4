use async_trait::async_trait;

/// Relation datasets stored as JSON lines
pub mod relations;

/// A dataset which can be loaded
#[async_trait]
pub trait LoadableDataset {
    /// Load the dataset from a file
    async fn load(path: &str) -> Result<Self, DatasetError>
    where
        Self: std::marker::Sized;
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The dataset file could not be read
    #[error("unable to read dataset {path}: {source}")]
    Read {
        /// The dataset file path
        path: String,

        /// The underlying failure
        source: std::io::Error,
    },

    /// A line of the dataset is not a valid item
    #[error("invalid item on line {line}: {source}")]
    Parse {
        /// The 1-based line number
        line: usize,

        /// The underlying failure
        source: serde_json::Error,
    },
}
