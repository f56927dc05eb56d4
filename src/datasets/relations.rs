use async_trait::async_trait;
use derive_new::new;
use serde::{Deserialize, Serialize};

use super::{DatasetError, LoadableDataset};
use crate::{
    pipelines::relation_extraction::{self, Batch},
    utils::files::read_lines,
};

/// A relation extraction item, one JSON object per line
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Item {
    /// The annotated text
    pub text: String,

    /// Subject start offsets for each candidate
    #[serde(default)]
    pub subj_char_span_starts: Vec<usize>,

    /// Subject exclusive end offsets for each candidate
    #[serde(default)]
    pub subj_char_span_ends: Vec<usize>,

    /// Object start offsets for each candidate
    #[serde(default)]
    pub obj_char_span_starts: Vec<usize>,

    /// Object exclusive end offsets for each candidate
    #[serde(default)]
    pub obj_char_span_ends: Vec<usize>,
}

impl relation_extraction::Item for Item {
    fn input(&self) -> &str {
        &self.text
    }

    fn subj_char_span_starts(&self) -> &[usize] {
        &self.subj_char_span_starts
    }

    fn subj_char_span_ends(&self) -> &[usize] {
        &self.subj_char_span_ends
    }

    fn obj_char_span_starts(&self) -> &[usize] {
        &self.obj_char_span_starts
    }

    fn obj_char_span_ends(&self) -> &[usize] {
        &self.obj_char_span_ends
    }
}

/// An in-memory relation extraction dataset
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    items: Vec<Item>,
}

impl Dataset {
    /// Parse numbered JSON lines into a dataset
    pub fn from_lines<I, S>(lines: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = (usize, S)>,
        S: AsRef<str>,
    {
        let items = lines
            .into_iter()
            .map(|(line, contents)| {
                serde_json::from_str(contents.as_ref())
                    .map_err(|source| DatasetError::Parse { line, source })
            })
            .collect::<Result<Vec<Item>, _>>()?;

        Ok(Self { items })
    }

    /// Returns a specific item from the dataset
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Returns the length of the dataset
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the dataset has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Group the items into batches of at most `batch_size` samples, in order
    pub fn batches(&self, batch_size: usize) -> impl Iterator<Item = Batch> + '_ {
        self.items
            .chunks(batch_size.max(1))
            .map(|chunk| Batch::from_items(chunk))
    }
}

#[async_trait]
impl LoadableDataset for Dataset {
    async fn load(path: &str) -> Result<Self, DatasetError> {
        let lines = read_lines(path).await.map_err(|source| DatasetError::Read {
            path: path.to_string(),
            source,
        })?;

        let dataset = Self::from_lines(lines)?;

        info!("Loaded {} items from {}", dataset.len(), path);

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn lines() -> Vec<(usize, &'static str)> {
        vec![
            (
                1,
                r#"{"text": "Alice met Bob", "subj_char_span_starts": [0], "subj_char_span_ends": [5], "obj_char_span_starts": [10], "obj_char_span_ends": [13]}"#,
            ),
            (2, r#"{"text": "Carol"}"#),
            (
                4,
                r#"{"text": "Bob in Paris", "subj_char_span_starts": [0], "subj_char_span_ends": [3], "obj_char_span_starts": [7], "obj_char_span_ends": [12]}"#,
            ),
        ]
    }

    #[test]
    fn test_from_lines() {
        let dataset = Dataset::from_lines(lines()).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(
            dataset.get(0),
            Some(&Item::new(
                "Alice met Bob".to_string(),
                vec![0],
                vec![5],
                vec![10],
                vec![13]
            ))
        );
        assert_eq!(
            dataset.get(1),
            Some(&Item::new("Carol".to_string(), vec![], vec![], vec![], vec![]))
        );
        assert_eq!(dataset.get(3), None);
    }

    #[test]
    fn test_from_lines_reports_line_number() {
        let mut lines = lines();
        lines.push((7, r#"{"subj_char_span_starts": [0]}"#));

        let result = Dataset::from_lines(lines);

        assert!(matches!(result, Err(DatasetError::Parse { line: 7, .. })));
    }

    #[test]
    fn test_batches() {
        let dataset = Dataset::from_lines(lines()).unwrap();

        let batches: Vec<_> = dataset.batches(2).collect();

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].text, vec!["Alice met Bob", "Carol"]);
        assert_eq!(batches[0].subj_char_span_starts, vec![vec![0], vec![]]);
        assert_eq!(batches[1].text, vec!["Bob in Paris"]);
        assert_eq!(batches[1].obj_char_span_ends, vec![vec![12]]);
    }

    #[test]
    fn test_batches_of_zero_fall_back_to_one() {
        let dataset = Dataset::from_lines(lines()).unwrap();

        assert_eq!(dataset.batches(0).count(), 3);
    }

    #[tokio::test]
    async fn test_load() {
        let path = std::env::temp_dir().join(format!(
            "span-aligner-relations-{}.jsonl",
            std::process::id()
        ));
        let contents: Vec<_> = lines().into_iter().map(|(_, line)| line).collect();
        tokio::fs::write(&path, contents.join("\n\n")).await.unwrap();

        let dataset = Dataset::load(path.to_str().unwrap()).await;
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(dataset.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = Dataset::load("does/not/exist.jsonl").await;

        assert!(matches!(result, Err(DatasetError::Read { .. })));
    }
}
