use std::path::PathBuf;

use hf_hub::api::tokio::{Api, ApiError};

/// The file name Hugging Face models use for serialized fast tokenizers
pub static TOKENIZER_FILE: &str = "tokenizer.json";

/// The file name Hugging Face models use for tokenizer settings such as `model_max_length`
pub static TOKENIZER_CONFIG_FILE: &str = "tokenizer_config.json";

/// Models without a real limit store a huge placeholder `model_max_length`
const MAX_REASONABLE_LENGTH: f64 = 1_000_000.0;

/// Download a model's tokenizer definition from Hugging Face Hub.
/// If the file exists in the cache, it will not be downloaded again.
pub async fn download_tokenizer(model_name: &str) -> Result<PathBuf, ApiError> {
    download(model_name, TOKENIZER_FILE).await
}

/// Look up a model's `model_max_length` from its tokenizer config on Hugging Face Hub.
///
/// Returns `None` if the config can't be fetched or read, or holds no usable limit.
pub async fn model_max_length(model_name: &str) -> Option<usize> {
    let path = match download(model_name, TOKENIZER_CONFIG_FILE).await {
        Ok(path) => path,
        Err(e) => {
            debug!("No {} for {}: {}", TOKENIZER_CONFIG_FILE, model_name, e);
            return None;
        }
    };

    let contents = tokio::fs::read_to_string(&path).await.ok()?;
    let max_length = parse_model_max_length(&contents);

    debug!("model_max_length for {}: {:?}", model_name, max_length);

    max_length
}

async fn download(model_name: &str, file_name: &str) -> Result<PathBuf, ApiError> {
    let api = Api::new()?;
    let repo = api.model(model_name.to_string());

    debug!("Fetching {} for {}", file_name, model_name);

    repo.get(file_name).await
}

fn parse_model_max_length(contents: &str) -> Option<usize> {
    let config: serde_json::Value = serde_json::from_str(contents).ok()?;
    let max_length = config.get("model_max_length")?.as_f64()?;

    (max_length >= 1.0 && max_length < MAX_REASONABLE_LENGTH).then_some(max_length as usize)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_model_max_length() {
        assert_eq!(
            parse_model_max_length(r#"{"do_lower_case": false, "model_max_length": 512}"#),
            Some(512)
        );
    }

    #[test]
    fn test_parse_model_max_length_placeholder() {
        assert_eq!(
            parse_model_max_length(r#"{"model_max_length": 1000000000000000019884624838656}"#),
            None
        );
    }

    #[test]
    fn test_parse_model_max_length_missing() {
        assert_eq!(parse_model_max_length(r#"{"do_lower_case": true}"#), None);
        assert_eq!(parse_model_max_length("not json"), None);
    }
}
