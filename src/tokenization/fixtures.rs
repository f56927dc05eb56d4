use tokenizers::Tokenizer;

/// A word-level tokenizer with a BERT-style `[CLS] ... [SEP]` template, small enough to inline
const TOKENIZER_JSON: &str = r#"{
    "version": "1.0",
    "truncation": null,
    "padding": null,
    "added_tokens": [
        {"id": 0, "content": "[PAD]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
        {"id": 1, "content": "[UNK]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
        {"id": 2, "content": "[CLS]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
        {"id": 3, "content": "[SEP]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
    ],
    "normalizer": null,
    "pre_tokenizer": {"type": "Whitespace"},
    "post_processor": {
        "type": "BertProcessing",
        "sep": ["[SEP]", 3],
        "cls": ["[CLS]", 2]
    },
    "decoder": null,
    "model": {
        "type": "WordLevel",
        "vocab": {
            "[PAD]": 0,
            "[UNK]": 1,
            "[CLS]": 2,
            "[SEP]": 3,
            "Alice": 4,
            "met": 5,
            "Bob": 6,
            "in": 7,
            "Paris": 8,
            "and": 9,
            "Carol": 10,
            "saw": 11,
            "Dave": 12,
            "New": 13,
            "York": 14,
            "Zoë": 15,
            ".": 16
        },
        "unk_token": "[UNK]"
    }
}"#;

/// Build the test tokenizer
pub(crate) fn tokenizer() -> Tokenizer {
    Tokenizer::from_bytes(TOKENIZER_JSON.as_bytes()).unwrap()
}
