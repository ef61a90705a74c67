use thiserror::Error;

/// Failures while turning a JSON document into one of the raw records.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Body is not valid JSON, or a field has the wrong type.
    #[error("invalid OneCall JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level value is not a JSON object.
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// A key listed as required in the record's field table is absent.
    #[error("missing required field `{key}` in `{record}`")]
    MissingField {
        record: &'static str,
        key: &'static str,
    },
}
