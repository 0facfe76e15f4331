#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("field {field}: invalid timestamp {value:?}: {source}")]
    Parse {
        field: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("unexpected shape: {0}")]
    Shape(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
