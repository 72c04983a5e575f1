#[derive(Debug, thiserror::Error)]
pub enum ModelParseError {
    #[error("invalid JSON string: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid JSON string: payload is empty")]
    Empty,
}

pub type Result<T> = std::result::Result<T, ModelParseError>;
