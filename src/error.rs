use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Empty path")]
    EmptyPath,
    #[error("No field `{key}` at `{path}`")]
    MissingKey { key: String, path: String },
    #[error("Index {index} out of bounds (len {len}) at `{path}`")]
    IndexOutOfBounds {
        index: usize,
        len: usize,
        path: String,
    },
    #[error("Cannot descend into a scalar at `{path}`")]
    NotAContainer { path: String },
    #[error("Cannot {mutation} `{path}`")]
    UnsupportedTarget { mutation: String, path: String },
    #[error("Cannot swap `{first}` with `{second}`, they are not siblings")]
    MismatchedSwap { first: String, second: String },
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type ActionResult<T> = Result<T, ActionError>;
