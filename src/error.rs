use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown snippet: {0}")]
    UnknownSnippet(String),

    #[error("snippet catalog is empty")]
    EmptyCatalog,

    #[error("duplicate snippet id: {0}")]
    DuplicateSnippet(String),
}

pub type Result<T> = std::result::Result<T, Error>;
