use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("recipe not found: {slug}")]
    NotFound {
        slug: String,
        #[source]
        source: Option<std::io::Error>,
    },
    #[error("failed to read recipe directory {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse recipe from {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write recipe file {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("recipe already exists: {0}")]
    AlreadyExists(String),
}

pub type RecipeResult<T> = std::result::Result<T, RecipeError>;
