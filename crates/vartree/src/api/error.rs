use thiserror::Error;

/// Why a rename was refused. The `Display` text is shown next to the name field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Variables cannot have empty names")]
    Empty,
    #[error("Variables cannot have a name that includes $! or $.$")]
    ReservedToken,
    #[error("Variable names should start with a letter and can only contain letters, digits and underscores")]
    InvalidIdentifier,
    #[error("The variable name {0} is already taken")]
    AlreadyTaken(String),
}

/// Errors surfaced by the editor session and its JSON entry points.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error("unknown variable type: {0}")]
    UnknownType(String),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
