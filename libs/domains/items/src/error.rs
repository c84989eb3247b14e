use strum::Display;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Item not found: {0}")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Error classification, compared by identity rather than message text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ItemErrorKind {
    InvalidInput,
    NotFound,
    DatabaseError,
}

impl ItemError {
    pub fn kind(&self) -> ItemErrorKind {
        match self {
            ItemError::InvalidInput(_) => ItemErrorKind::InvalidInput,
            ItemError::NotFound(_) => ItemErrorKind::NotFound,
            ItemError::Database(_) => ItemErrorKind::DatabaseError,
        }
    }

    /// Shorthand for `self.kind() == kind`
    pub fn is(&self, kind: ItemErrorKind) -> bool {
        self.kind() == kind
    }
}

impl From<ValidationErrors> for ItemError {
    fn from(err: ValidationErrors) -> Self {
        ItemError::InvalidInput(err.to_string())
    }
}
