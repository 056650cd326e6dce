use phonebook_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] fred::error::Error),
    #[error("invalid store settings: {0}")]
    InvalidSettings(String),
    #[error("stored value for {key} is not a valid address: {source}")]
    CorruptValue {
        key: String,
        #[source]
        source: CoreError,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Unavailable,
    InvalidSettings,
    CorruptValue,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Redis(_) => StoreErrorKind::Unavailable,
            StoreError::InvalidSettings(_) => StoreErrorKind::InvalidSettings,
            StoreError::CorruptValue { .. } => StoreErrorKind::CorruptValue,
        }
    }
}
