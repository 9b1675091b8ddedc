use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Object or Array expected, got {0}")]
    InvalidBatch(String),

    #[error("Maximum {limit} records are allowed. Got {got} records instead.")]
    TooManyRecords { limit: usize, got: usize },

    #[error("Unknown option `{0}`")]
    UnknownOption(String),

    #[error("Invalid option value: {0}")]
    InvalidOption(String),

    #[error("No attribute found for name `{0}`. Has it been added yet?")]
    UnknownAttribute(String),

    #[error("Attribute `{0}` does not accept nested collection attributes")]
    UnconfiguredAttribute(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
