use thiserror::Error;

#[derive(Error, Debug)]
pub enum CasinoError {
    #[error("Key '{key}' not found")]
    KeyNotFound { key: String },

    #[error("Index {index} out of range for collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CasinoError {
    /// Validation failures are handed back to the caller of a run;
    /// everything else is reported at the driver boundary.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }
}

pub type CasinoResult<T> = Result<T, CasinoError>;
