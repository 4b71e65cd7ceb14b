use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContextError {
    #[error("invalid event year: {0}")]
    InvalidYear(String),

    #[error("event start year {start} is after end year {end}")]
    InvertedYears { start: i64, end: i64 },

    #[error("invalid initial phase data: {0}")]
    InvalidPhaseData(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ContextError {
    /// Structural problems with the event input, as opposed to runtime failures.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ContextError::InvalidYear(_)
                | ContextError::InvertedYears { .. }
                | ContextError::InvalidPhaseData(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ContextError>;
