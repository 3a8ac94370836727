use thiserror::Error;

#[derive(Error, Debug)]
pub enum GistError {
    #[error("Input paragraph is empty")]
    EmptyInput,
    #[error("Segmentation error: {0}")]
    Segmentation(String),
    #[error("Model call failed after {attempts} attempt(s): {reason}")]
    RetriesExhausted { attempts: u32, reason: String },
    #[error("Scoring error: {0}")]
    Scoring(String),
    #[error("Language model error: {0}")]
    Model(String),
    #[error("Language model service exhausted for all {sentences} sentence(s)")]
    ServiceExhausted { sentences: usize },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GistError {
    /// Errors caused by the caller's input rather than the engine or its collaborators.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::Segmentation(_))
    }
}

pub type Result<T> = std::result::Result<T, GistError>;
