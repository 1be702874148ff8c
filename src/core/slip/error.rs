use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Scanner state poisoned")]
    Poisoned,
}
