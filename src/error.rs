use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum TorusError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
