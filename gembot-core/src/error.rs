use thiserror::Error;

#[derive(Error, Debug)]
pub enum GembotError {
    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("No text in message")]
    NoText,

    #[error("Attachment download failed: {0}")]
    Download(String),

    #[error("State error: {0}")]
    State(String),

    #[error("Empty content")]
    EmptyContent,
}

pub type Result<T> = std::result::Result<T, GembotError>;
