use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EchosnipError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown language '{name}'. Available languages: {}", available.join(", "))]
    UnknownLanguage { name: String, available: Vec<String> },

    #[error("Please enter a description.")]
    EmptyQuery,

    #[error("Failed to process file '{path}': {source}")]
    FileProcessing {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("An unexpected error occurred: {0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, EchosnipError>;
