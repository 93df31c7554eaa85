use miette::Diagnostic;
use thiserror::Error;

/// Main error type for pxtile operations
#[derive(Error, Diagnostic, Debug)]
pub enum PxTileError {
    #[error("IO error: {0}")]
    #[diagnostic(code(pxtile::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(pxtile::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(pxtile::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Out of bounds: {message}")]
    #[diagnostic(code(pxtile::bounds))]
    Bounds {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(pxtile::config))]
    Configuration {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl PxTileError {
    /// Shorthand for a configuration error without help text.
    pub(crate) fn config(message: impl Into<String>) -> Self {
        PxTileError::Configuration {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PxTileError>;
