use miette::Diagnostic;
use thiserror::Error;

/// Main error type for iconsmith operations
#[derive(Error, Diagnostic, Debug)]
pub enum IconError {
    #[error("Configuration error: {message}")]
    #[diagnostic(code(iconsmith::config))]
    Configuration {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Cannot read directory {path}: {message}")]
    #[diagnostic(code(iconsmith::directory))]
    Directory {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(iconsmith::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(iconsmith::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Export failed: {failed} of {total} file(s) could not be written")]
    #[diagnostic(
        code(iconsmith::export),
        help("Fix the reported paths and run the command again")
    )]
    Export { failed: usize, total: usize },

    #[error("Parse error: {message}")]
    #[diagnostic(code(iconsmith::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, IconError>;
