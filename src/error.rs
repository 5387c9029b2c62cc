use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuzzleError {
    #[error("Failed to run `{command}`: {source}")]
    ProbeUnavailable {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    ProbeFailed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("Cannot pass {0:?} to the shell")]
    Unquotable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GuzzleError>;
