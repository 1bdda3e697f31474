use thiserror::Error;

pub const MSG_NO_FILE: &str = "Please select a file first.";
pub const MSG_NO_FORMAT: &str = "Please select an output format.";
pub const MSG_UNKNOWN_SERVER: &str = "An unknown server error occurred.";
pub const MSG_UNKNOWN: &str = "An unknown error occurred.";
pub const MSG_MISSING_FILE_PATH: &str =
    "Conversion succeeded but the server did not return a file path.";
pub const MSG_NETWORK: &str = "A network error occurred. Please try again.";

/// Everything that can go wrong between picking a file and getting a
/// download link. The `Display` text is what the status panel shows.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Rejected locally, nothing was sent.
    #[error("{0}")]
    Validation(String),

    #[error("A conversion is already in progress.")]
    Busy,

    /// The server answered but did not hand back a usable file.
    #[error("{0}")]
    Server(String),

    #[error("{}", MSG_NETWORK)]
    Transport(#[from] reqwest::Error),

    /// The body was not the JSON object the endpoint promises.
    #[error("{}", MSG_NETWORK)]
    Decode(#[from] serde_json::Error),

    #[error("Could not read the selected file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not start the network worker: {0}")]
    Worker(std::io::Error),

    /// The worker thread went away without reporting an outcome.
    #[error("{}", MSG_NETWORK)]
    WorkerLost,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConvertError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn server(msg: impl Into<String>) -> Self {
        Self::Server(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
