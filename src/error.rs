use thiserror::Error;

/// Rejections produced by the client-side pre-check before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("File size exceeds 16MB limit")]
    TooLarge { size: u64 },
    #[error("Please select a .docx file")]
    NotDocx { name: String },
}

/// Failures of a single submit-to-download cycle.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Non-2xx response; the message is the server's `error` field or the
    /// generic fallback.
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Failed to read converted file: {0}")]
    Body(#[source] reqwest::Error),
    #[error("Failed to read {name}: {source}")]
    ReadSource {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to save {path}: {source}")]
    Save {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} could not be read: {message}")]
    Unreadable { name: String, message: String },
    #[error("{name} is not a valid http(s) URL: {value}")]
    InvalidServerUrl { name: String, value: String },
    #[error("{name} contains an invalid form field entry: {entry}")]
    InvalidFormField { name: String, entry: String },
}

/// Startup failures reported by `main`.
#[derive(Debug, Error)]
pub enum UploaderError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("window error: {0}")]
    Window(String),
}
