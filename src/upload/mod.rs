mod client;
mod download;
mod pipeline;
mod types;
mod validation;

pub use client::{error_message, ConversionClient, FALLBACK_ERROR};
pub use download::DownloadTarget;
pub use pipeline::ConversionJob;
pub use types::{ConversionUpdate, FileSource, SelectedFile};
pub use validation::{validate, Validation, NO_FILE_TEXT};
