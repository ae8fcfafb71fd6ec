//! Desktop client that sends `.docx` files to a conversion server and saves
//! the returned PDF.

pub mod app;
pub mod config;
pub mod error;
pub mod upload;
pub mod utils;

pub use app::{DocxUploader, UploadController};
pub use config::UploaderConfig;
pub use error::{ConfigError, ConversionError, UploaderError, ValidationError};
