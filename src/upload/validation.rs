use super::types::SelectedFile;
use crate::config::MAX_FILE_SIZE;
use crate::error::ValidationError;
use crate::utils::file_size::FileSizeUtils;

pub const NO_FILE_TEXT: &str = "No file selected";
const DOCX_SUFFIX: &str = ".docx";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Empty,
    /// File accepted; `info` is the text shown next to the picker.
    Ready { info: String },
    Rejected(ValidationError),
}

impl Validation {
    pub fn info_text(&self) -> &str {
        match self {
            Validation::Ready { info } => info,
            Validation::Empty | Validation::Rejected(_) => NO_FILE_TEXT,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Validation::Ready { .. })
    }
}

/// Size is checked before the extension, so an oversized `.pdf` reports the
/// size problem.
pub fn validate(file: Option<&SelectedFile>) -> Validation {
    let Some(file) = file else {
        return Validation::Empty;
    };

    if file.size > MAX_FILE_SIZE {
        return Validation::Rejected(ValidationError::TooLarge { size: file.size });
    }

    if !file.name.ends_with(DOCX_SUFFIX) {
        return Validation::Rejected(ValidationError::NotDocx {
            name: file.name.clone(),
        });
    }

    Validation::Ready {
        info: format!(
            "{} ({}MB)",
            file.name,
            FileSizeUtils::format_megabytes(file.size)
        ),
    }
}
