//! Runtime configuration for the uploader.
//!
//! Values come from environment variables; anything missing falls back to a
//! default that matches a locally running conversion server.

use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;
use url::form_urlencoded;

pub const SERVER_URL_ENV: &str = "DOCX2PDF_SERVER_URL";
pub const DOWNLOAD_DIR_ENV: &str = "DOCX2PDF_DOWNLOAD_DIR";
pub const FORM_FIELDS_ENV: &str = "DOCX2PDF_FORM_FIELDS";

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const CONVERT_PATH: &str = "/convert";
pub const VERSION_PATH: &str = "/version";

/// Multipart field carrying the document bytes.
pub const FILE_FIELD: &str = "word_file";

pub const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

pub const PROGRESS_STEP: u8 = 10;
pub const PROGRESS_CAP: u8 = 90;
pub const TICK_INTERVAL: Duration = Duration::from_millis(500);
pub const RESET_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct UploaderConfig {
    /// Base URL without a trailing slash.
    pub server_url: String,
    pub download_dir: PathBuf,
    /// Extra text fields sent alongside the file part, in order.
    pub form_fields: Vec<(String, String)>,
    pub tick_interval: Duration,
    pub reset_delay: Duration,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            download_dir: default_download_dir(),
            form_fields: Vec::new(),
            tick_interval: TICK_INTERVAL,
            reset_delay: RESET_DELAY,
        }
    }
}

impl UploaderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = read_env_var(SERVER_URL_ENV)? {
            config.server_url = parse_server_url(SERVER_URL_ENV, &url)?;
        }
        if let Some(dir) = read_env_var(DOWNLOAD_DIR_ENV)? {
            if !dir.trim().is_empty() {
                config.download_dir = PathBuf::from(dir.trim());
            }
        }
        if let Some(fields) = read_env_var(FORM_FIELDS_ENV)? {
            config.form_fields = parse_form_fields(FORM_FIELDS_ENV, &fields)?;
        }

        Ok(config)
    }

    pub fn convert_url(&self) -> String {
        format!("{}{}", self.server_url, CONVERT_PATH)
    }

    pub fn version_url(&self) -> String {
        format!("{}{}", self.server_url, VERSION_PATH)
    }
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn read_env_var(name: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(error) => Err(ConfigError::Unreadable {
            name: name.to_string(),
            message: error.to_string(),
        }),
    }
}

pub(crate) fn parse_server_url(name: &str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    let invalid = || ConfigError::InvalidServerUrl {
        name: name.to_string(),
        value: value.to_string(),
    };

    let url = reqwest::Url::parse(trimmed).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Parses an `application/x-www-form-urlencoded` string such as
/// `quality=high&note=a%26b`. Blank segments are skipped.
pub(crate) fn parse_form_fields(
    name: &str,
    value: &str,
) -> Result<Vec<(String, String)>, ConfigError> {
    let mut fields = Vec::new();

    for (key, field_value) in form_urlencoded::parse(value.as_bytes()) {
        let key = key.trim();
        let field_value = field_value.trim();
        if key.is_empty() {
            if field_value.is_empty() {
                continue;
            }
            return Err(ConfigError::InvalidFormField {
                name: name.to_string(),
                entry: format!("={field_value}"),
            });
        }
        fields.push((key.to_string(), field_value.to_string()));
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_url_drops_trailing_slash() {
        let url = parse_server_url("TEST_URL", "https://convert.example.com/")
            .expect("https url should parse");
        assert_eq!(url, "https://convert.example.com");
    }

    #[test]
    fn server_url_rejects_other_schemes_and_garbage() {
        for value in ["ftp://example.com", "not a url", ""] {
            let error = parse_server_url("TEST_URL", value).expect_err("should be rejected");
            assert!(matches!(error, ConfigError::InvalidServerUrl { .. }));
        }
    }

    #[test]
    fn form_fields_keep_order_and_allow_empty_values() {
        let fields = parse_form_fields("TEST_FIELDS", "quality=high& &flag").unwrap();
        assert_eq!(
            fields,
            vec![
                ("quality".to_string(), "high".to_string()),
                ("flag".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn form_fields_reject_missing_key() {
        let error = parse_form_fields("TEST_FIELDS", "=value").unwrap_err();
        assert_eq!(
            error.to_string(),
            "TEST_FIELDS contains an invalid form field entry: =value"
        );
    }

    #[test]
    fn form_fields_are_percent_decoded() {
        let fields = parse_form_fields("TEST_FIELDS", "note=a%26b%3Dc&title=Q3+report").unwrap();
        assert_eq!(
            fields,
            vec![
                ("note".to_string(), "a&b=c".to_string()),
                ("title".to_string(), "Q3 report".to_string()),
            ]
        );
    }

    #[test]
    fn endpoints_are_joined_to_the_base_url() {
        let config = UploaderConfig {
            server_url: "http://localhost:5000".to_string(),
            ..UploaderConfig::default()
        };
        assert_eq!(config.convert_url(), "http://localhost:5000/convert");
        assert_eq!(config.version_url(), "http://localhost:5000/version");
    }
}
