use super::types::SelectedFile;
use crate::config::{UploaderConfig, FILE_FIELD};
use crate::error::ConversionError;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::Deserialize;

pub const FALLBACK_ERROR: &str = "Conversion failed";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct VersionResponse {
    #[serde(default)]
    version: Option<serde_json::Value>,
}

/// Talks to the conversion server. Cheap to clone.
#[derive(Clone)]
pub struct ConversionClient {
    http: reqwest::Client,
    convert_url: String,
    version_url: String,
    form_fields: Vec<(String, String)>,
}

impl ConversionClient {
    pub fn new(config: &UploaderConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_http(http, config))
    }

    pub fn with_http(http: reqwest::Client, config: &UploaderConfig) -> Self {
        Self {
            http,
            convert_url: config.convert_url(),
            version_url: config.version_url(),
            form_fields: config.form_fields.clone(),
        }
    }

    /// Sends the document and returns the raw response, whatever its status.
    pub async fn submit(&self, file: &SelectedFile) -> Result<Response, ConversionError> {
        let bytes = file
            .read_bytes()
            .await
            .map_err(|source| ConversionError::ReadSource {
                name: file.name.clone(),
                source,
            })?;

        log::info!(
            "Posting {} ({} bytes) to {}",
            file.name,
            bytes.len(),
            self.convert_url
        );

        let form = self
            .build_form(file, bytes)
            .map_err(ConversionError::Transport)?;

        let response = self
            .http
            .post(&self.convert_url)
            .multipart(form)
            .send()
            .await
            .map_err(ConversionError::Transport)?;

        log::info!("Conversion server answered {}", response.status());
        Ok(response)
    }

    /// Turns a response into the PDF bytes, or the server's error message.
    pub async fn read_pdf(response: Response) -> Result<Vec<u8>, ConversionError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(ConversionError::Server {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body = response.bytes().await.map_err(ConversionError::Body)?;
        Ok(body.to_vec())
    }

    pub async fn convert(&self, file: &SelectedFile) -> Result<Vec<u8>, ConversionError> {
        let response = self.submit(file).await?;
        Self::read_pdf(response).await
    }

    /// `version` field of the server's `/version` document, if any.
    pub async fn fetch_version(&self) -> Result<Option<String>, reqwest::Error> {
        let response = self
            .http
            .get(&self.version_url)
            .send()
            .await?
            .error_for_status()?;
        let body: VersionResponse = response.json().await?;

        Ok(body.version.and_then(|value| match value {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }))
    }

    fn build_form(&self, file: &SelectedFile, bytes: Vec<u8>) -> Result<Form, reqwest::Error> {
        let part = Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(DOCX_MIME)?;

        Ok(self
            .form_fields
            .iter()
            .fold(Form::new().part(FILE_FIELD, part), |form, (key, value)| {
                form.text(key.clone(), value.clone())
            }))
    }
}

/// Non-empty `error` field of a JSON error body, else the generic fallback.
pub fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .and_then(|response| response.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| FALLBACK_ERROR.to_string())
}
