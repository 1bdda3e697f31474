use super::types::{SelectedFile, ServerReply};
use super::ConversionBackend;
use crate::config::AppConfig;
use crate::error::{
    ConvertError, Result, MSG_MISSING_FILE_PATH, MSG_NO_FORMAT, MSG_UNKNOWN, MSG_UNKNOWN_SERVER,
};
use crate::utils::file_size::FileSizeUtils;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use tracing::{debug, info, warn};

/// Talks to the conversion endpoint. One request per call: no retries,
/// no timeout beyond the transport's own.
#[derive(Clone)]
pub struct ConversionClient {
    http: reqwest::Client,
    api_url: Url,
    max_upload_bytes: u64,
}

impl ConversionClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self::with_endpoint(config.api_url()?, config.max_upload_bytes))
    }

    pub fn with_endpoint(api_url: Url, max_upload_bytes: u64) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
            max_upload_bytes,
        }
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    async fn build_form(&self, file: &SelectedFile, output_format: &str) -> Result<Form> {
        let bytes = tokio::fs::read(&file.path).await?;
        let part = Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(file.mime_type())?;

        Ok(Form::new()
            .part("uploadedFile", part)
            .text("outputFormat", output_format.to_string())
            .text("inputType", file.input_type().to_string()))
    }
}

#[async_trait]
impl ConversionBackend for ConversionClient {
    async fn submit(&self, file: &SelectedFile, output_format: &str) -> Result<String> {
        let output_format = output_format.trim();
        if output_format.is_empty() {
            return Err(ConvertError::validation(MSG_NO_FORMAT));
        }
        if file.size > self.max_upload_bytes {
            return Err(ConvertError::validation(format!(
                "{} is larger than the {} upload limit.",
                file.name,
                FileSizeUtils::format_size(self.max_upload_bytes)
            )));
        }

        let form = self.build_form(file, output_format).await?;

        info!(
            "Uploading '{}' ({}) for conversion to {}",
            file.name,
            FileSizeUtils::format_size(file.size),
            output_format
        );

        let response = self
            .http
            .post(self.api_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("Conversion request to {} failed: {}", self.api_url, e);
                e
            })?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!("Conversion endpoint answered {} ({} bytes)", status, body.len());

        // Error responses carry JSON detail too, so the body is parsed
        // whatever the status code.
        let reply = ServerReply::from_slice(&body).map_err(|e| {
            warn!("Unreadable reply from conversion endpoint ({}): {}", status, e);
            e
        })?;

        interpret_reply(status.is_success(), reply)
    }
}

/// Decides whether a parsed reply is a finished conversion. Returns the
/// server-relative path of the converted file.
fn interpret_reply(http_ok: bool, reply: ServerReply) -> Result<String> {
    let ServerReply {
        status,
        message,
        file,
    } = reply;
    let message = message.filter(|m| !m.trim().is_empty());

    if !http_ok {
        return Err(ConvertError::server(
            message.unwrap_or_else(|| MSG_UNKNOWN_SERVER.to_string()),
        ));
    }

    if status.as_deref() != Some("success") {
        return Err(ConvertError::server(
            message.unwrap_or_else(|| MSG_UNKNOWN.to_string()),
        ));
    }

    match file.filter(|f| !f.is_empty()) {
        Some(path) => Ok(path),
        None => Err(ConvertError::server(MSG_MISSING_FILE_PATH)),
    }
}
