//! HTTP upload adapter for the voice-note service

use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{UploadClient, UploadError, UploadResult};
use crate::domain::capture::AudioPayload;

/// Multipart field name carrying the recording
const AUDIO_FIELD: &str = "audio";

/// HTTP upload client.
///
/// Sends one multipart POST per call against the configured base address
/// and parses the JSON response body. An explicit per-request timeout
/// bounds the otherwise unbounded network wait.
pub struct HttpUploadClient {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpUploadClient {
    /// Create a new upload client for the given base URL
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    /// Build the full request URL for an endpoint path
    fn request_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Build the multipart form for a payload
    fn build_form(payload: &AudioPayload) -> Result<reqwest::multipart::Form, UploadError> {
        let part = reqwest::multipart::Part::bytes(payload.data().to_vec())
            .file_name(payload.upload_filename())
            .mime_str(payload.mime_type().as_str())
            .map_err(|e| UploadError::Network(format!("Failed to build upload request: {}", e)))?;

        Ok(reqwest::multipart::Form::new().part(AUDIO_FIELD, part))
    }

    /// Map a reqwest transport failure to an upload error
    fn map_transport_error(error: reqwest::Error) -> UploadError {
        if error.is_timeout() {
            UploadError::Network("Request timed out. The service is not responding.".to_string())
        } else if error.is_connect() {
            UploadError::Network(
                "Failed to connect to the voice-note service. Is it running?".to_string(),
            )
        } else {
            UploadError::Network(error.to_string())
        }
    }
}

#[async_trait]
impl UploadClient for HttpUploadClient {
    async fn upload(
        &self,
        payload: &AudioPayload,
        endpoint: &str,
    ) -> Result<UploadResult, UploadError> {
        let url = self.request_url(endpoint);
        let form = Self::build_form(payload)?;

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Server {
                status: status.as_u16(),
            });
        }

        // An unrecognized discriminant or a missing required field fails
        // deserialization here, distinct from a transport failure.
        response
            .json::<UploadResult>()
            .await
            .map_err(|e| UploadError::MalformedResponse(e.to_string()))
    }
}
