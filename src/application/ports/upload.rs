//! Upload port interface and the parsed server response

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::capture::AudioPayload;

/// Upload errors
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server rejected the upload (HTTP {status})")]
    Server { status: u16 },

    #[error("Malformed server response: {0}")]
    MalformedResponse(String),
}

/// Intent and tags the service extracted for a stored note
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NoteMetadata {
    pub intent: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One stored-note record from a `pushed` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoredNote {
    pub audio_filename: String,
    pub transcription: String,
    #[serde(default)]
    pub formatted_content: Option<String>,
    pub uploaded_at: String,
    pub metadata: NoteMetadata,
}

/// One match from a `retrieved` response.
/// Optional fields may be absent and must be preserved as such.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RetrievedNote {
    pub text: String,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// The parsed server response, tagged by the `status` discriminant.
///
/// Any other `status` value, or a missing required field, fails
/// deserialization and is surfaced as
/// [`UploadError::MalformedResponse`] by the upload adapter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "status")]
pub enum UploadResult {
    /// `{ "status": "pushed", "notes": [...] }`
    #[serde(rename = "pushed")]
    Stored { notes: Vec<StoredNote> },

    /// `{ "status": "retrieved", "transcription": "...", "notes": [...] }`
    #[serde(rename = "retrieved")]
    Retrieved {
        transcription: String,
        notes: Vec<RetrievedNote>,
    },
}

/// Port for uploading a finalized recording.
///
/// One multipart transfer per call; no retries at this layer. Retry
/// policy, if any, belongs to the caller.
#[async_trait]
pub trait UploadClient: Send + Sync {
    /// Send the payload to the given endpoint path against the configured
    /// base address and parse the structured response.
    async fn upload(
        &self,
        payload: &AudioPayload,
        endpoint: &str,
    ) -> Result<UploadResult, UploadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pushed_response() {
        let body = r#"{
            "status": "pushed",
            "notes": [{
                "audio_filename": "a.webm",
                "transcription": "buy milk",
                "uploaded_at": "2024-01-01T00:00:00Z",
                "metadata": { "intent": "task", "tags": ["errands"] }
            }]
        }"#;

        let result: UploadResult = serde_json::from_str(body).unwrap();
        match result {
            UploadResult::Stored { notes } => {
                assert_eq!(notes.len(), 1);
                assert_eq!(notes[0].audio_filename, "a.webm");
                assert_eq!(notes[0].transcription, "buy milk");
                assert!(notes[0].formatted_content.is_none());
                assert_eq!(notes[0].metadata.intent, "task");
                assert_eq!(notes[0].metadata.tags, vec!["errands".to_string()]);
            }
            other => panic!("Expected Stored, got {:?}", other),
        }
    }

    #[test]
    fn parses_pushed_response_with_formatted_content() {
        let body = r#"{
            "status": "pushed",
            "notes": [{
                "audio_filename": "a.webm",
                "transcription": "raw words",
                "formatted_content": "Cleaned up note",
                "uploaded_at": "2024-01-01T00:00:00Z",
                "metadata": { "intent": "note", "tags": [] }
            }]
        }"#;

        let result: UploadResult = serde_json::from_str(body).unwrap();
        match result {
            UploadResult::Stored { notes } => {
                assert_eq!(
                    notes[0].formatted_content.as_deref(),
                    Some("Cleaned up note")
                );
            }
            other => panic!("Expected Stored, got {:?}", other),
        }
    }

    #[test]
    fn parses_retrieved_response_with_optional_fields_absent() {
        let body = r#"{
            "status": "retrieved",
            "transcription": "what do I need to do",
            "notes": [
                { "text": "buy milk", "intent": "task", "tags": ["errands"] },
                { "text": "call mom" }
            ]
        }"#;

        let result: UploadResult = serde_json::from_str(body).unwrap();
        match result {
            UploadResult::Retrieved {
                transcription,
                notes,
            } => {
                assert_eq!(transcription, "what do I need to do");
                assert_eq!(notes.len(), 2);
                assert_eq!(notes[0].intent.as_deref(), Some("task"));
                assert!(notes[1].intent.is_none());
                assert!(notes[1].tags.is_none());
                assert!(notes[1].timestamp.is_none());
            }
            other => panic!("Expected Retrieved, got {:?}", other),
        }
    }

    #[test]
    fn unknown_status_fails_to_parse() {
        let body = r#"{ "status": "unknown", "notes": [] }"#;
        let result: Result<UploadResult, _> = serde_json::from_str(body);
        assert!(result.is_err());
    }

    #[test]
    fn missing_required_field_fails_to_parse() {
        // Retrieved without a transcription field
        let body = r#"{ "status": "retrieved", "notes": [] }"#;
        let result: Result<UploadResult, _> = serde_json::from_str(body);
        assert!(result.is_err());
    }
}
