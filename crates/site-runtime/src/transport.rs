use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::submit::SubmissionRequest;

/// Body the endpoint answers with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// A missing flag reads as a rejection.
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmitResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: Option<String>) -> Self {
        Self {
            success: false,
            message,
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("response is not a submit result: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid endpoint '{0}'")]
    InvalidEndpoint(String),
    #[error("endpoint unavailable: {0}")]
    Unavailable(String),
}

/// One network exchange per submission.
#[async_trait]
pub trait SubmitTransport: Send + Sync {
    async fn send(&self, request: &SubmissionRequest) -> Result<SubmitResponse, TransportError>;
}

/// Posts the submission body as JSON to an endpoint resolved against the site origin.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: Url,
}

impl HttpTransport {
    pub fn new(base: &str) -> Result<Self, TransportError> {
        Self::with_client(reqwest::Client::new(), base)
    }

    pub fn with_client(client: reqwest::Client, base: &str) -> Result<Self, TransportError> {
        let base = Url::parse(base).map_err(|_| TransportError::InvalidEndpoint(base.into()))?;
        Ok(Self { client, base })
    }

    pub fn resolve(&self, endpoint: &str) -> Result<Url, TransportError> {
        self.base
            .join(endpoint)
            .map_err(|_| TransportError::InvalidEndpoint(endpoint.into()))
    }
}

#[async_trait]
impl SubmitTransport for HttpTransport {
    async fn send(&self, request: &SubmissionRequest) -> Result<SubmitResponse, TransportError> {
        let url = self.resolve(&request.endpoint)?;
        debug!(form = %request.form_id, %url, fields = request.body.len(), "posting submission");
        let response = self.client.post(url).json(&request.body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        // The body decides the outcome; the status code is only logged.
        debug!(%status, "submission response received");
        decode_response(&bytes)
    }
}

/// Parses the endpoint's answer. A body that is not a JSON object is a transport failure.
pub fn decode_response(body: &[u8]) -> Result<SubmitResponse, TransportError> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_accepted_and_rejected_bodies() {
        assert_eq!(
            decode_response(br#"{"success":true}"#).unwrap(),
            SubmitResponse::accepted()
        );
        assert_eq!(
            decode_response(br#"{"success":false,"message":"Duplicate"}"#).unwrap(),
            SubmitResponse::rejected(Some("Duplicate".into()))
        );
    }

    #[test]
    fn missing_success_flag_is_a_rejection() {
        assert_eq!(
            decode_response(br#"{"message":"Duplicate"}"#).unwrap(),
            SubmitResponse::rejected(Some("Duplicate".into()))
        );
        assert_eq!(
            decode_response(b"{}").unwrap(),
            SubmitResponse::rejected(None)
        );
    }

    #[test]
    fn null_and_empty_messages_decode_as_given() {
        assert_eq!(
            decode_response(br#"{"success":false,"message":null}"#).unwrap(),
            SubmitResponse::rejected(None)
        );
        assert_eq!(
            decode_response(br#"{"success":false,"message":""}"#).unwrap(),
            SubmitResponse::rejected(Some(String::new()))
        );
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        assert!(matches!(
            decode_response(b"<html>502 Bad Gateway</html>"),
            Err(TransportError::Decode(_))
        ));
        assert!(matches!(decode_response(b""), Err(TransportError::Decode(_))));
        assert!(matches!(
            decode_response(b"[true]"),
            Err(TransportError::Decode(_))
        ));
    }
}
