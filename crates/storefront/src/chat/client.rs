//! HTTP client for the remote chat endpoint.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::instrument;

use super::error::ChatError;
use super::types::{ChatEndpointRequest, ChatEndpointResponse};

/// Remote chat endpoint client.
///
/// Built once per session with a bounded timeout; a timed-out or failed
/// request surfaces as [`ChatError`] and the caller decides between the
/// fallback responder and a user-visible error message. No automatic retry.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<ChatClientInner>,
}

struct ChatClientInner {
    client: reqwest::Client,
    endpoint: String,
}

impl ChatClient {
    /// Create a client for `endpoint` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Build`] if the HTTP client cannot be constructed.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ChatError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::Build(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(ChatClientInner {
                client,
                endpoint: endpoint.into(),
            }),
        })
    }

    /// The configured endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// Send one user message and await the bot reply.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Http`] on network failure or timeout,
    /// [`ChatError::Status`] on a non-2xx response, and
    /// [`ChatError::Malformed`] when the body cannot be decoded.
    #[instrument(skip(self, message), fields(endpoint = %self.inner.endpoint))]
    pub async fn respond(
        &self,
        message: &str,
        session_id: &str,
    ) -> Result<ChatEndpointResponse, ChatError> {
        let request = ChatEndpointRequest {
            message: message.to_string(),
            session_id: session_id.to_string(),
        };

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status(status.as_u16()));
        }

        response
            .json::<ChatEndpointResponse>()
            .await
            .map_err(|e| ChatError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_with_timeout() {
        let client = ChatClient::new("http://localhost:8000/api/chatbot/", Duration::from_secs(15))
            .expect("build client");
        assert_eq!(client.endpoint(), "http://localhost:8000/api/chatbot/");
    }
}
