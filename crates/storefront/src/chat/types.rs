//! Wire types for the remote chat endpoint.

use serde::{Deserialize, Serialize};

use walknex_core::ProductRef;

/// The fixed welcome message seeding every transcript.
pub const WELCOME_MESSAGE: &str = "\u{1f44b} Welcome to Walknex! I'm your AI shopping assistant.\n\n\
I can help you:\n\
\u{2022} Find the perfect shoes for your needs\n\
\u{2022} Get personalized recommendations\n\
\u{2022} Track your order or answer FAQs\n\n\
How can I assist you today?";

/// Request body sent to the chat endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatEndpointRequest {
    pub message: String,
    pub session_id: String,
}

/// Response body from the chat endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatEndpointResponse {
    pub message: String,
    #[serde(default)]
    pub recommendations: Vec<ProductRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request = ChatEndpointRequest {
            message: "I need running shoes".to_string(),
            session_id: "abc-123".to_string(),
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["message"], "I need running shoes");
        assert_eq!(json["session_id"], "abc-123");
    }

    #[test]
    fn test_response_recommendations_default_empty() {
        let response: ChatEndpointResponse =
            serde_json::from_str(r#"{"message": "Hello!"}"#).expect("deserialize");
        assert_eq!(response.message, "Hello!");
        assert!(response.recommendations.is_empty());
    }
}
