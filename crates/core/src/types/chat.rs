//! Chat transcript types.
//!
//! A transcript is an append-only sequence of [`ChatMessage`]s; the session
//! machinery that owns it lives in the storefront crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A lightweight product reference attached to a bot recommendation.
///
/// Carries just enough to render a product card; the full record stays in
/// the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
}

/// One entry in a chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    /// Product recommendations attached to a bot reply.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<ProductRef>,
    /// Set on bot replies produced by the failure path.
    #[serde(default, skip_serializing_if = "std::ops::Not::not", rename = "isError")]
    pub is_error: bool,
}

impl ChatMessage {
    /// A message typed by the user.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            products: Vec::new(),
            is_error: false,
        }
    }

    /// A bot reply, optionally carrying recommendations.
    #[must_use]
    pub fn bot(text: impl Into<String>, products: Vec<ProductRef>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
            products,
            is_error: false,
        }
    }

    /// A bot reply produced by the failure path.
    #[must_use]
    pub fn bot_error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
            products: Vec::new(),
            is_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let user = ChatMessage::user("hello");
        assert_eq!(user.sender, Sender::User);
        assert!(!user.is_error);
        assert!(user.products.is_empty());

        let err = ChatMessage::bot_error("sorry");
        assert_eq!(err.sender, Sender::Bot);
        assert!(err.is_error);
    }

    #[test]
    fn test_transcript_serde_round_trip() {
        let messages = vec![
            ChatMessage::user("hi"),
            ChatMessage::bot(
                "Here you go:",
                vec![ProductRef {
                    id: ProductId::new(1),
                    name: "Air Cloud Runner".to_string(),
                    price: Price::from_cents(12999),
                    image: "https://example.com/shoe.jpeg".to_string(),
                }],
            ),
        ];

        let json = serde_json::to_string(&messages).expect("serialize");
        let back: Vec<ChatMessage> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.len(), 2);
        assert_eq!(back[1].products.len(), 1);
        assert_eq!(back[1].products[0].name, "Air Cloud Runner");
    }

    #[test]
    fn test_error_flag_uses_upstream_field_name() {
        let json = serde_json::to_string(&ChatMessage::bot_error("sorry")).expect("serialize");
        assert!(json.contains("\"isError\":true"));
    }
}
