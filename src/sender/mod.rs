pub mod smtp;

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub use smtp::SmtpSender;

/// Fully assembled message handed to a sender.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub locale: String,
    pub idempotency_key: String,
    pub params: HashMap<String, String>,
}

/// Structured failure reported by a provider that accepted the request but
/// refused the send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub reason: String,
    pub message: String,
}

/// Result of a sender invocation that completed without a transport error.
#[derive(Debug, Clone)]
pub struct SendReport {
    pub ok: bool,
    pub message_id: String,
    pub error: Option<ProviderError>,
}

impl SendReport {
    pub fn delivered(message_id: impl Into<String>) -> Self {
        Self {
            ok: true,
            message_id: message_id.into(),
            error: None,
        }
    }

    pub fn rejected(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message_id: String::new(),
            error: Some(ProviderError {
                reason: reason.into(),
                message: message.into(),
            }),
        }
    }
}

/// Email transmission capability. Transport failures (connection refused,
/// timeout, TLS errors) surface as `Err`; provider-level rejections come back
/// as a `SendReport` with `ok == false`.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> Result<SendReport>;

    /// Provider name reported in responses.
    fn name(&self) -> &'static str;
}
