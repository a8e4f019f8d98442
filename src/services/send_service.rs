use crate::api::requests::SendEmailRequest;
use crate::idempotency::IdempotencyStore;
use crate::observability::mask_email;
use crate::sender::{EmailSender, OutboundEmail};
use std::sync::Arc;

/// Subject used when the request leaves it empty.
pub const DEFAULT_SUBJECT: &str = "Verification code";

const CODE_BODY_PREFIX: &str = "Your verification code is: ";
const GENERIC_BODY: &str = "You have a verification message. Please check your code.";
const GENERIC_ERROR_CODE: &str = "send_failed";

/// Terminal state of one orchestrated send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendDisposition {
    /// Cache hit: the outcome of an earlier send with the same key,
    /// replayed without invoking the sender. `succeeded` may be false;
    /// remembering a failure is itself a successful lookup.
    Replayed {
        succeeded: bool,
        message_id: String,
        provider: String,
    },
    /// The sender accepted the message.
    Sent {
        message_id: String,
        provider: String,
    },
    /// The send failed, either in transport or at the provider.
    Failed { code: String, message: String },
}

/// Orchestrates a validated send request: cache lookup, content defaulting,
/// a single sender invocation, and outcome caching.
pub struct SendService {
    sender: Arc<dyn EmailSender>,
    store: Arc<IdempotencyStore>,
}

impl SendService {
    pub fn new(sender: Arc<dyn EmailSender>, store: Arc<IdempotencyStore>) -> Self {
        Self { sender, store }
    }

    pub fn store(&self) -> Arc<IdempotencyStore> {
        self.store.clone()
    }

    /// Handles a request that already passed authentication and validation.
    /// `idempotency_key` is the resolved key, if any; without one every
    /// request executes independently and nothing is cached.
    pub async fn handle(
        &self,
        request: SendEmailRequest,
        idempotency_key: Option<&str>,
    ) -> SendDisposition {
        let provider = self.sender.name();

        if let Some(key) = idempotency_key {
            if let Some(cached) = self.store.get(key) {
                tracing::debug!(
                    to = %mask_email(&request.to),
                    cached_ok = cached.succeeded,
                    message_id = %cached.message_id,
                    "send replayed from idempotency cache"
                );
                return SendDisposition::Replayed {
                    succeeded: cached.succeeded,
                    message_id: cached.message_id,
                    provider: provider.to_string(),
                };
            }
        }

        let email = OutboundEmail {
            to: request.to.clone(),
            subject: resolve_subject(&request),
            body: resolve_body(&request),
            locale: request.locale.clone(),
            idempotency_key: idempotency_key.unwrap_or_default().to_string(),
            params: request.params.clone(),
        };

        match self.sender.send(email).await {
            Err(err) => {
                tracing::warn!(
                    to = %mask_email(&request.to),
                    error = %err,
                    "send failed: transport error"
                );
                if let Some(key) = idempotency_key {
                    self.store.set(key, false, "");
                }
                SendDisposition::Failed {
                    code: GENERIC_ERROR_CODE.to_string(),
                    message: err.to_string(),
                }
            }
            Ok(report) if report.ok => {
                if let Some(key) = idempotency_key {
                    self.store.set(key, true, &report.message_id);
                }
                tracing::info!(
                    to = %mask_email(&request.to),
                    message_id = %report.message_id,
                    keyed = idempotency_key.is_some(),
                    "send ok"
                );
                SendDisposition::Sent {
                    message_id: report.message_id,
                    provider: provider.to_string(),
                }
            }
            Ok(report) => {
                let (code, message) = match report.error {
                    Some(provider_error) => (provider_error.reason, provider_error.message),
                    None => (GENERIC_ERROR_CODE.to_string(), String::new()),
                };
                tracing::warn!(
                    to = %mask_email(&request.to),
                    code = %code,
                    "send failed: provider rejected"
                );
                if let Some(key) = idempotency_key {
                    self.store.set(key, false, "");
                }
                SendDisposition::Failed { code, message }
            }
        }
    }
}

fn resolve_subject(request: &SendEmailRequest) -> String {
    if request.subject.is_empty() {
        DEFAULT_SUBJECT.to_string()
    } else {
        request.subject.clone()
    }
}

fn resolve_body(request: &SendEmailRequest) -> String {
    if !request.body.is_empty() {
        return request.body.clone();
    }
    if let Some(code) = request.params.get("code") {
        return format!("{CODE_BODY_PREFIX}{code}");
    }
    GENERIC_BODY.to_string()
}
