use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire envelope for POST /v1/send. A cached failure is returned with HTTP
/// 200 and `ok == false`: the lookup succeeded, the original send did not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl SendEmailResponse {
    pub fn sent(message_id: String, provider: String) -> Self {
        Self {
            ok: true,
            message_id: Some(message_id),
            provider: Some(provider),
            error_code: None,
            error_message: None,
        }
    }

    pub fn replayed(succeeded: bool, message_id: String, provider: String) -> Self {
        Self {
            ok: succeeded,
            message_id: if message_id.is_empty() {
                None
            } else {
                Some(message_id)
            },
            provider: Some(provider),
            error_code: None,
            error_message: None,
        }
    }

    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message_id: None,
            provider: None,
            error_code: Some(code.into()),
            error_message: Some(message.into()),
        }
    }
}

/// Liveness probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serialization_omits_error_fields() {
        let response = SendEmailResponse::sent("mid-1".to_string(), "smtp".to_string());
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"ok\":true"));
        assert!(json.contains("\"message_id\":\"mid-1\""));
        assert!(json.contains("\"provider\":\"smtp\""));
        assert!(!json.contains("error_code"));
    }

    #[test]
    fn test_failure_serialization_omits_message_id() {
        let response = SendEmailResponse::failure("send_failed", "connection refused");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"ok\":false"));
        assert!(json.contains("\"error_code\":\"send_failed\""));
        assert!(!json.contains("message_id"));
    }

    #[test]
    fn test_replayed_failure_has_no_message_id() {
        let response = SendEmailResponse::replayed(false, String::new(), "smtp".to_string());
        assert!(!response.ok);
        assert!(response.message_id.is_none());
        assert!(response.error_code.is_none());
    }
}
