use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request body for POST /v1/send. Everything but `to` is optional; absent
/// fields deserialize to their empty values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendEmailRequest {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub params: HashMap<String, String>,
    #[serde(default)]
    pub idempotency_key: String,
}

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl SendEmailRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.to.trim().is_empty() {
            return Err(ValidationError {
                field: "to".to_string(),
                message: "to is required".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_destination() {
        let request = SendEmailRequest::default();
        let err = request.validate().unwrap_err();
        assert_eq!(err.field, "to");

        let blank = SendEmailRequest {
            to: "   ".to_string(),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_destination_only() {
        let request = SendEmailRequest {
            to: "user@example.com".to_string(),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_deserializes_with_missing_optional_fields() {
        let request: SendEmailRequest =
            serde_json::from_str(r#"{"to":"user@example.com"}"#).unwrap();
        assert_eq!(request.to, "user@example.com");
        assert!(request.subject.is_empty());
        assert!(request.params.is_empty());
        assert!(request.idempotency_key.is_empty());
    }

    #[test]
    fn test_deserializes_params_map() {
        let request: SendEmailRequest = serde_json::from_str(
            r#"{"to":"u@e.com","params":{"code":"123456"},"idempotency_key":"k-1"}"#,
        )
        .unwrap();
        assert_eq!(request.params.get("code").unwrap(), "123456");
        assert_eq!(request.idempotency_key, "k-1");
    }
}
