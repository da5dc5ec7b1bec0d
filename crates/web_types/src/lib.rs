//! Wire types for the feedback tracker HTTP API.
//!
//! Entities themselves live in `core_types`; this crate only holds the
//! request bodies, auth responses and the backend's error envelope.

use core_types::{Role, Sentiment};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of POST /auth/login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response of POST /auth/login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
}

fn bearer() -> String {
    "bearer".to_string()
}

/// Body of POST /users/.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl CreateUserRequest {
    /// Managers can only add employees to their own team.
    pub fn employee(username: String, email: String, password: String) -> Self {
        Self {
            username,
            email,
            password,
            role: Role::Employee,
        }
    }
}

/// Body of PUT /users/{id}. Unset fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.manager_id.is_none()
    }
}

/// Body of POST /feedback/.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFeedbackRequest {
    pub employee_id: i64,
    pub strengths: String,
    pub areas_to_improve: String,
    pub sentiment: Sentiment,
}

/// Body of PUT /feedback/{id}.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFeedbackRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strengths: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub areas_to_improve: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}

/// Error envelope returned by the backend: `{"detail": ...}`.
///
/// `detail` is either a plain message or a list of validation items
/// (`[{"loc": [...], "msg": "...", "type": "..."}]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Value,
}

impl ApiErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Value::String(detail.into()),
        }
    }

    /// Human-readable message carried by the envelope, if any.
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Array(items) => items
                .iter()
                .find_map(|item| item.get("msg").and_then(Value::as_str))
                .map(str::to_string),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_user_omits_unset_fields() {
        let req = UpdateUserRequest {
            email: Some("new@example.com".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json, serde_json::json!({ "email": "new@example.com" }));
        assert!(!req.is_empty());
        assert!(UpdateUserRequest::default().is_empty());
    }

    #[test]
    fn test_create_user_is_always_employee() {
        let req = CreateUserRequest::employee(
            "carol".to_string(),
            "carol@example.com".to_string(),
            "secret1".to_string(),
        );

        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["role"], "employee");
    }

    #[test]
    fn test_create_feedback_wire_shape() {
        let req = CreateFeedbackRequest {
            employee_id: 3,
            strengths: "Great ownership".to_string(),
            areas_to_improve: "Delegate more often".to_string(),
            sentiment: Sentiment::Positive,
        };

        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["employee_id"], 3);
        assert_eq!(json["sentiment"], "positive");
    }

    #[test]
    fn test_login_response_defaults_token_type() {
        let resp: LoginResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(resp.token_type, "bearer");
    }

    #[test]
    fn test_error_body_string_detail() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"detail":"Username already registered"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("Username already registered"));
    }

    #[test]
    fn test_error_body_validation_list() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address","type":"value_error"}]}"#,
        )
        .unwrap();
        assert_eq!(
            body.message().as_deref(),
            Some("value is not a valid email address")
        );
    }

    #[test]
    fn test_error_body_without_detail() {
        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.message().is_none());

        let blank = ApiErrorBody::new("  ");
        assert!(blank.message().is_none());
    }
}
