use serde::{Deserialize, Serialize};

use crate::SessionUser;

/// Uniform body returned by every `/bff` route.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn ok_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Answer of `GET /bff/scientist/auth`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    pub is_logged_in: bool,
    pub user: Option<SessionUser>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub registration_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_omits_data_field() {
        let body = serde_json::to_value(ApiResponse::<()>::failure("not authenticated")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "success": false, "message": "not authenticated" })
        );
    }

    #[test]
    fn auth_status_uses_camel_case() {
        let body = serde_json::to_value(AuthStatus::default()).unwrap();
        assert_eq!(body, serde_json::json!({ "isLoggedIn": false, "user": null }));
    }
}
