use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use mango_gateway::GatewayError;
use mango_types::{ApiResponse, NOT_AUTHENTICATED};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BffError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("{message}")]
    Status { status: StatusCode, message: String },
}

impl BffError {
    pub fn not_authenticated() -> Self {
        BffError::Unauthorized(NOT_AUTHENTICATED.into())
    }

    /// Upstream status is relayed; a gateway that never answered is a 502.
    pub fn status(&self) -> StatusCode {
        match self {
            BffError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            BffError::BadRequest(_) | BffError::Gateway(GatewayError::InvalidInput(_)) => {
                StatusCode::BAD_REQUEST
            }
            BffError::Gateway(GatewayError::Upstream { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            BffError::Gateway(GatewayError::Transport(_)) => StatusCode::BAD_GATEWAY,
            BffError::Gateway(GatewayError::Decode(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            BffError::Status { status, .. } => *status,
        }
    }

    /// Forces the response status while keeping the message, for routes whose
    /// failures always surface with one code.
    pub fn with_status(self, status: StatusCode) -> Self {
        BffError::Status {
            status,
            message: self.to_string(),
        }
    }
}

impl IntoResponse for BffError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, "bff request failed: {self}");
        } else {
            tracing::debug!(%status, "bff request rejected: {self}");
        }
        (status, Json(ApiResponse::<()>::failure(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_is_relayed() {
        let err = BffError::from(GatewayError::Upstream {
            status: 404,
            detail: "Arquivo não encontrado".into(),
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Arquivo não encontrado");
    }

    #[test]
    fn override_keeps_message() {
        let err = BffError::from(GatewayError::Upstream {
            status: 500,
            detail: "Invalid credentials".into(),
        })
        .with_status(StatusCode::UNAUTHORIZED);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn rejected_input_is_a_bad_request() {
        let err = BffError::from(GatewayError::InvalidInput("Identificador inválido".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn decode_failures_are_internal() {
        let err = BffError::from(GatewayError::Decode("expected value".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
