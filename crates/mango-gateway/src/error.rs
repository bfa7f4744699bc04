use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{detail}")]
    Upstream { status: u16, detail: String },

    #[error("unexpected gateway response: {0}")]
    Decode(String),

    /// Rejected before any request was sent.
    #[error("{0}")]
    InvalidInput(String),
}

impl GatewayError {
    /// Status code the gateway answered with, if it answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            GatewayError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pulls a human-readable message out of an error body. The gateway answers
/// with `{"detail": ...}`, the REST layer behind it sometimes with
/// `{"message": ...}` or per-field error lists.
pub fn upstream_detail(status: u16, body: &str) -> String {
    let fallback = || format!("gateway returned {status}");

    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => {
            let text = body.trim();
            return if text.is_empty() {
                fallback()
            } else {
                text.to_string()
            };
        }
    };

    match &value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Object(map) => {
            for key in ["detail", "message", "error"] {
                if let Some(found) = map.get(key).and_then(message_of) {
                    return found;
                }
            }
            let joined: Vec<String> = map.values().filter_map(message_of).collect();
            if joined.is_empty() {
                fallback()
            } else {
                joined.join(" | ")
            }
        }
        _ => fallback(),
    }
}

fn message_of(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    serde_json::Value::Object(o) => o.get("msg").and_then(message_of),
                    other => message_of(other),
                })
                .collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_detail_then_message() {
        assert_eq!(
            upstream_detail(401, r#"{"detail":"Invalid credentials"}"#),
            "Invalid credentials"
        );
        assert_eq!(
            upstream_detail(400, r#"{"message":"CPF já cadastrado"}"#),
            "CPF já cadastrado"
        );
    }

    #[test]
    fn joins_field_errors() {
        let body = r#"{"email":["Email já existe."],"password":["Muito curta.","Muito comum."]}"#;
        assert_eq!(
            upstream_detail(400, body),
            "Email já existe. | Muito curta., Muito comum."
        );
    }

    #[test]
    fn validation_arrays_use_msg() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"field required"}]}"#;
        assert_eq!(upstream_detail(422, body), "field required");
    }

    #[test]
    fn raw_text_and_empty_bodies() {
        assert_eq!(upstream_detail(502, "Bad Gateway"), "Bad Gateway");
        assert_eq!(upstream_detail(500, "  "), "gateway returned 500");
        assert_eq!(upstream_detail(500, "{}"), "gateway returned 500");
    }
}
