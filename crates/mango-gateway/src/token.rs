use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use mango_types::SessionUser;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is not a three-part JWT")]
    Malformed,

    #[error("token payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads the payload segment of a JWT without checking its signature.
pub fn decode_claims(token: &str) -> Result<SessionUser, TokenError> {
    let mut parts = token.trim().split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => return Err(TokenError::Malformed),
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Claims of `token` when it decodes and has not expired at `nowSecs`.
pub fn active_user(token: &str, nowSecs: i64) -> Option<SessionUser> {
    match decode_claims(token) {
        Ok(user) if !user.is_expired_at(nowSecs) => Some(user),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("ignoring undecodable access token: {e}");
            None
        }
    }
}

pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
pub(crate) fn forge(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_payload_claims() {
        let token = forge(serde_json::json!({
            "token_type": "access",
            "exp": 1_900_000_000,
            "user_id": "5b0c",
            "email": "ana@utfpr.edu.br"
        }));
        let user = decode_claims(&token).unwrap();
        assert_eq!(user.exp, Some(1_900_000_000));
        assert_eq!(user.email.as_deref(), Some("ana@utfpr.edu.br"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(decode_claims("abc"), Err(TokenError::Malformed)));
        assert!(matches!(decode_claims("a..c"), Err(TokenError::Malformed)));
        assert!(matches!(decode_claims("a.b.c.d"), Err(TokenError::Malformed)));
        assert!(matches!(decode_claims("a.!!!.c"), Err(TokenError::Base64(_))));
    }

    #[test]
    fn expired_token_is_not_active() {
        let token = forge(serde_json::json!({ "exp": 1_000 }));
        assert!(active_user(&token, 999).is_some());
        assert!(active_user(&token, 1_001).is_none());
        assert!(active_user("not-a-token", 0).is_none());
    }
}
