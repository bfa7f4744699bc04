#![allow(non_snake_case)]

pub mod envelope;
pub mod records;
pub mod requests;

pub use envelope::*;
pub use records::*;
pub use requests::*;

use serde::{Deserialize, Serialize};

/// Name of the cookie carrying the gateway access token.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
/// Name of the cookie carrying the gateway refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";
/// Name of the cookie carrying the logged-in scientist's id.
pub const SCIENTIST_ID_COOKIE: &str = "scientistId";
/// Message of every failure caused by a missing or expired session.
pub const NOT_AUTHENTICATED: &str = "Não autenticado";

/// Claims decoded from the access token payload. The signature is never
/// checked here; the gateway owns verification.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionUser {
    pub user_id: Option<serde_json::Value>,
    pub scientist_id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    /// Expiry as seconds since the epoch.
    pub exp: Option<i64>,
}

impl SessionUser {
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.first_name.clone())
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "Usuário".to_string())
    }

    pub fn is_expired_at(&self, nowSecs: i64) -> bool {
        match self.exp {
            Some(exp) => exp <= nowSecs,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_through_claims() {
        let mut user = SessionUser::default();
        assert_eq!(user.display_name(), "Usuário");

        user.email = Some("ana@utfpr.edu.br".into());
        assert_eq!(user.display_name(), "ana@utfpr.edu.br");

        user.first_name = Some("Ana".into());
        assert_eq!(user.display_name(), "Ana");
    }

    #[test]
    fn expiry_compares_exp_claim_to_now() {
        let user = SessionUser {
            exp: Some(1_000),
            ..Default::default()
        };
        assert!(!user.is_expired_at(999));
        assert!(user.is_expired_at(1_000));
        assert!(user.is_expired_at(5_000));

        let noExp = SessionUser::default();
        assert!(!noExp.is_expired_at(i64::MAX));
    }
}
