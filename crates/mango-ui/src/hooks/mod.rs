pub mod auth;

pub use auth::{use_auth, AuthHandle, AuthProvider, LOGIN_PAGE};
