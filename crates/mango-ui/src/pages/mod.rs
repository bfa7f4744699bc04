pub mod about;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod patients;
pub mod profile;
pub mod register;
pub mod session_detail;
pub mod sessions;
