#![allow(non_snake_case)]

pub mod client;
pub mod error;
pub mod token;

pub use client::{Ack, GatewayClient, LoginGrant, PictureUpload, MAX_PICTURE_BYTES};
pub use error::{GatewayError, Result};
