pub mod auth;
pub mod common;
