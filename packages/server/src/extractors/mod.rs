pub mod auth;
pub mod input;
