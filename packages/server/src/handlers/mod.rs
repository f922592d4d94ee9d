pub mod auth;
pub mod catalog;
pub mod index;
pub mod requests;
pub mod users;
