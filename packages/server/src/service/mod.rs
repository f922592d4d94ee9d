//! Operations behind the HTTP handlers. Each service borrows the
//! connection it runs on, so handlers and tests choose the store.

pub mod auth;
pub mod catalog;
pub mod request;

pub use auth::AuthService;
pub use catalog::CatalogService;
pub use request::RequestService;
