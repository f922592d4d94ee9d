pub mod asset;
pub mod category;
pub mod request;
pub mod request_history;
pub mod user;
