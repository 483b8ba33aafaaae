pub mod error;
pub mod quote_session;
pub mod summary;
