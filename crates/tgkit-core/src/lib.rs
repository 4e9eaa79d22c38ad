//! Core data model and transport facade for the tgkit Telegram bot library.
//!
//! This crate owns everything below the dispatch layer:
//!
//! - [`model`] — raw payload types (updates, messages, queries) and the
//!   classification logic that turns implicit wire discriminants into
//!   explicit tags;
//! - [`ApiResponse`] — the response envelope every Bot API method answers
//!   with;
//! - [`RequestSender`] — the single-method transport facade; the dispatch
//!   core never performs network I/O itself;
//! - [`mock`] — a recording transport double for tests.

pub mod api;
pub mod error;
pub mod mock;
pub mod model;
pub mod transport;

pub use api::ApiResponse;
pub use error::{ApiError, ApiResult};
pub use transport::{RequestSender, SharedSender};
