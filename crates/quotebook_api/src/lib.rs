//! Request boundary for Quotebook.
//!
//! Transport-agnostic handlers mirroring the HTTP routes of the quote
//! application. A web server maps its requests onto these calls and writes
//! back the returned [`ApiResponse`].

pub mod api;
pub mod config;
pub mod context;
pub mod response;

pub use api::QuoteApi;
pub use config::ApiConfig;
pub use context::{RequestContext, Session};
pub use response::ApiResponse;
