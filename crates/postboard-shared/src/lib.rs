//! # Postboard Shared
//!
//! Wire types: the JSON shape of posts and listings, and RFC 7807 error bodies.

pub mod dto;
pub mod response;

pub use dto::{PostResponse, QueryResultResponse};
pub use response::ErrorResponse;
