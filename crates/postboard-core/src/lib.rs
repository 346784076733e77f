//! # Postboard Core
//!
//! The domain layer of the Postboard backend: the Post record, the repository
//! port, the post service and the inbound request schemas.
//! This crate has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

pub use error::{DomainError, RepoError};
pub use services::PostService;
pub use validation::ValidationFailure;
