//! Post storage: PostgreSQL via SeaORM, plus an in-memory fallback.

mod memory_repo;

#[cfg(feature = "postgres")]
mod connections;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use memory_repo::InMemoryPostRepository;

#[cfg(feature = "postgres")]
pub use connections::{DatabaseConfig, DatabasePool};

#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresPostRepository;
