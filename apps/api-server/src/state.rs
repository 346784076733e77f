//! Application state - shared across all handlers.

use std::sync::Arc;

use postboard_core::PostService;
use postboard_core::ports::PostRepository;
use postboard_infra::InMemoryPostRepository;

#[cfg(feature = "postgres")]
use postboard_infra::{DatabaseConfig, DatabasePool};

/// Which store backs the post service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    Memory,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Postgres => "postgres",
            StorageKind::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub storage: StorageKind,
}

impl AppState {
    /// State backed by an in-memory repository.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()), StorageKind::Memory)
    }

    pub fn with_repository(repo: Arc<dyn PostRepository>, storage: StorageKind) -> Self {
        Self {
            posts: PostService::new(repo),
            storage,
        }
    }

    /// Build the application state, falling back to memory when PostgreSQL is unavailable.
    #[cfg(feature = "postgres")]
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::in_memory();
        };

        let pool = match DatabasePool::init(config).await {
            Ok(pool) => pool,
            Err(e) => {
                tracing::error!("Failed to connect to database: {}. Using in-memory fallback.", e);
                return Self::in_memory();
            }
        };

        if let Err(e) = pool.ensure_schema().await {
            tracing::error!("Failed to prepare posts table: {}. Using in-memory fallback.", e);
            return Self::in_memory();
        }

        tracing::info!("Application state initialized");
        Self::with_repository(Arc::new(pool.post_repository()), StorageKind::Postgres)
    }

    #[cfg(not(feature = "postgres"))]
    pub async fn new() -> Self {
        tracing::info!("Running without postgres feature - using in-memory repository");
        Self::in_memory()
    }
}
