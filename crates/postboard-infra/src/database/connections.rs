use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, DbErr, Schema};

use super::entity::post::Entity as PostEntity;
use super::postgres_repo::PostgresPostRepository;

/// Configuration for the database connection pool.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Connection pool to the post store.
pub struct DatabasePool {
    pub conn: DbConn,
}

impl DatabasePool {
    /// Connect using the given configuration.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let conn = Database::connect(opts).await?;
        tracing::info!("Database connected (pool: {})", config.max_connections);

        Ok(Self { conn })
    }

    /// Create the `posts` table from the entity definition if it is missing.
    pub async fn ensure_schema(&self) -> Result<(), DbErr> {
        let backend = self.conn.get_database_backend();
        let mut table = Schema::new(backend).create_table_from_entity(PostEntity);
        table.if_not_exists();

        self.conn.execute(backend.build(&table)).await?;
        tracing::debug!("Posts table ready");

        Ok(())
    }

    /// Hand the pool over to a post repository.
    pub fn post_repository(self) -> PostgresPostRepository {
        PostgresPostRepository::new(self.conn)
    }
}
