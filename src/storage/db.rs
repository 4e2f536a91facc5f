use anyhow::{Context, Result};
use log::{debug, info};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::entities::{account, product};
use crate::record::AuditedEntity;
use crate::repositories::SeaOrmRepository;

/// Connection lifetime for in-memory databases; the data lives only as long
/// as at least one pooled connection does.
const MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Backing store handle: an open SeaORM connection plus the per-query timeout
/// handed to every repository built from it.
#[derive(Clone)]
pub struct Storage {
    pub conn: DatabaseConnection,
    query_timeout: Duration,
}

impl Storage {
    /// Open the configured database and make sure the schema exists.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .sqlx_logging(config.sqlx_logging);

        if config.url.contains(":memory:") || config.url.contains("mode=memory") {
            // Keep one connection alive for the lifetime of the handle
            options
                .min_connections(1)
                .max_connections(1)
                .max_lifetime(MEMORY_CONNECTION_LIFETIME)
                .idle_timeout(MEMORY_CONNECTION_LIFETIME);
        }

        let conn = Database::connect(options)
            .await
            .with_context(|| format!("Failed to connect to {}", config.url))?;

        let storage = Storage {
            conn,
            query_timeout: config.query_timeout(),
        };
        storage.init_schema().await?;
        info!("Connected to {}", config.url);

        Ok(storage)
    }

    /// Fresh in-memory database with default settings.
    pub async fn in_memory() -> Result<Self> {
        Self::connect(&DatabaseConfig::default()).await
    }

    /// Initialize database schema
    async fn init_schema(&self) -> Result<()> {
        self.create_table(product::Entity).await?;
        self.create_table(account::Entity).await?;
        Ok(())
    }

    /// Create the table for `entity` from its definition, if missing.
    pub async fn create_table<E: EntityTrait>(&self, entity: E) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let mut statement = Schema::new(backend).create_table_from_entity(entity);
        statement.if_not_exists();

        self.conn
            .execute(backend.build(&statement))
            .await
            .with_context(|| format!("Failed to create table {}", entity.table_name()))?;
        debug!("Ensured table {}", entity.table_name());
        Ok(())
    }

    /// Repository for `E` sharing this connection and timeout.
    pub fn repository<E: AuditedEntity>(&self) -> SeaOrmRepository<E> {
        SeaOrmRepository::new(self.conn.clone(), self.query_timeout)
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Check if the database has any data
    pub async fn has_data(&self) -> Result<bool> {
        use sea_orm::PaginatorTrait;
        let products = product::Entity::find().count(&self.conn).await?;
        let accounts = account::Entity::find().count(&self.conn).await?;
        Ok(products + accounts > 0)
    }

    /// Clear all data from the database
    pub async fn clear_all_data(&self) -> Result<()> {
        product::Entity::delete_many().exec(&self.conn).await?;
        account::Entity::delete_many().exec(&self.conn).await?;
        Ok(())
    }
}
