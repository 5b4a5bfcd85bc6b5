use sea_orm::sea_query::Index;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, Schema, TransactionTrait,
};
use tokio::sync::RwLock;

use crate::errors::internal::DatabaseError;
use crate::errors::InternalError;
use crate::types::db::item;

/// Connection provider owning the pooled database connection
///
/// Explicitly constructed at startup and injected into the API layer; there
/// is no process-wide singleton. Each request acquires a fresh unit-of-work
/// session through `acquire_session`.
pub struct DatabaseProvider {
    conn: RwLock<Option<DatabaseConnection>>,
}

impl DatabaseProvider {
    /// Connect to the database and return a ready provider
    ///
    /// Fails on a malformed connection string or an unreachable server;
    /// startup treats this as fatal.
    pub async fn connect(database_url: &str) -> Result<Self, InternalError> {
        let conn = Database::connect(database_url)
            .await
            .map_err(|source| DatabaseError::Connect { source })?;

        tracing::debug!("Connected to database: {}", database_url);

        Ok(Self {
            conn: RwLock::new(Some(conn)),
        })
    }

    /// Wrap an existing connection, mainly for tests
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self {
            conn: RwLock::new(Some(conn)),
        }
    }

    /// Begin a unit-of-work session
    ///
    /// The transaction rolls back when dropped; call `commit` to persist.
    pub async fn acquire_session(&self) -> Result<DatabaseTransaction, InternalError> {
        let guard = self.conn.read().await;
        match guard.as_ref() {
            Some(conn) => conn
                .begin()
                .await
                .map_err(|source| DatabaseError::TransactionBegin { source }.into()),
            None => Err(DatabaseError::ProviderClosed.into()),
        }
    }

    /// Commit a unit-of-work session
    pub async fn commit(&self, session: DatabaseTransaction) -> Result<(), InternalError> {
        session
            .commit()
            .await
            .map_err(|source| DatabaseError::TransactionCommit { source }.into())
    }

    /// Liveness probe: cheap round-trip to the database
    ///
    /// Never errors; any failure (including a closed provider) reports false.
    pub async fn check_health(&self) -> bool {
        let guard = self.conn.read().await;
        match guard.as_ref() {
            Some(conn) => conn.ping().await.is_ok(),
            None => false,
        }
    }

    /// Create the items table and supporting index if absent
    ///
    /// Non-production bootstrap path, gated by the AUTO_CREATE_SCHEMA
    /// setting. Schema evolution beyond this belongs to out-of-band
    /// migration tooling.
    pub async fn ensure_schema(&self) -> Result<(), InternalError> {
        let guard = self.conn.read().await;
        let conn = guard.as_ref().ok_or(DatabaseError::ProviderClosed)?;

        let backend = conn.get_database_backend();
        let schema = Schema::new(backend);

        let mut table = schema.create_table_from_entity(item::Entity);
        table.if_not_exists();
        conn.execute(backend.build(&table))
            .await
            .map_err(|e| InternalError::database("create_items_table", e))?;

        let index = Index::create()
            .if_not_exists()
            .name("idx_items_created_at")
            .table(item::Entity)
            .col(item::Column::CreatedAt)
            .to_owned();
        conn.execute(backend.build(&index))
            .await
            .map_err(|e| InternalError::database("create_items_index", e))?;

        tracing::debug!("Database schema is in place");

        Ok(())
    }

    /// Release the connection pool
    ///
    /// Idempotent; once shut down, session acquisition fails with a
    /// provider-closed error and health reports false.
    pub async fn shutdown(&self) -> Result<(), InternalError> {
        let mut guard = self.conn.write().await;
        if let Some(conn) = guard.take() {
            conn.close()
                .await
                .map_err(|e| InternalError::database("close_connection", e))?;
            tracing::debug!("Database connection closed");
        }
        Ok(())
    }
}
