//! sea-orm backed connection lifecycle (feature `sea-orm-db`).

use super::{DatabaseConnection, PersistenceError, RECORD_NOT_FOUND};
use async_trait::async_trait;
use sea_orm::{Database, DbErr};
use tokio::sync::RwLock;

impl From<DbErr> for PersistenceError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(message) => PersistenceError::with_code(RECORD_NOT_FOUND, message),
            DbErr::RecordNotUpdated => {
                PersistenceError::with_code(RECORD_NOT_FOUND, "None of the records are updated")
            }
            other => PersistenceError::new(other.to_string()),
        }
    }
}

/// Owns a `sea_orm::DatabaseConnection` opened on `connect` and closed on `disconnect`.
pub struct SeaOrmDatabase {
    url: String,
    connection: RwLock<Option<sea_orm::DatabaseConnection>>,
}

impl SeaOrmDatabase {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connection: RwLock::new(None),
        }
    }

    /// A clone of the live connection pool, if connected.
    pub async fn connection(&self) -> Option<sea_orm::DatabaseConnection> {
        self.connection.read().await.clone()
    }
}

#[async_trait]
impl DatabaseConnection for SeaOrmDatabase {
    async fn connect(&self) -> Result<(), PersistenceError> {
        let conn = Database::connect(self.url.as_str()).await?;
        *self.connection.write().await = Some(conn);
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), PersistenceError> {
        match self.connection.write().await.take() {
            Some(conn) => conn.close().await.map_err(PersistenceError::from),
            None => Ok(()),
        }
    }
}
