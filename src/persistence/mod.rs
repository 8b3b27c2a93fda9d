//! Persistence capability set
//!
//! The framework never talks to a database directly. Adapters implement two narrow
//! traits:
//!
//! - [`DatabaseConnection`]: the open/close lifecycle owned by [`crate::context::Context`]
//! - [`Model`]: `find_first` and `create` for one statically typed entity
//!
//! Failures cross the boundary as [`PersistenceError`], carrying a machine-readable
//! code. Exactly one code, [`RECORD_NOT_FOUND`], gets special treatment by
//! [`crate::service::DataService`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub mod memory;
#[cfg(feature = "sea-orm-db")]
pub mod orm;

pub use memory::{MemoryDatabase, MemoryTable, RecordFilter};

/// Failure code meaning "the record to operate on was not found".
pub const RECORD_NOT_FOUND: &str = "RECORD_NOT_FOUND";

/// A structured error surfaced by a persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PersistenceError {
    pub code: Option<String>,
    pub message: String,
}

impl PersistenceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    pub fn record_not_found(message: impl Into<String>) -> Self {
        Self::with_code(RECORD_NOT_FOUND, message)
    }

    pub fn is_record_not_found(&self) -> bool {
        self.code.as_deref() == Some(RECORD_NOT_FOUND)
    }
}

/// Arguments of [`Model::create`].
#[derive(Debug, Clone)]
pub struct CreateArgs<D, I> {
    pub data: D,
    pub include: Option<I>,
}

/// Create inputs that can carry audit timestamps.
pub trait Auditable {
    fn stamp_audit_fields(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>);
}

/// One logical model (table, collection) of the persistence layer.
#[async_trait]
pub trait Model: Send + Sync + 'static {
    type Record: Send + Sync + 'static;
    type Filter: Send + 'static;
    type CreateInput: Auditable + Send + 'static;
    type Include: Send + 'static;

    /// First record matching `filter`, or `None`.
    async fn find_first(
        &self,
        filter: Self::Filter,
        include: Option<Self::Include>,
    ) -> Result<Option<Self::Record>, PersistenceError>;

    async fn create(
        &self,
        args: CreateArgs<Self::CreateInput, Self::Include>,
    ) -> Result<Self::Record, PersistenceError>;
}

/// The connection lifecycle of a persistence backend.
///
/// Only [`crate::context::Context`] calls these; services borrow the handle and never
/// open or close it themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseConnection: Send + Sync + 'static {
    async fn connect(&self) -> Result<(), PersistenceError>;

    async fn disconnect(&self) -> Result<(), PersistenceError>;
}
