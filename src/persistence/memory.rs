//! In-memory persistence adapter for tests and demos.

use super::{Auditable, CreateArgs, DatabaseConnection, Model, PersistenceError};
use async_trait::async_trait;
use dashmap::DashMap;
use std::any::Any;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Failure code for operations on a disconnected [`MemoryDatabase`].
pub const CONNECTION_CLOSED: &str = "CONNECTION_CLOSED";

/// Predicate used as the `Filter` of a [`MemoryTable`].
pub type RecordFilter<R> = Box<dyn Fn(&R) -> bool + Send + Sync>;

/// A connection handle owning named [`MemoryTable`]s.
///
/// Tables share the database's connected flag: while disconnected every table
/// operation fails with [`CONNECTION_CLOSED`].
pub struct MemoryDatabase {
    connected: Arc<AtomicBool>,
    tables: DashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl Default for MemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self {
            connected: Arc::new(AtomicBool::new(false)),
            tables: DashMap::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Get or create the table `name` holding records of type `R`.
    pub fn table<R>(&self, name: &str) -> Result<Arc<MemoryTable<R>>, PersistenceError>
    where
        R: Clone + Send + Sync + 'static,
    {
        let table = self
            .tables
            .entry(name.to_string())
            .or_insert_with(|| {
                Arc::new(MemoryTable::<R>::with_flag(name, Arc::clone(&self.connected)))
                    as Arc<dyn Any + Send + Sync>
            })
            .value()
            .clone();

        table.downcast::<MemoryTable<R>>().map_err(|_| {
            PersistenceError::new(format!("Table '{}' holds a different record type", name))
        })
    }
}

#[async_trait]
impl DatabaseConnection for MemoryDatabase {
    async fn connect(&self) -> Result<(), PersistenceError> {
        self.connected.store(true, Ordering::SeqCst);
        tracing::debug!("MemoryDatabase connected ({} tables)", self.tables.len());
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), PersistenceError> {
        self.connected.store(false, Ordering::SeqCst);
        tracing::debug!("MemoryDatabase disconnected");
        Ok(())
    }
}

/// A single table of records kept in insertion order.
pub struct MemoryTable<R> {
    name: String,
    rows: DashMap<u64, R>,
    next_id: AtomicU64,
    connected: Arc<AtomicBool>,
    injected_failure: Mutex<Option<PersistenceError>>,
}

impl<R> MemoryTable<R>
where
    R: Clone + Send + Sync + 'static,
{
    /// A standalone table, always connected.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_flag(name, Arc::new(AtomicBool::new(true)))
    }

    fn with_flag(name: impl Into<String>, connected: Arc<AtomicBool>) -> Self {
        Self {
            name: name.into(),
            rows: DashMap::new(),
            next_id: AtomicU64::new(1),
            connected,
            injected_failure: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Make the next operation on this table fail with `error`.
    pub fn fail_next(&self, error: PersistenceError) {
        let mut slot = self
            .injected_failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(error);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All records, in insertion order.
    pub fn all(&self) -> Vec<R> {
        let mut rows: Vec<(u64, R)> = self
            .rows
            .iter()
            .map(|row| (*row.key(), row.value().clone()))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        rows.into_iter().map(|(_, record)| record).collect()
    }

    fn check_available(&self) -> Result<(), PersistenceError> {
        let injected = self
            .injected_failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(error) = injected {
            return Err(error);
        }
        if !self.connected.load(Ordering::SeqCst) {
            return Err(PersistenceError::with_code(
                CONNECTION_CLOSED,
                format!("Connection closed while accessing '{}'", self.name),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl<R> Model for MemoryTable<R>
where
    R: Auditable + Clone + Send + Sync + 'static,
{
    type Record = R;
    type Filter = RecordFilter<R>;
    type CreateInput = R;
    type Include = ();

    async fn find_first(
        &self,
        filter: RecordFilter<R>,
        _include: Option<()>,
    ) -> Result<Option<R>, PersistenceError> {
        self.check_available()?;

        Ok(self
            .rows
            .iter()
            .filter(|row| filter(row.value()))
            .min_by_key(|row| *row.key())
            .map(|row| row.value().clone()))
    }

    async fn create(&self, args: CreateArgs<R, ()>) -> Result<R, PersistenceError> {
        self.check_available()?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.rows.insert(id, args.data.clone());
        Ok(args.data)
    }
}
