//! SQLite persistence for patients and labs.

mod ingest;
mod labs;
mod patients;
mod schema;

pub use ingest::*;
#[allow(unused_imports)]
pub use labs::*;
pub use patients::*;
pub use schema::*;

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

use crate::models::{Lab, Patient};
use crate::query::not_found;
use crate::store::RecordStore;
use crate::EhrResult;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Duplicate patient: {0}")]
    DuplicatePatient(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating it (and the tables) if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction.
    pub fn transaction(&mut self) -> DbResult<rusqlite::Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }
}

impl RecordStore for Database {
    fn lookup_patient(&self, patient_id: &str) -> EhrResult<Patient> {
        let row = self
            .get_patient_row(patient_id)?
            .ok_or_else(|| not_found(patient_id))?;
        Ok(row.to_patient()?)
    }

    fn contains_patient(&self, patient_id: &str) -> EhrResult<bool> {
        Ok(self.has_patient(patient_id)?)
    }

    fn all_labs(&self) -> EhrResult<Vec<Lab>> {
        Ok(self.list_labs()?)
    }

    fn labs_for(&self, patient_id: &str) -> EhrResult<Vec<Lab>> {
        Ok(self.labs_for_patient(patient_id)?)
    }
}
