//! EHR Core Library
//!
//! Ingests tab-delimited patient and lab extracts and answers age and
//! lab-threshold questions about individual patients.
//!
//! # Architecture
//!
//! ```text
//!  Patient.txt      Lab.txt
//!       │              │
//!       ▼              ▼
//!  ┌──────────────────────────┐
//!  │      Tabular Parser      │   header + rows → columnar Table
//!  └────────────┬─────────────┘
//!               │
//!       PatientTable / LabTable  (required columns validated)
//!               │
//!   ┌───────────┼──────────────────────┐
//!   │           │                      │
//!   ▼           ▼                      ▼
//! Columnar    Cohort               SQLite store
//! (scans)     (Patient/Lab objects) (patients, labs)
//!   │           │                      │
//!   └───────────┴──────────┬───────────┘
//!                          │  RecordStore
//!                          ▼
//!                    QueryEngine
//!          age · age_at_first_lab · is_sick
//! ```
//!
//! # Modules
//!
//! - [`tabular`]: Tab-delimited parser and typed patient/lab tables
//! - [`models`]: Domain types (Patient, Lab, PatientChart, Comparison)
//! - [`store`]: The `RecordStore` seam plus the in-memory shapes
//! - [`db`]: SQLite persistence adapter
//! - [`query`]: Age arithmetic and the query engine
//! - [`config`]: Query configuration

pub mod config;
pub mod db;
pub mod models;
pub mod query;
pub mod store;
pub mod tabular;

// Re-export commonly used types
pub use config::QueryConfig;
pub use db::Database;
pub use models::{Comparison, Lab, Patient, PatientChart};
pub use query::{years_between, QueryEngine};
pub use store::{Cohort, ColumnarStore, RecordStore};
pub use tabular::{parse_data, parse_file, LabTable, ParseError, PatientTable, Table};

use std::path::PathBuf;

// =========================================================================
// Error Type
// =========================================================================

#[derive(Debug, thiserror::Error)]
pub enum EhrError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No data: {0}")]
    NoData(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] db::DbError),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type EhrResult<T> = Result<T, EhrError>;
