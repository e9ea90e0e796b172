//! Loading parsed tables into the store.

use std::path::Path;

use log::info;
use rusqlite::{params, ErrorCode};

use super::{Database, DbError, DbResult, DROP_SCHEMA, SCHEMA};
use crate::tabular::{parse_data, LabTable, PatientTable};
use crate::{EhrError, EhrResult};

/// Row counts written by a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub patients: usize,
    pub labs: usize,
}

impl Database {
    /// Rebuild the store at `store_path` from a patient file and a lab file.
    ///
    /// Both sources are checked and parsed before the existing store file is
    /// deleted, so a missing or malformed source leaves it untouched.
    pub fn ingest<P, L, S>(patient_path: P, lab_path: L, store_path: S) -> EhrResult<Self>
    where
        P: AsRef<Path>,
        L: AsRef<Path>,
        S: AsRef<Path>,
    {
        let (patient_path, lab_path, store_path) =
            (patient_path.as_ref(), lab_path.as_ref(), store_path.as_ref());

        for source in [patient_path, lab_path] {
            if !source.is_file() {
                return Err(EhrError::FileNotFound(source.to_path_buf()));
            }
        }
        let (patients, labs) = parse_data(patient_path, lab_path)?;

        if store_path.exists() {
            info!("Removing existing store {}", store_path.display());
            std::fs::remove_file(store_path)?;
        }

        let mut db = Database::open(store_path)?;
        let summary = db.load_tables(&patients, &labs)?;
        info!(
            "Ingested {} patients and {} labs into {}",
            summary.patients,
            summary.labs,
            store_path.display()
        );
        Ok(db)
    }

    /// Replace the store contents with the rows of two parsed tables.
    ///
    /// Cells are written verbatim; a missing `PatientRace` or `LabUnits`
    /// column is stored as NULL.
    pub fn load_tables(&mut self, patients: &PatientTable, labs: &LabTable) -> DbResult<LoadSummary> {
        let tx = self.transaction()?;
        tx.execute_batch(DROP_SCHEMA)?;
        tx.execute_batch(SCHEMA)?;

        {
            let mut insert_patient = tx.prepare(
                "INSERT INTO patients (PatientID, PatientDateOfBirth, PatientRace) VALUES (?1, ?2, ?3)",
            )?;
            for (row, patient_id) in patients.ids().iter().enumerate() {
                insert_patient
                    .execute(params![
                        patient_id,
                        patients.date_of_birth_at(row),
                        patients.race_at(row),
                    ])
                    .map_err(|e| duplicate_or(e, patient_id))?;
            }

            let mut insert_lab = tx.prepare(
                r#"
                INSERT INTO labs (PatientID, LabName, LabValue, LabUnits, LabDateTime)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )?;
            for lab in labs.labs() {
                insert_lab.execute(params![
                    lab.patient_id,
                    lab.name,
                    lab.value,
                    lab.units,
                    lab.recorded_at,
                ])?;
            }
        }

        tx.commit()?;
        Ok(LoadSummary {
            patients: patients.len(),
            labs: labs.len(),
        })
    }
}

fn duplicate_or(e: rusqlite::Error, patient_id: &str) -> DbError {
    match e {
        rusqlite::Error::SqliteFailure(ref failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            DbError::DuplicatePatient(patient_id.to_string())
        }
        other => DbError::Sqlite(other),
    }
}
