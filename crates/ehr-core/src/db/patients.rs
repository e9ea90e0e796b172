//! Patient database operations.

use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

use super::{Database, DbResult};
use crate::models::Patient;
use crate::tabular::ParseError;

/// A `patients` row exactly as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientRow {
    pub patient_id: String,
    pub date_of_birth: Option<String>,
    pub race: Option<String>,
}

impl PatientRow {
    /// Interpret the stored text, parsing the birth date.
    pub fn to_patient(&self) -> Result<Patient, ParseError> {
        Patient::from_text(
            &self.patient_id,
            self.date_of_birth.as_deref().unwrap_or_default(),
            self.race.as_deref(),
        )
    }
}

fn patient_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok(PatientRow {
        patient_id: row.get(0)?,
        date_of_birth: row.get(1)?,
        race: row.get(2)?,
    })
}

impl Database {
    /// Get a patient row by identifier.
    pub fn get_patient_row(&self, patient_id: &str) -> DbResult<Option<PatientRow>> {
        self.conn
            .query_row(
                r#"
                SELECT PatientID, PatientDateOfBirth, PatientRace
                FROM patients
                WHERE PatientID = ?
                "#,
                [patient_id],
                patient_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Check whether a patient exists.
    pub fn has_patient(&self, patient_id: &str) -> DbResult<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM patients WHERE PatientID = ?)",
            [patient_id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// List all patient rows in load order.
    pub fn patient_rows(&self) -> DbResult<Vec<PatientRow>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT PatientID, PatientDateOfBirth, PatientRace
            FROM patients
            ORDER BY rowid
            "#,
        )?;

        let rows = stmt.query_map([], patient_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Count patients.
    pub fn patient_count(&self) -> DbResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
