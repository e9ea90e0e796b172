//! Lab database operations.

use super::{Database, DbResult};
use crate::models::Lab;

fn lab_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Lab> {
    Ok(Lab {
        patient_id: row.get(0)?,
        name: row.get(1)?,
        value: row.get(2)?,
        units: row.get(3)?,
        recorded_at: row.get(4)?,
    })
}

impl Database {
    /// Get all labs for a patient, in load order.
    pub fn labs_for_patient(&self, patient_id: &str) -> DbResult<Vec<Lab>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT PatientID, LabName, LabValue, LabUnits, LabDateTime
            FROM labs
            WHERE PatientID = ?
            ORDER BY LabID
            "#,
        )?;

        let rows = stmt.query_map([patient_id], lab_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List all labs, in load order.
    pub fn list_labs(&self) -> DbResult<Vec<Lab>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT PatientID, LabName, LabValue, LabUnits, LabDateTime
            FROM labs
            ORDER BY LabID
            "#,
        )?;

        let rows = stmt.query_map([], lab_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Count labs.
    pub fn lab_count(&self) -> DbResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM labs", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
