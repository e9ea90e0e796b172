//! Columnar store: queries run directly over the parsed tables.

use std::path::Path;

use super::RecordStore;
use crate::models::{Lab, Patient};
use crate::query::not_found;
use crate::tabular::{parse_data, LabTable, PatientTable};
use crate::EhrResult;

/// Patient and lab tables queried by column scans.
///
/// Patient lookups find the first row with a matching `PatientID`; lab
/// lookups scan the whole lab table. Cells are only interpreted when a
/// query reads them.
#[derive(Debug, Clone)]
pub struct ColumnarStore {
    patients: PatientTable,
    labs: LabTable,
}

impl ColumnarStore {
    pub fn new(patients: PatientTable, labs: LabTable) -> Self {
        Self { patients, labs }
    }

    /// Parse a patient file and a lab file.
    pub fn load<P: AsRef<Path>, L: AsRef<Path>>(patient_path: P, lab_path: L) -> EhrResult<Self> {
        let (patients, labs) = parse_data(patient_path, lab_path)?;
        Ok(Self::new(patients, labs))
    }

    pub fn patients(&self) -> &PatientTable {
        &self.patients
    }

    pub fn labs(&self) -> &LabTable {
        &self.labs
    }
}

impl RecordStore for ColumnarStore {
    fn lookup_patient(&self, patient_id: &str) -> EhrResult<Patient> {
        let row = self
            .patients
            .position(patient_id)
            .ok_or_else(|| not_found(patient_id))?;
        Ok(self.patients.patient_at(row)?)
    }

    fn contains_patient(&self, patient_id: &str) -> EhrResult<bool> {
        Ok(self.patients.position(patient_id).is_some())
    }

    fn all_labs(&self) -> EhrResult<Vec<Lab>> {
        Ok(self.labs.labs().collect())
    }

    fn labs_for(&self, patient_id: &str) -> EhrResult<Vec<Lab>> {
        Ok(self.labs.labs_for(patient_id))
    }
}
