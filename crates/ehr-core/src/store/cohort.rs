//! Object store: flat `Patient` and `Lab` collections.

use std::collections::HashSet;
use std::path::Path;

use log::{debug, warn};

use super::RecordStore;
use crate::models::{Lab, Patient};
use crate::query::not_found;
use crate::tabular::{parse_data, LabTable, PatientTable};
use crate::EhrResult;

/// Every patient and lab built eagerly as objects.
///
/// Construction validates each birth date, lab value and lab date, so a
/// loaded cohort never fails a query with a parse error. Labs are matched to
/// patients by filtering the flat lab list on each lookup.
#[derive(Debug, Clone, Default)]
pub struct Cohort {
    patients: Vec<Patient>,
    labs: Vec<Lab>,
}

impl Cohort {
    /// Build a cohort from objects, validating every lab.
    pub fn new(patients: Vec<Patient>, labs: Vec<Lab>) -> EhrResult<Self> {
        for lab in &labs {
            lab.validate()?;
        }
        warn_duplicates(&patients);
        Ok(Self { patients, labs })
    }

    /// Build a cohort from parsed tables.
    pub fn from_tables(patients: &PatientTable, labs: &LabTable) -> EhrResult<Self> {
        let patients = patients.patients().collect::<Result<Vec<_>, _>>()?;
        let labs = labs.labs().collect();
        let cohort = Self::new(patients, labs)?;
        debug!(
            "Built cohort of {} patients and {} labs",
            cohort.patients.len(),
            cohort.labs.len()
        );
        Ok(cohort)
    }

    /// Parse a patient file and a lab file.
    pub fn load<P: AsRef<Path>, L: AsRef<Path>>(patient_path: P, lab_path: L) -> EhrResult<Self> {
        let (patients, labs) = parse_data(patient_path, lab_path)?;
        Self::from_tables(&patients, &labs)
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn labs(&self) -> &[Lab] {
        &self.labs
    }

    /// The first patient with this identifier.
    pub fn patient(&self, patient_id: &str) -> Option<&Patient> {
        self.patients.iter().find(|patient| patient.id == patient_id)
    }
}

fn warn_duplicates(patients: &[Patient]) {
    let mut seen = HashSet::new();
    for patient in patients {
        if !seen.insert(patient.id.as_str()) {
            warn!("Duplicate patient {}; lookups use the first record", patient.id);
        }
    }
}

impl RecordStore for Cohort {
    fn lookup_patient(&self, patient_id: &str) -> EhrResult<Patient> {
        self.patient(patient_id)
            .cloned()
            .ok_or_else(|| not_found(patient_id))
    }

    fn contains_patient(&self, patient_id: &str) -> EhrResult<bool> {
        Ok(self.patient(patient_id).is_some())
    }

    fn all_labs(&self) -> EhrResult<Vec<Lab>> {
        Ok(self.labs.clone())
    }

    fn labs_for(&self, patient_id: &str) -> EhrResult<Vec<Lab>> {
        Ok(self
            .labs
            .iter()
            .filter(|lab| lab.belongs_to(patient_id))
            .cloned()
            .collect())
    }
}
