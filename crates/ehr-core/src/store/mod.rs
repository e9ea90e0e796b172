//! Storage shapes behind the query engine.
//!
//! - [`ColumnarStore`]: the parsed tables as-is; lookups scan columns
//! - [`Cohort`]: flat collections of `Patient` and `Lab` objects
//! - [`crate::db::Database`]: the SQLite store

mod cohort;
mod columnar;

pub use cohort::*;
pub use columnar::*;

use crate::models::{Lab, Patient, PatientChart};
use crate::EhrResult;

/// Read access to patients and their labs.
///
/// Implementations must fail with `NotFound` from [`RecordStore::lookup_patient`]
/// rather than return a placeholder patient.
pub trait RecordStore {
    /// The first patient with this identifier.
    fn lookup_patient(&self, patient_id: &str) -> EhrResult<Patient>;

    /// Whether any patient has this identifier.
    fn contains_patient(&self, patient_id: &str) -> EhrResult<bool>;

    /// Every lab, in load order.
    fn all_labs(&self) -> EhrResult<Vec<Lab>>;

    /// Labs owned by one patient, in load order.
    fn labs_for(&self, patient_id: &str) -> EhrResult<Vec<Lab>> {
        Ok(self
            .all_labs()?
            .into_iter()
            .filter(|lab| lab.belongs_to(patient_id))
            .collect())
    }

    /// The patient with their labs grouped.
    fn chart(&self, patient_id: &str) -> EhrResult<PatientChart> {
        let patient = self.lookup_patient(patient_id)?;
        let labs = self.labs_for(patient_id)?;
        Ok(PatientChart { patient, labs })
    }
}
