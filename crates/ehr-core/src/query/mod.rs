//! Query engine: age, age at first lab, and lab threshold checks.
//!
//! Every query goes through a [`RecordStore`], so the columnar, object and
//! SQLite shapes share one implementation.

mod age;

pub use age::*;

use chrono::NaiveDate;
use log::debug;

use crate::config::QueryConfig;
use crate::models::{any_lab_satisfies, Comparison, PatientChart};
use crate::store::RecordStore;
use crate::{EhrError, EhrResult};

/// Answers patient queries against any record store.
pub struct QueryEngine<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    config: QueryConfig,
}

impl<'a, S: RecordStore + ?Sized> QueryEngine<'a, S> {
    /// Create an engine with the default (strict, local-date) configuration.
    pub fn new(store: &'a S) -> Self {
        Self::with_config(store, QueryConfig::default())
    }

    pub fn with_config(store: &'a S, config: QueryConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// The date treated as "now".
    pub fn today(&self) -> NaiveDate {
        self.config.today()
    }

    /// Current age of a patient in whole years.
    ///
    /// Fails with `NotFound` for an unknown identifier and `InvalidState`
    /// for a birth date in the future.
    pub fn age(&self, patient_id: &str) -> EhrResult<i32> {
        let patient = self.store.lookup_patient(patient_id)?;
        patient.age_on(self.today())
    }

    /// Age of a patient on the date of their earliest lab.
    ///
    /// Fails with `NotFound` for an unknown identifier and `NoData` when the
    /// patient has no labs.
    pub fn age_at_first_lab(&self, patient_id: &str) -> EhrResult<i32> {
        self.chart(patient_id)?.age_at_first_lab()
    }

    /// True when any `lab_name` lab of the patient satisfies
    /// `value <operator> threshold`.
    ///
    /// `operator` must be `>`, `<` or `=`. Zero matching labs is `false`.
    pub fn is_sick(
        &self,
        patient_id: &str,
        lab_name: &str,
        operator: &str,
        threshold: f64,
    ) -> EhrResult<bool> {
        let comparison: Comparison = operator.parse()?;
        self.is_sick_with(patient_id, lab_name, comparison, threshold)
    }

    /// [`QueryEngine::is_sick`] with an already parsed operator.
    pub fn is_sick_with(
        &self,
        patient_id: &str,
        lab_name: &str,
        comparison: Comparison,
        threshold: f64,
    ) -> EhrResult<bool> {
        if self.config.strict_patient_check && !self.store.contains_patient(patient_id)? {
            return Err(not_found(patient_id));
        }

        let labs = self.store.labs_for(patient_id)?;
        debug!(
            "Checking {} labs of {} for {} {} {}",
            labs.len(),
            patient_id,
            lab_name,
            comparison,
            threshold
        );
        Ok(any_lab_satisfies(&labs, lab_name, comparison, threshold)?)
    }

    /// Patient and labs grouped together.
    pub fn chart(&self, patient_id: &str) -> EhrResult<PatientChart> {
        self.store.chart(patient_id)
    }
}

pub(crate) fn not_found(patient_id: &str) -> EhrError {
    EhrError::NotFound(format!("Patient {patient_id} not found in the data"))
}
