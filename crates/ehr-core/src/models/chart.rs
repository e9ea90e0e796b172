//! A patient together with their labs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{any_lab_satisfies, earliest_lab_date, Comparison, Lab, Patient};
use crate::{EhrError, EhrResult};

/// One patient with their labs already grouped, so every query is answered
/// without touching the backing store again.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientChart {
    pub patient: Patient,
    pub labs: Vec<Lab>,
}

impl PatientChart {
    /// Group a patient with the labs that belong to them, dropping others.
    pub fn new(patient: Patient, labs: Vec<Lab>) -> Self {
        let labs = labs
            .into_iter()
            .filter(|lab| lab.belongs_to(&patient.id))
            .collect();
        Self { patient, labs }
    }

    pub fn id(&self) -> &str {
        &self.patient.id
    }

    /// Age in whole years on `today`.
    pub fn age_on(&self, today: NaiveDate) -> EhrResult<i32> {
        self.patient.age_on(today)
    }

    /// Date of the earliest lab; `NoData` when the chart has none.
    pub fn first_lab_date(&self) -> EhrResult<NaiveDate> {
        earliest_lab_date(&self.labs)?
            .ok_or_else(|| EhrError::NoData(format!("No lab records found for {}", self.id())))
    }

    /// Age in whole years on the date of the earliest lab.
    pub fn age_at_first_lab(&self) -> EhrResult<i32> {
        Ok(self.patient.age_at(self.first_lab_date()?))
    }

    /// True when any lab named `lab_name` satisfies `value <op> threshold`.
    pub fn is_sick(&self, lab_name: &str, comparison: Comparison, threshold: f64) -> EhrResult<bool> {
        Ok(any_lab_satisfies(&self.labs, lab_name, comparison, threshold)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup_chart() -> PatientChart {
        PatientChart::new(
            Patient::new("MB2A", date(1960, 1, 1)),
            vec![
                Lab::new("MB2A", "CBC: WBC", "10.3", "1995-01-01 00:00:00"),
                Lab::new("MB2A", "METABOLIC: GLUCOSE", "150", "1990-06-01 01:02:03.456"),
                Lab::new("A418", "METABOLIC: GLUCOSE", "50", "1980-01-01"),
            ],
        )
    }

    #[test]
    fn test_new_drops_foreign_labs() {
        let chart = setup_chart();
        assert_eq!(chart.labs.len(), 2);
        assert!(chart.labs.iter().all(|lab| lab.patient_id == "MB2A"));
    }

    #[test]
    fn test_age_at_first_lab_uses_earliest() {
        let chart = setup_chart();
        assert_eq!(chart.first_lab_date().unwrap(), date(1990, 6, 1));
        assert_eq!(chart.age_at_first_lab().unwrap(), 30);
    }

    #[test]
    fn test_no_labs() {
        let chart = PatientChart::new(Patient::new("x", date(2000, 1, 1)), Vec::new());
        let err = chart.age_at_first_lab().unwrap_err();
        assert!(matches!(err, EhrError::NoData(_)));
        assert_eq!(err.to_string(), "No data: No lab records found for x");
    }

    #[test]
    fn test_is_sick() {
        let chart = setup_chart();
        assert!(chart
            .is_sick("METABOLIC: GLUCOSE", Comparison::GreaterThan, 100.0)
            .unwrap());
        // The A418 lab was dropped from the chart
        assert!(!chart
            .is_sick("METABOLIC: GLUCOSE", Comparison::LessThan, 100.0)
            .unwrap());
        assert!(!chart
            .is_sick("METABOLIC: ALK PHOS", Comparison::GreaterThan, 0.0)
            .unwrap());
    }
}
