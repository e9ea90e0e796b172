//! Patient models.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::query::years_between;
use crate::tabular::{parse_date, ParseError};
use crate::{EhrError, EhrResult};

/// A patient and their demographics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Identifier shared with the lab records (`PatientID`)
    pub id: String,
    /// Date of birth, time of day discarded
    pub date_of_birth: NaiveDate,
    /// Race, when the source carries it
    pub race: Option<String>,
    /// Remaining demographic columns, keyed by column name
    pub demographics: BTreeMap<String, String>,
}

impl Patient {
    /// Create a patient with required fields.
    pub fn new(id: impl Into<String>, date_of_birth: NaiveDate) -> Self {
        Self {
            id: id.into(),
            date_of_birth,
            race: None,
            demographics: BTreeMap::new(),
        }
    }

    /// Create a patient from raw cells, parsing the birth date.
    pub fn from_text(id: &str, date_of_birth: &str, race: Option<&str>) -> Result<Self, ParseError> {
        let mut patient = Self::new(id, parse_date(date_of_birth)?);
        patient.race = race.map(str::to_string);
        Ok(patient)
    }

    /// Whole years of age on `today`.
    ///
    /// Fails with `InvalidState` when the birth date lies after `today`.
    pub fn age_on(&self, today: NaiveDate) -> EhrResult<i32> {
        if self.date_of_birth > today {
            return Err(EhrError::InvalidState(format!(
                "Patient {} has birth date {} after {}",
                self.id, self.date_of_birth, today
            )));
        }
        Ok(years_between(self.date_of_birth, today))
    }

    /// Whole years of age on an arbitrary date, which may precede birth.
    pub fn age_at(&self, date: NaiveDate) -> i32 {
        years_between(self.date_of_birth, date)
    }
}
