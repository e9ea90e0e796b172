//! Lab result models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Comparison;
use crate::tabular::{parse_date, parse_value, ParseError};

/// A single lab result, kept as the text it was loaded from.
///
/// The value and timestamp are only interpreted when a query needs them, so
/// a malformed cell fails the query that touches it rather than the load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lab {
    /// Owning patient (`PatientID`), matched by value
    pub patient_id: String,
    /// Lab name, e.g. "METABOLIC: GLUCOSE"
    pub name: String,
    /// Raw numeric text
    pub value: String,
    /// Unit of the value, informational only
    pub units: Option<String>,
    /// Raw `YYYY-MM-DD[ time]` timestamp
    pub recorded_at: String,
}

impl Lab {
    pub fn new(
        patient_id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
        recorded_at: impl Into<String>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            name: name.into(),
            value: value.into(),
            units: None,
            recorded_at: recorded_at.into(),
        }
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn numeric_value(&self) -> Result<f64, ParseError> {
        parse_value(&self.value)
    }

    /// Date the lab was taken, time of day discarded.
    pub fn recorded_on(&self) -> Result<NaiveDate, ParseError> {
        parse_date(&self.recorded_at)
    }

    pub fn belongs_to(&self, patient_id: &str) -> bool {
        self.patient_id == patient_id
    }

    /// Fail early if the value or timestamp cannot be interpreted.
    pub fn validate(&self) -> Result<(), ParseError> {
        self.numeric_value()?;
        self.recorded_on()?;
        Ok(())
    }
}

/// Earliest lab date in a collection, or `None` when it is empty.
pub fn earliest_lab_date<'a, I>(labs: I) -> Result<Option<NaiveDate>, ParseError>
where
    I: IntoIterator<Item = &'a Lab>,
{
    let mut earliest: Option<NaiveDate> = None;
    for lab in labs {
        let date = lab.recorded_on()?;
        if earliest.map_or(true, |current| date < current) {
            earliest = Some(date);
        }
    }
    Ok(earliest)
}

/// True on the first lab named `lab_name` whose value satisfies the
/// comparison; false if none does.
///
/// Only labs with a matching name have their value parsed.
pub fn any_lab_satisfies<'a, I>(
    labs: I,
    lab_name: &str,
    comparison: Comparison,
    threshold: f64,
) -> Result<bool, ParseError>
where
    I: IntoIterator<Item = &'a Lab>,
{
    for lab in labs.into_iter().filter(|lab| lab.name == lab_name) {
        if comparison.holds(lab.numeric_value()?, threshold) {
            return Ok(true);
        }
    }
    Ok(false)
}
