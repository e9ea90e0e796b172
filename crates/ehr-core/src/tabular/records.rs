//! Patient and lab tables with their required columns resolved up front.

use std::collections::BTreeMap;

use super::{ParseError, Table};
use crate::models::{Lab, Patient};

pub const PATIENT_ID: &str = "PatientID";
pub const PATIENT_DATE_OF_BIRTH: &str = "PatientDateOfBirth";
pub const PATIENT_RACE: &str = "PatientRace";
pub const LAB_NAME: &str = "LabName";
pub const LAB_VALUE: &str = "LabValue";
pub const LAB_UNITS: &str = "LabUnits";
pub const LAB_DATE_TIME: &str = "LabDateTime";

/// Patient demographics table.
///
/// Requires `PatientID` and `PatientDateOfBirth`; `PatientRace` is optional
/// and every other column is carried as a free-form demographic attribute.
#[derive(Debug, Clone)]
pub struct PatientTable {
    table: Table,
    id: usize,
    date_of_birth: usize,
    race: Option<usize>,
}

impl PatientTable {
    /// Validate the required columns of a parsed table.
    pub fn new(table: Table) -> Result<Self, ParseError> {
        let id = table.require_column(PATIENT_ID)?;
        let date_of_birth = table.require_column(PATIENT_DATE_OF_BIRTH)?;
        let race = table.column_index(PATIENT_RACE);
        Ok(Self {
            table,
            id,
            date_of_birth,
            race,
        })
    }

    /// Parse and validate tab-delimited text.
    pub fn parse_str(text: &str) -> Result<Self, ParseError> {
        Self::new(Table::parse_str(text)?)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.table.row_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Patient identifiers in row order.
    pub fn ids(&self) -> &[String] {
        self.table.column_at(self.id)
    }

    /// Row of the first patient with this identifier.
    pub fn position(&self, patient_id: &str) -> Option<usize> {
        self.ids().iter().position(|id| id == patient_id)
    }

    /// Raw birth date cell for a row.
    pub fn date_of_birth_at(&self, row: usize) -> &str {
        &self.table.column_at(self.date_of_birth)[row]
    }

    /// Raw race cell for a row, when the column exists.
    pub fn race_at(&self, row: usize) -> Option<&str> {
        self.race
            .map(|column| self.table.column_at(column)[row].as_str())
    }

    /// Build the patient stored at a row, parsing its birth date.
    pub fn patient_at(&self, row: usize) -> Result<Patient, ParseError> {
        let mut patient = Patient::from_text(
            &self.ids()[row],
            self.date_of_birth_at(row),
            self.race_at(row),
        )?;
        patient.demographics = self.demographics_at(row);
        Ok(patient)
    }

    /// Build every patient in row order.
    pub fn patients(&self) -> impl Iterator<Item = Result<Patient, ParseError>> + '_ {
        (0..self.len()).map(move |row| self.patient_at(row))
    }

    fn demographics_at(&self, row: usize) -> BTreeMap<String, String> {
        self.table
            .headers()
            .iter()
            .enumerate()
            .filter(|(column, _)| {
                *column != self.id && *column != self.date_of_birth && Some(*column) != self.race
            })
            .map(|(column, name)| (name.clone(), self.table.column_at(column)[row].clone()))
            .collect()
    }
}

/// Lab results table.
///
/// Requires `PatientID`, `LabName`, `LabValue` and `LabDateTime`;
/// `LabUnits` is optional.
#[derive(Debug, Clone)]
pub struct LabTable {
    table: Table,
    patient_id: usize,
    name: usize,
    value: usize,
    units: Option<usize>,
    date_time: usize,
}

impl LabTable {
    /// Validate the required columns of a parsed table.
    pub fn new(table: Table) -> Result<Self, ParseError> {
        Ok(Self {
            patient_id: table.require_column(PATIENT_ID)?,
            name: table.require_column(LAB_NAME)?,
            value: table.require_column(LAB_VALUE)?,
            units: table.column_index(LAB_UNITS),
            date_time: table.require_column(LAB_DATE_TIME)?,
            table,
        })
    }

    /// Parse and validate tab-delimited text.
    pub fn parse_str(text: &str) -> Result<Self, ParseError> {
        Self::new(Table::parse_str(text)?)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.table.row_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Owning patient identifiers in row order.
    pub fn patient_ids(&self) -> &[String] {
        self.table.column_at(self.patient_id)
    }

    /// The lab stored at a row, verbatim.
    pub fn lab_at(&self, row: usize) -> Lab {
        let cell = |column: usize| self.table.column_at(column)[row].clone();
        Lab {
            patient_id: cell(self.patient_id),
            name: cell(self.name),
            value: cell(self.value),
            units: self.units.map(&cell),
            recorded_at: cell(self.date_time),
        }
    }

    /// Every lab in row order.
    pub fn labs(&self) -> impl Iterator<Item = Lab> + '_ {
        (0..self.len()).map(move |row| self.lab_at(row))
    }

    /// Labs belonging to one patient, found by a full scan.
    pub fn labs_for(&self, patient_id: &str) -> Vec<Lab> {
        self.patient_ids()
            .iter()
            .enumerate()
            .filter(|(_, id)| *id == patient_id)
            .map(|(row, _)| self.lab_at(row))
            .collect()
    }
}
