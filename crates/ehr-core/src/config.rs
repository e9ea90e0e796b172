//! Query configuration.

use std::path::Path;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::EhrResult;

/// Knobs shared by every query, independent of the storage shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Require the patient to exist before evaluating `is_sick`.
    ///
    /// When disabled, an unknown identifier simply has no matching labs and
    /// the predicate evaluates to `false`.
    pub strict_patient_check: bool,
    /// Fixed "today" for age queries. `None` uses the local calendar date.
    pub reference_date: Option<NaiveDate>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            strict_patient_check: true,
            reference_date: None,
        }
    }
}

impl QueryConfig {
    /// Configuration that skips the patient existence check in `is_sick`.
    pub fn lenient() -> Self {
        Self {
            strict_patient_check: false,
            ..Self::default()
        }
    }

    /// Pin "today" to a fixed date.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Parse configuration from JSON text. Missing keys take their defaults.
    pub fn from_json(text: &str) -> EhrResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> EhrResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// The date queries treat as "now".
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}
