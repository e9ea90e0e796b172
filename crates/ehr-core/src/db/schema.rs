//! SQLite schema definition.

/// Patient and lab tables. Every column is text; numbers and dates are
/// interpreted at query time.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    PatientID TEXT PRIMARY KEY,
    PatientDateOfBirth TEXT,
    PatientRace TEXT
);

-- ============================================================================
-- Labs (many per patient, PatientID not unique)
-- ============================================================================

CREATE TABLE IF NOT EXISTS labs (
    LabID INTEGER PRIMARY KEY AUTOINCREMENT,
    PatientID TEXT,
    LabName TEXT,
    LabValue TEXT,
    LabUnits TEXT,
    LabDateTime TEXT
);

CREATE INDEX IF NOT EXISTS idx_labs_patient ON labs(PatientID);
"#;

/// Drops both tables ahead of a reload.
pub const DROP_SCHEMA: &str = r#"
DROP TABLE IF EXISTS labs;
DROP TABLE IF EXISTS patients;
"#;
