//! The columnar, object and SQLite shapes must answer every query the same
//! way when loaded from the same files.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use ehr_core::{
    Cohort, ColumnarStore, Database, EhrError, ParseError, QueryConfig, QueryEngine, RecordStore,
};
use tempfile::TempDir;

const PATIENTS: &str = "\u{feff}PatientID\tPatientGender\tPatientDateOfBirth\tPatientRace\tPatientLanguage\n\
    MB2A\tM\t1960-01-01 00:00:00.000\tWhite\tEnglish\n\
    A418\tF\t1970-07-25 00:00:00.000\tAsian\tChinese\n\
    CB22\tM\t1980-08-30 00:00:00.000\tBlack\tEnglish\n\
    HJF0\tF\t1990-09-01 00:00:00.000\tHispanic\tSpanish\n\
    CFEAA0\tF\t2000-10-03 00:00:00.000\tWhite\tEnglish\n";

const LABS: &str = "PatientID\tAdmissionID\tLabName\tLabValue\tLabUnits\tLabDateTime\n\
    MB2A\t1\tMETABOLIC: GLUCOSE\t150\tmg/dL\t1995-01-01 10:00:00.000\n\
    MB2A\t1\tCBC: WBC\t10.3\tK/uL\t1990-06-01 01:02:03.456\n\
    A418\t1\tMETABOLIC: CALCIUM\t8.9\tmg/dL\t1991-07-01 01:20:34.567\n\
    A418\t2\tMETABOLIC: CALCIUM\t10.4\tmg/dL\t1993-02-11 09:00:00.000\n\
    CB22\t1\tCBC: MCH\t32.1\tpg\t1992-08-01 01:23:45.678\n\
    HJF0\t1\tCBC: MCV\t98.5\tfL\t1993-09-01 01:24:56.789\n\
    GHOST\t1\tMETABOLIC: GLUCOSE\t400\tmg/dL\t1999-01-01 00:00:00.000\n";

const IDS: [&str; 6] = ["MB2A", "A418", "CB22", "HJF0", "CFEAA0", "unknown"];

struct Fixture {
    _dir: TempDir,
    patients: PathBuf,
    labs: PathBuf,
    store: PathBuf,
}

fn setup_files() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let patients = dir.path().join("Patient.txt");
    let labs = dir.path().join("Lab.txt");
    let store = dir.path().join("EHR.db");
    fs::write(&patients, PATIENTS).unwrap();
    fs::write(&labs, LABS).unwrap();
    Fixture {
        _dir: dir,
        patients,
        labs,
        store,
    }
}

fn config() -> QueryConfig {
    QueryConfig::default().with_reference_date(NaiveDate::from_ymd_opt(2023, 6, 15).unwrap())
}

/// Render an answer so results and error kinds can be compared across shapes.
fn outcome<T: std::fmt::Debug>(result: Result<T, EhrError>) -> String {
    match result {
        Ok(value) => format!("{value:?}"),
        Err(EhrError::NotFound(_)) => "NotFound".into(),
        Err(EhrError::NoData(_)) => "NoData".into(),
        Err(EhrError::InvalidArgument(_)) => "InvalidArgument".into(),
        Err(EhrError::InvalidState(_)) => "InvalidState".into(),
        Err(other) => format!("{other}"),
    }
}

fn answers<S: RecordStore>(store: &S, config: QueryConfig) -> Vec<String> {
    let engine = QueryEngine::with_config(store, config);
    let mut answers = Vec::new();
    for id in IDS {
        answers.push(outcome(engine.age(id)));
        answers.push(outcome(engine.age_at_first_lab(id)));
        for (lab_name, operator, threshold) in [
            ("METABOLIC: GLUCOSE", ">", 100.0),
            ("METABOLIC: GLUCOSE", "<", 100.0),
            ("METABOLIC: CALCIUM", "=", 8.9),
            ("METABOLIC: CALCIUM", ">", 10.0),
            ("CBC: WBC", "?", 1.0),
        ] {
            answers.push(outcome(engine.is_sick(id, lab_name, operator, threshold)));
        }
    }
    answers
}

#[test]
fn test_all_shapes_agree() {
    let fx = setup_files();

    let columnar = ColumnarStore::load(&fx.patients, &fx.labs).unwrap();
    let cohort = Cohort::load(&fx.patients, &fx.labs).unwrap();
    let db = Database::ingest(&fx.patients, &fx.labs, &fx.store).unwrap();

    let expected = answers(&columnar, config());
    assert_eq!(answers(&cohort, config()), expected);
    assert_eq!(answers(&db, config()), expected);
}

#[test]
fn test_all_shapes_agree_when_lenient() {
    let fx = setup_files();

    let columnar = ColumnarStore::load(&fx.patients, &fx.labs).unwrap();
    let cohort = Cohort::load(&fx.patients, &fx.labs).unwrap();
    let db = Database::ingest(&fx.patients, &fx.labs, &fx.store).unwrap();

    let lenient = QueryConfig { strict_patient_check: false, ..config() };
    let expected = answers(&columnar, lenient.clone());
    assert_eq!(answers(&cohort, lenient.clone()), expected);
    assert_eq!(answers(&db, lenient.clone()), expected);

    // Labs of a patient missing from the patient file still count
    let engine = QueryEngine::with_config(&db, lenient);
    assert!(engine.is_sick("GHOST", "METABOLIC: GLUCOSE", ">", 100.0).unwrap());
}

#[test]
fn test_expected_answers() {
    let fx = setup_files();
    let columnar = ColumnarStore::load(&fx.patients, &fx.labs).unwrap();
    let engine = QueryEngine::with_config(&columnar, config());

    assert_eq!(engine.age("MB2A").unwrap(), 63);
    assert_eq!(engine.age("A418").unwrap(), 52);
    assert_eq!(engine.age("CFEAA0").unwrap(), 22);

    assert_eq!(engine.age_at_first_lab("MB2A").unwrap(), 30);
    assert_eq!(engine.age_at_first_lab("A418").unwrap(), 20);
    assert!(matches!(engine.age_at_first_lab("CFEAA0"), Err(EhrError::NoData(_))));

    assert!(engine.is_sick("MB2A", "METABOLIC: GLUCOSE", ">", 100.0).unwrap());
    assert!(!engine.is_sick("MB2A", "METABOLIC: GLUCOSE", "<", 100.0).unwrap());
    assert!(engine.is_sick("A418", "METABOLIC: CALCIUM", "=", 8.9).unwrap());
    assert!(matches!(
        engine.is_sick("GHOST", "METABOLIC: GLUCOSE", ">", 100.0),
        Err(EhrError::NotFound(_))
    ));
}

#[test]
fn test_charts_agree() {
    let fx = setup_files();

    let columnar = ColumnarStore::load(&fx.patients, &fx.labs).unwrap();
    let cohort = Cohort::load(&fx.patients, &fx.labs).unwrap();
    let db = Database::ingest(&fx.patients, &fx.labs, &fx.store).unwrap();

    for id in ["MB2A", "A418", "CFEAA0"] {
        let from_columns = columnar.chart(id).unwrap();
        let from_objects = cohort.chart(id).unwrap();
        let from_store = db.chart(id).unwrap();

        assert_eq!(from_columns, from_objects);
        assert_eq!(from_columns.labs, from_store.labs);
        assert_eq!(from_columns.patient.date_of_birth, from_store.patient.date_of_birth);
        assert_eq!(from_columns.patient.race, from_store.patient.race);
        // Only the three stored columns survive persistence
        assert!(from_store.patient.demographics.is_empty());
        assert_eq!(from_columns.patient.demographics.len(), 2);
    }
}

#[test]
fn test_bad_lab_value_surfaces_as_parse_error() {
    let fx = setup_files();
    fs::write(
        &fx.labs,
        "PatientID\tLabName\tLabValue\tLabDateTime\nMB2A\tMETABOLIC: GLUCOSE\tpending\t1995-01-01\n",
    )
    .unwrap();

    // Deferred: only the query touching the value fails
    let columnar = ColumnarStore::load(&fx.patients, &fx.labs).unwrap();
    let db = Database::ingest(&fx.patients, &fx.labs, &fx.store).unwrap();
    for result in [
        QueryEngine::new(&columnar).is_sick("MB2A", "METABOLIC: GLUCOSE", ">", 1.0),
        QueryEngine::new(&db).is_sick("MB2A", "METABOLIC: GLUCOSE", ">", 1.0),
    ] {
        assert!(matches!(result, Err(EhrError::Parse(_))));
    }
    assert_eq!(QueryEngine::new(&db).age_at_first_lab("MB2A").unwrap(), 35);

    // Eager: the object shape refuses to build
    assert!(matches!(
        Cohort::load(&fx.patients, &fx.labs),
        Err(EhrError::Parse(_))
    ));
}

#[test]
fn test_bad_lab_date_surfaces_as_parse_error() {
    let fx = setup_files();
    fs::write(
        &fx.labs,
        "PatientID\tLabName\tLabValue\tLabDateTime\n\
         MB2A\tCBC: WBC\t10.3\t1990-06-01 01:02:03.456\n\
         MB2A\tMETABOLIC: GLUCOSE\t150\t01/01/1995\n",
    )
    .unwrap();

    let columnar = ColumnarStore::load(&fx.patients, &fx.labs).unwrap();
    let db = Database::ingest(&fx.patients, &fx.labs, &fx.store).unwrap();
    for result in [
        QueryEngine::new(&columnar).age_at_first_lab("MB2A"),
        QueryEngine::new(&db).age_at_first_lab("MB2A"),
    ] {
        assert!(matches!(
            result,
            Err(EhrError::Parse(ParseError::InvalidDate(text))) if text == "01/01/1995"
        ));
    }

    // Threshold checks never read the date
    assert!(QueryEngine::new(&db)
        .is_sick("MB2A", "METABOLIC: GLUCOSE", ">", 100.0)
        .unwrap());

    assert!(matches!(
        Cohort::load(&fx.patients, &fx.labs),
        Err(EhrError::Parse(ParseError::InvalidDate(_)))
    ));
}

#[test]
fn test_ragged_file_fails_to_load() {
    let fx = setup_files();
    fs::write(&fx.patients, "PatientID\tPatientDateOfBirth\nMB2A\t1960-01-01\textra\n").unwrap();

    assert!(matches!(
        ColumnarStore::load(&fx.patients, &fx.labs),
        Err(EhrError::Parse(_))
    ));
    assert!(matches!(
        Database::ingest(&fx.patients, &fx.labs, &fx.store),
        Err(EhrError::Parse(_))
    ));
    assert!(!fx.store.exists());
}
