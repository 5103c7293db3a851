//! MRONJ Screening Core Library
//!
//! Pre-procedure risk screening for medication-related osteonecrosis of the jaw.
//!
//! # Architecture
//!
//! ```text
//! Intake screens → PatientRecord
//!                       │
//!             ┌─────────▼─────────┐
//!             │ Duration          │  start/stop month + today
//!             │ Calculator        │  → exposure months (30-day, rounded up)
//!             └─────────┬─────────┘
//!                       │
//!             ┌─────────▼─────────┐
//!             │ Risk Classifier   │  decision table per procedure
//!             └─────────┬─────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          ▼                         ▼
//!   Vec<ProcedureAssessment>   AssessmentReport (JSON)
//! ```
//!
//! # Core Principle
//!
//! **The current date is an input.** Every assessment takes the evaluation date
//! explicitly; only the `*_today` helpers read the clock, and they read it once.
//!
//! # Modules
//!
//! - [`models`]: Domain types (PatientRecord, Procedure, RiskLevel, etc.)
//! - [`engine`]: Duration calculator and decision-table classifier
//! - [`export`]: Report data for the document renderer
//! - [`config`]: Locale and deployment settings

pub mod config;
pub mod engine;
pub mod export;
pub mod models;

// Re-export commonly used types
pub use config::{EngineConfig, Locale};
pub use engine::{
    assess, assess_today, evaluate, evaluate_today, exposure_months, AssessmentError,
    AssessmentResult, RiskAssessment, RiskFactors,
};
pub use export::{AssessmentReport, ReportExporter};
pub use models::{
    Demographics, MedicalHistory, MedicationHistory, PatientRecord, Procedure,
    ProcedureAssessment, Recommendation, RiskLevel, SystemicDisease, YearMonth,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use chrono::NaiveDate;

use models::{
    AdministrationRoute, DosingFrequency, Gender, HormoneTherapyDuration, Indication,
    MedicationClass, MedicationSubclass, TransitionKind,
};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MronjError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<AssessmentError> for MronjError {
    fn from(e: AssessmentError) -> Self {
        MronjError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for MronjError {
    fn from(e: serde_json::Error) -> Self {
        MronjError::SerializationError(e.to_string())
    }
}

fn parse_locale(tag: &str) -> Result<Locale, MronjError> {
    Locale::from_tag(tag).ok_or_else(|| MronjError::InvalidInput(format!("Unknown locale: {}", tag)))
}

fn parse_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, MronjError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        MronjError::InvalidInput(format!("Invalid date: {:04}-{:02}-{:02}", year, month, day))
    })
}

// =========================================================================
// Exported Functions
// =========================================================================

/// Assess every procedure as of the device's current date.
#[uniffi::export]
pub fn assess_risk(
    record: FfiPatientRecord,
    locale: String,
) -> Result<Vec<FfiProcedureAssessment>, MronjError> {
    let locale = parse_locale(&locale)?;
    let assessments = engine::assess_today(&PatientRecord::try_from(record)?)?;
    Ok(assessments
        .iter()
        .map(|a| FfiProcedureAssessment::render(a, locale))
        .collect())
}

/// Assess every procedure as of the given date.
#[uniffi::export]
pub fn assess_risk_on(
    record: FfiPatientRecord,
    locale: String,
    year: i32,
    month: u32,
    day: u32,
) -> Result<Vec<FfiProcedureAssessment>, MronjError> {
    let locale = parse_locale(&locale)?;
    let today = parse_date(year, month, day)?;
    let assessments = engine::assess(&PatientRecord::try_from(record)?, today)?;
    Ok(assessments
        .iter()
        .map(|a| FfiProcedureAssessment::render(a, locale))
        .collect())
}

/// Antiresorptive exposure in whole months as of the given date.
#[uniffi::export]
pub fn exposure_months_on(
    record: FfiPatientRecord,
    year: i32,
    month: u32,
    day: u32,
) -> Result<u32, MronjError> {
    let today = parse_date(year, month, day)?;
    Ok(engine::exposure_months(&PatientRecord::try_from(record)?, today)?)
}

/// Build the assessment report and serialize it as JSON.
#[uniffi::export]
pub fn export_report_json(
    record: FfiPatientRecord,
    locale: String,
    system_id: Option<String>,
) -> Result<String, MronjError> {
    let mut config = EngineConfig::new(parse_locale(&locale)?);
    config.system_id = system_id;
    let record = PatientRecord::try_from(record)?;
    let report = ReportExporter::new(config).export_today(&record)?;
    Ok(report.to_json()?)
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient record.
///
/// Enumerated answers travel as the labels the intake screens show, in either
/// locale. An unknown label is rejected rather than dropped.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiPatientRecord {
    pub name: String,
    pub birth_year: Option<i32>,
    pub birth_month: Option<u32>,
    pub birth_day: Option<u32>,
    pub id_number: String,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub gender: Option<String>,
    pub transition: Option<String>,
    pub has_hormone_therapy: bool,
    pub hormone_therapy_duration: Option<String>,
    pub systemic_diseases: Vec<String>,
    pub has_radiotherapy_history: bool,
    pub radiotherapy_details: Option<String>,
    pub has_cancer_history: bool,
    pub cancer_details: Option<String>,
    pub other_conditions: Option<String>,
    pub has_antiresorptive_medication: bool,
    pub medication_class: Option<String>,
    pub medication_subclass: Option<String>,
    pub drug_name: Option<String>,
    pub route: Option<String>,
    pub indication: Option<String>,
    pub frequency: Option<String>,
    pub medication_start_year: Option<i32>,
    pub medication_start_month: Option<u32>,
    pub is_stopped: bool,
    pub medication_stop_year: Option<i32>,
    pub medication_stop_month: Option<u32>,
}

impl TryFrom<FfiPatientRecord> for PatientRecord {
    type Error = MronjError;

    fn try_from(record: FfiPatientRecord) -> Result<Self, Self::Error> {
        let demographics = Demographics {
            name: record.name,
            birth_year: record.birth_year,
            birth_month: record.birth_month,
            birth_day: record.birth_day,
            id_number: record.id_number,
            height_cm: record.height_cm,
            weight_kg: record.weight_kg,
        };

        let medical_history = MedicalHistory {
            gender: label("gender", record.gender, Gender::from_label)?,
            transition: label("transition", record.transition, TransitionKind::from_label)?,
            has_hormone_therapy: record.has_hormone_therapy,
            hormone_therapy_duration: label(
                "hormone_therapy_duration",
                record.hormone_therapy_duration,
                HormoneTherapyDuration::from_label,
            )?,
            has_radiotherapy_history: record.has_radiotherapy_history,
            radiotherapy_details: non_blank(record.radiotherapy_details),
            has_cancer_history: record.has_cancer_history,
            cancer_details: non_blank(record.cancer_details),
            other_conditions: non_blank(record.other_conditions),
            ..Default::default()
        }
        .with_diseases(record.systemic_diseases.iter().filter(|d| !d.trim().is_empty()));

        let medication = MedicationHistory {
            has_antiresorptive_medication: record.has_antiresorptive_medication,
            medication_class: label(
                "medication_class",
                record.medication_class,
                MedicationClass::from_label,
            )?,
            medication_subclass: label(
                "medication_subclass",
                record.medication_subclass,
                MedicationSubclass::from_label,
            )?,
            drug_name: non_blank(record.drug_name),
            route: label("route", record.route, AdministrationRoute::from_label)?,
            indication: label("indication", record.indication, Indication::from_label)?,
            frequency: label("frequency", record.frequency, DosingFrequency::from_label)?,
            medication_start: year_month(record.medication_start_year, record.medication_start_month)?,
            is_stopped: record.is_stopped,
            medication_stop: year_month(record.medication_stop_year, record.medication_stop_month)?,
        };

        Ok(PatientRecord::new(demographics, medical_history, medication))
    }
}

/// Parse an optional label; blank counts as unanswered.
fn label<T>(
    field: &str,
    value: Option<String>,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, MronjError> {
    match non_blank(value) {
        None => Ok(None),
        Some(v) => parse(&v)
            .map(Some)
            .ok_or_else(|| MronjError::InvalidInput(format!("Unknown {} label: {}", field, v))),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A month is only set when both parts are present.
fn year_month(year: Option<i32>, month: Option<u32>) -> Result<Option<YearMonth>, MronjError> {
    match (year, month) {
        (Some(year), Some(month)) => YearMonth::new(year, month)
            .map(Some)
            .map_err(|e| MronjError::InvalidInput(e.to_string())),
        _ => Ok(None),
    }
}

/// FFI-safe procedure assessment.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiProcedureAssessment {
    pub procedure: String,
    pub procedure_label: String,
    pub risk_level: String,
    pub risk_label: String,
    pub recommendation: String,
}

impl FfiProcedureAssessment {
    fn render(assessment: &ProcedureAssessment, locale: Locale) -> Self {
        Self {
            procedure: format!("{:?}", assessment.procedure),
            procedure_label: assessment.procedure.label(locale).to_string(),
            risk_level: format!("{:?}", assessment.risk_level),
            risk_label: assessment.risk_level.label(locale).to_string(),
            recommendation: assessment.recommendation_text(locale).to_string(),
        }
    }
}
