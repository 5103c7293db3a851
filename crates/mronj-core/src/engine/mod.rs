//! MRONJ risk-assessment engine.
//!
//! Pipeline: PatientRecord → exposure duration → risk factors → decision table
//! per procedure. Every call is a pure function of the record and the injected
//! date.

mod duration;
mod rules;

pub use duration::*;
pub use rules::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{PatientRecord, Procedure, ProcedureAssessment, RiskLevel};

/// Assessment errors. Raised only for records the intake layer should have rejected.
///
/// Malformed months cannot reach the engine; [`crate::models::YearMonth`] rejects them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    #[error("Antiresorptive medication reported without a start date")]
    MissingStartDate,

    #[error("Medication marked as stopped without a stop date")]
    MissingStopDate,
}

pub type AssessmentResult<T> = Result<T, AssessmentError>;

/// Outcome of one assessment call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskAssessment {
    /// Date the assessment was evaluated against
    pub assessed_on: NaiveDate,
    /// Shared inputs to the decision table
    pub factors: RiskFactors,
    /// One entry per procedure, in canonical order
    pub assessments: Vec<ProcedureAssessment>,
}

impl RiskAssessment {
    /// Most severe risk across all procedures.
    pub fn highest_risk(&self) -> RiskLevel {
        RiskLevel::highest(self.assessments.iter().map(|a| a.risk_level))
    }

    /// Assessment for a specific procedure.
    pub fn for_procedure(&self, procedure: Procedure) -> Option<&ProcedureAssessment> {
        self.assessments.iter().find(|a| a.procedure == procedure)
    }
}

/// Current local date. Read once per call by the `*_today` helpers.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Compute the shared risk factors for a record.
pub fn risk_factors(record: &PatientRecord, today: NaiveDate) -> AssessmentResult<RiskFactors> {
    Ok(RiskFactors {
        on_medication: record.has_antiresorptive_medication(),
        exposure_months: exposure_months(record, today)?,
        high_risk_comorbidity: record.has_high_risk_comorbidity(),
    })
}

/// Evaluate a record against the decision table as of `today`.
pub fn evaluate(record: &PatientRecord, today: NaiveDate) -> AssessmentResult<RiskAssessment> {
    let factors = risk_factors(record, today)?;

    let assessments: Vec<_> = Procedure::ALL
        .iter()
        .map(|procedure| classify(*procedure, &factors))
        .collect();

    tracing::debug!(
        on_medication = factors.on_medication,
        exposure_months = factors.exposure_months,
        high_risk_comorbidity = factors.high_risk_comorbidity,
        %today,
        "assessed MRONJ procedure risk"
    );

    Ok(RiskAssessment {
        assessed_on: today,
        factors,
        assessments,
    })
}

/// Ordered per-procedure assessments as of `today`.
pub fn assess(record: &PatientRecord, today: NaiveDate) -> AssessmentResult<Vec<ProcedureAssessment>> {
    evaluate(record, today).map(|r| r.assessments)
}

/// [`evaluate`] against the local wall-clock date.
pub fn evaluate_today(record: &PatientRecord) -> AssessmentResult<RiskAssessment> {
    evaluate(record, today())
}

/// [`assess`] against the local wall-clock date.
pub fn assess_today(record: &PatientRecord) -> AssessmentResult<Vec<ProcedureAssessment>> {
    assess(record, today())
}
