//! Decision table for per-procedure classification.
//!
//! Rules are tried in order; the first whose condition holds decides the
//! outcome. Anything not matched falls through to [`FALLBACK`].

use serde::{Deserialize, Serialize};

use crate::models::{Procedure, ProcedureAssessment, Recommendation, RiskLevel};

/// Exposure above this many months is at least moderate risk.
pub const MODERATE_EXPOSURE_MONTHS: u32 = 12;
/// Exposure above this many months is high risk.
pub const HIGH_EXPOSURE_MONTHS: u32 = 36;

/// Inputs shared by every procedure within one assessment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RiskFactors {
    pub on_medication: bool,
    pub exposure_months: u32,
    pub high_risk_comorbidity: bool,
}

/// Rule guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    NoMedication,
    NonInvasive,
    LongExposureOrComorbidity,
    IntermediateExposure,
}

impl Condition {
    pub fn holds(&self, procedure: Procedure, factors: &RiskFactors) -> bool {
        match self {
            Condition::NoMedication => !factors.on_medication,
            Condition::NonInvasive => !procedure.is_invasive(),
            Condition::LongExposureOrComorbidity => {
                factors.exposure_months > HIGH_EXPOSURE_MONTHS || factors.high_risk_comorbidity
            }
            Condition::IntermediateExposure => factors.exposure_months > MODERATE_EXPOSURE_MONTHS,
        }
    }
}

/// Risk tier and message produced by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub risk_level: RiskLevel,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub condition: Condition,
    pub outcome: Outcome,
}

/// Ordered rules. Earlier entries take precedence.
pub const DECISION_TABLE: &[Rule] = &[
    Rule {
        condition: Condition::NoMedication,
        outcome: Outcome {
            risk_level: RiskLevel::Low,
            recommendation: Recommendation::RoutineTreatment,
        },
    },
    Rule {
        condition: Condition::NonInvasive,
        outcome: Outcome {
            risk_level: RiskLevel::Low,
            recommendation: Recommendation::ProceedWithFollowUp,
        },
    },
    Rule {
        condition: Condition::LongExposureOrComorbidity,
        outcome: Outcome {
            risk_level: RiskLevel::High,
            recommendation: Recommendation::SpecialistReferral,
        },
    },
    Rule {
        condition: Condition::IntermediateExposure,
        outcome: Outcome {
            risk_level: RiskLevel::Moderate,
            recommendation: Recommendation::PhysicianConsultation,
        },
    },
];

/// Invasive procedure, medicated, short exposure and no comorbidity.
pub const FALLBACK: Outcome = Outcome {
    risk_level: RiskLevel::Low,
    recommendation: Recommendation::InformedConsent,
};

/// Classify one procedure.
pub fn classify(procedure: Procedure, factors: &RiskFactors) -> ProcedureAssessment {
    let outcome = DECISION_TABLE
        .iter()
        .find(|rule| rule.condition.holds(procedure, factors))
        .map_or(FALLBACK, |rule| rule.outcome);

    ProcedureAssessment {
        procedure,
        risk_level: outcome.risk_level,
        recommendation: outcome.recommendation,
    }
}
