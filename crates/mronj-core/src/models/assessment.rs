//! Risk assessment output models.

use serde::{Deserialize, Serialize};

use crate::config::Locale;

/// Dental procedures covered by the screening.
///
/// Declaration order is the canonical report order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Procedure {
    /// Cleaning, fillings and other non-surgical care
    NonInvasive,
    Extraction,
    PeriodontalSurgery,
    Implant,
    RootCanal,
}

localized_labels!(Procedure {
    NonInvasive => ("非侵入性治療", "non-invasive treatment"),
    Extraction => ("拔牙", "extraction"),
    PeriodontalSurgery => ("牙周手術", "periodontal surgery"),
    Implant => ("植牙", "implant placement"),
    RootCanal => ("根管治療", "root canal treatment"),
});

impl Procedure {
    pub fn is_invasive(&self) -> bool {
        !matches!(self, Procedure::NonInvasive)
    }
}

/// Risk tier. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

localized_labels!(RiskLevel {
    Low => ("低風險", "low risk"),
    Moderate => ("中度風險", "moderate risk"),
    High => ("高風險", "high risk"),
});

impl RiskLevel {
    /// Most severe level in `levels`; `Low` when empty.
    pub fn highest(levels: impl IntoIterator<Item = RiskLevel>) -> RiskLevel {
        levels.into_iter().max().unwrap_or(RiskLevel::Low)
    }
}

/// Canonical guidance messages, one per decision branch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// No antiresorptive exposure
    RoutineTreatment,
    /// Non-invasive care under medication
    ProceedWithFollowUp,
    /// Short exposure, no comorbidity
    InformedConsent,
    /// Intermediate exposure
    PhysicianConsultation,
    /// Long exposure or high-risk comorbidity
    SpecialistReferral,
}

localized_labels!(Recommendation {
    RoutineTreatment => ("可進行一般治療。", "Routine treatment permitted."),
    ProceedWithFollowUp => (
        "可進行治療，建議定期追蹤。",
        "Treatment may proceed; routine follow-up advised."
    ),
    InformedConsent => (
        "可進行治療，但需要告知風險並簽署同意書。建議術後追蹤。",
        "Treatment may proceed after disclosing the risk and obtaining signed informed consent. Post-procedure follow-up advised."
    ),
    PhysicianConsultation => (
        "建議先諮詢原處方醫師，評估是否需要暫停用藥。需要特殊處理及術後追蹤。",
        "Consult the prescribing physician about a possible drug holiday first. Requires special handling and post-procedure follow-up."
    ),
    SpecialistReferral => (
        "建議轉診至醫學中心進行評估。需要特殊處理及術後密切追蹤。",
        "Refer to a specialist medical center for evaluation. Requires special handling and close post-procedure follow-up."
    ),
});

/// Risk classification for a single procedure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProcedureAssessment {
    pub procedure: Procedure,
    pub risk_level: RiskLevel,
    pub recommendation: Recommendation,
}

impl ProcedureAssessment {
    /// Recommendation text in the given locale.
    pub fn recommendation_text(&self, locale: Locale) -> &'static str {
        self.recommendation.label(locale)
    }
}
