//! Assessment report as plain data.
//!
//! The document renderer (PDF/HTML) lives in the host app and consumes this
//! structure; nothing here formats markup.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, Locale};
use crate::engine::{self, AssessmentResult, RiskAssessment};
use crate::models::{
    MedicalHistory, MedicationHistory, PatientRecord, Procedure, ProcedureAssessment,
    Recommendation, RiskLevel,
};

/// Report format version.
pub const REPORT_FORMAT_VERSION: &str = "1.0";

/// Full report for one patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessmentReport {
    pub metadata: ReportMetadata,
    pub patient: PatientHeader,
    pub history: HistorySummary,
    pub medication: MedicationSummary,
    /// One entry per procedure, canonical order
    pub assessments: Vec<ReportEntry>,
}

/// Report metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportMetadata {
    /// Export format version
    pub format_version: String,
    /// Unique report identifier
    pub report_id: String,
    /// Export timestamp
    pub generated_at: String,
    /// Date the risk was evaluated against
    pub assessed_on: NaiveDate,
    /// Language of the rendered labels
    pub locale: Locale,
    /// Exporting system identifier
    pub system_id: Option<String>,
}

/// Identity block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientHeader {
    pub name: String,
    pub birth_date: Option<String>,
    pub id_number: String,
    pub bmi: Option<f64>,
    pub is_obese: bool,
}

/// Comorbidities as shown on the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistorySummary {
    /// Localized disease labels
    pub systemic_diseases: Vec<String>,
    pub has_radiotherapy_history: bool,
    pub radiotherapy_details: Option<String>,
    pub has_cancer_history: bool,
    pub cancer_details: Option<String>,
    pub high_risk_comorbidity: bool,
}

/// Medication block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicationSummary {
    pub on_medication: bool,
    pub drug_name: Option<String>,
    pub route: Option<String>,
    pub indication: Option<String>,
    pub frequency: Option<String>,
    /// `YYYY-MM`
    pub started: Option<String>,
    /// `YYYY-MM`, absent while ongoing
    pub stopped: Option<String>,
    pub exposure_months: u32,
}

/// One rendered procedure line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportEntry {
    pub procedure: Procedure,
    pub procedure_label: String,
    pub risk_level: RiskLevel,
    pub risk_label: String,
    pub recommendation: Recommendation,
    pub recommendation_text: String,
}

impl ReportEntry {
    fn render(assessment: &ProcedureAssessment, locale: Locale) -> Self {
        Self {
            procedure: assessment.procedure,
            procedure_label: assessment.procedure.label(locale).to_string(),
            risk_level: assessment.risk_level,
            risk_label: assessment.risk_level.label(locale).to_string(),
            recommendation: assessment.recommendation,
            recommendation_text: assessment.recommendation_text(locale).to_string(),
        }
    }
}

impl AssessmentReport {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Most severe risk across all procedures.
    pub fn highest_risk(&self) -> RiskLevel {
        RiskLevel::highest(self.assessments.iter().map(|e| e.risk_level))
    }
}

/// Builds reports from patient records.
pub struct ReportExporter {
    config: EngineConfig,
}

impl ReportExporter {
    /// Create a new report exporter.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Assess the record as of `today` and build its report.
    pub fn export(&self, record: &PatientRecord, today: NaiveDate) -> AssessmentResult<AssessmentReport> {
        let assessment = engine::evaluate(record, today)?;
        Ok(self.build(record, &assessment))
    }

    /// [`ReportExporter::export`] against the local wall-clock date.
    pub fn export_today(&self, record: &PatientRecord) -> AssessmentResult<AssessmentReport> {
        self.export(record, engine::today())
    }

    /// Build a report from an assessment that has already been evaluated.
    pub fn build(&self, record: &PatientRecord, assessment: &RiskAssessment) -> AssessmentReport {
        let locale = self.config.locale;
        let demographics = &record.demographics;

        AssessmentReport {
            metadata: ReportMetadata {
                format_version: REPORT_FORMAT_VERSION.to_string(),
                report_id: uuid::Uuid::new_v4().to_string(),
                generated_at: chrono::Utc::now().to_rfc3339(),
                assessed_on: assessment.assessed_on,
                locale,
                system_id: self.config.system_id.clone(),
            },
            patient: PatientHeader {
                name: demographics.name.clone(),
                birth_date: demographics.birth_date(),
                id_number: demographics.id_number.clone(),
                bmi: demographics.bmi(),
                is_obese: demographics.is_obese(),
            },
            history: summarize_history(&record.medical_history, locale),
            medication: summarize_medication(
                &record.medication,
                assessment.factors.exposure_months,
                locale,
            ),
            assessments: assessment
                .assessments
                .iter()
                .map(|a| ReportEntry::render(a, locale))
                .collect(),
        }
    }
}

fn summarize_history(history: &MedicalHistory, locale: Locale) -> HistorySummary {
    HistorySummary {
        systemic_diseases: history
            .systemic_diseases
            .iter()
            .map(|d| d.label(locale).to_string())
            .collect(),
        has_radiotherapy_history: history.has_radiotherapy_history,
        radiotherapy_details: history
            .has_radiotherapy_history
            .then(|| history.radiotherapy_details.clone())
            .flatten(),
        has_cancer_history: history.has_cancer_history,
        cancer_details: history
            .has_cancer_history
            .then(|| history.cancer_details.clone())
            .flatten(),
        high_risk_comorbidity: history.has_high_risk_comorbidity(),
    }
}

fn summarize_medication(
    medication: &MedicationHistory,
    exposure_months: u32,
    locale: Locale,
) -> MedicationSummary {
    if !medication.has_antiresorptive_medication {
        return MedicationSummary {
            on_medication: false,
            drug_name: None,
            route: None,
            indication: None,
            frequency: None,
            started: None,
            stopped: None,
            exposure_months: 0,
        };
    }

    MedicationSummary {
        on_medication: true,
        drug_name: medication.drug_name.clone(),
        route: medication.route.map(|r| r.label(locale).to_string()),
        indication: medication.indication.map(|i| i.label(locale).to_string()),
        frequency: medication.frequency.map(|f| f.label(locale).to_string()),
        started: medication.medication_start.map(|ym| ym.to_string()),
        stopped: medication
            .is_stopped
            .then(|| medication.medication_stop.map(|ym| ym.to_string()))
            .flatten(),
        exposure_months,
    }
}
