//! Golden scenarios for the risk engine.
//!
//! Each case fixes the evaluation date so results do not drift with the clock.

use chrono::NaiveDate;
use mronj_core::models::{MedicalHistory, MedicationHistory, PatientRecord, Procedure, YearMonth};
use mronj_core::{assess, evaluate, Recommendation, RiskLevel};

fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).unwrap()
}

/// Scenario from the screening protocol.
struct GoldenCase {
    id: &'static str,
    medication: MedicationHistory,
    diseases: &'static [&'static str],
    radiotherapy: bool,
    cancer: bool,
    today: (i32, u32, u32),
    expected_months: u32,
    expected_invasive_risk: RiskLevel,
    expected_invasive_recommendation: Recommendation,
    expected_non_invasive_recommendation: Recommendation,
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "long-ongoing-exposure",
            medication: MedicationHistory::ongoing(ym(2020, 1)),
            diseases: &[],
            radiotherapy: false,
            cancer: false,
            today: (2023, 6, 1),
            expected_months: 42,
            expected_invasive_risk: RiskLevel::High,
            expected_invasive_recommendation: Recommendation::SpecialistReferral,
            expected_non_invasive_recommendation: Recommendation::ProceedWithFollowUp,
        },
        GoldenCase {
            id: "short-ongoing-exposure",
            medication: MedicationHistory::ongoing(ym(2023, 1)),
            diseases: &[],
            radiotherapy: false,
            cancer: false,
            today: (2023, 8, 1),
            expected_months: 8,
            expected_invasive_risk: RiskLevel::Low,
            expected_invasive_recommendation: Recommendation::InformedConsent,
            expected_non_invasive_recommendation: Recommendation::ProceedWithFollowUp,
        },
        GoldenCase {
            id: "stopped-with-diabetes",
            medication: MedicationHistory::stopped(ym(2021, 1), ym(2022, 1)),
            diseases: &["糖尿病"],
            radiotherapy: false,
            cancer: false,
            today: (2024, 3, 15),
            expected_months: 13,
            expected_invasive_risk: RiskLevel::High,
            expected_invasive_recommendation: Recommendation::SpecialistReferral,
            expected_non_invasive_recommendation: Recommendation::ProceedWithFollowUp,
        },
        GoldenCase {
            id: "stopped-without-comorbidity",
            medication: MedicationHistory::stopped(ym(2021, 1), ym(2022, 1)),
            diseases: &["高血壓"],
            radiotherapy: false,
            cancer: false,
            today: (2024, 3, 15),
            expected_months: 13,
            expected_invasive_risk: RiskLevel::Moderate,
            expected_invasive_recommendation: Recommendation::PhysicianConsultation,
            expected_non_invasive_recommendation: Recommendation::ProceedWithFollowUp,
        },
        GoldenCase {
            id: "no-medication",
            medication: MedicationHistory::none(),
            diseases: &["糖尿病", "洗腎"],
            radiotherapy: true,
            cancer: true,
            today: (2024, 3, 15),
            expected_months: 0,
            expected_invasive_risk: RiskLevel::Low,
            expected_invasive_recommendation: Recommendation::RoutineTreatment,
            expected_non_invasive_recommendation: Recommendation::RoutineTreatment,
        },
        GoldenCase {
            id: "radiotherapy-short-exposure",
            medication: MedicationHistory::ongoing(ym(2024, 1)),
            diseases: &[],
            radiotherapy: true,
            cancer: false,
            today: (2024, 2, 1),
            expected_months: 2,
            expected_invasive_risk: RiskLevel::High,
            expected_invasive_recommendation: Recommendation::SpecialistReferral,
            expected_non_invasive_recommendation: Recommendation::ProceedWithFollowUp,
        },
        GoldenCase {
            id: "dialysis-short-exposure",
            medication: MedicationHistory::ongoing(ym(2024, 1)),
            diseases: &["洗腎"],
            radiotherapy: false,
            cancer: false,
            today: (2024, 1, 20),
            expected_months: 1,
            expected_invasive_risk: RiskLevel::High,
            expected_invasive_recommendation: Recommendation::SpecialistReferral,
            expected_non_invasive_recommendation: Recommendation::ProceedWithFollowUp,
        },
    ]
}

fn build_record(case: &GoldenCase) -> PatientRecord {
    let history = MedicalHistory {
        has_radiotherapy_history: case.radiotherapy,
        has_cancer_history: case.cancer,
        ..Default::default()
    }
    .with_diseases(case.diseases.iter().copied());

    PatientRecord {
        medical_history: history,
        medication: case.medication.clone(),
        ..Default::default()
    }
}

#[test]
fn test_golden_cases() {
    for case in get_golden_cases() {
        let (y, m, d) = case.today;
        let today = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let result = evaluate(&build_record(&case), today).unwrap();

        assert_eq!(
            result.factors.exposure_months, case.expected_months,
            "{}: exposure months",
            case.id
        );
        assert_eq!(result.assessments.len(), 5, "{}: procedure count", case.id);

        for assessment in &result.assessments {
            if assessment.procedure.is_invasive() {
                assert_eq!(
                    assessment.risk_level, case.expected_invasive_risk,
                    "{}: {:?} risk",
                    case.id, assessment.procedure
                );
                assert_eq!(
                    assessment.recommendation, case.expected_invasive_recommendation,
                    "{}: {:?} recommendation",
                    case.id, assessment.procedure
                );
            } else {
                assert_eq!(assessment.risk_level, RiskLevel::Low, "{}", case.id);
                assert_eq!(
                    assessment.recommendation, case.expected_non_invasive_recommendation,
                    "{}",
                    case.id
                );
            }
        }
    }
}

#[test]
fn test_canonical_order_is_fixed() -> anyhow::Result<()> {
    let record = PatientRecord {
        medication: MedicationHistory::ongoing(ym(2015, 6)),
        ..Default::default()
    };
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let procedures: Vec<_> = assess(&record, today)?.into_iter().map(|a| a.procedure).collect();

    assert_eq!(
        procedures,
        vec![
            Procedure::NonInvasive,
            Procedure::Extraction,
            Procedure::PeriodontalSurgery,
            Procedure::Implant,
            Procedure::RootCanal,
        ]
    );
    Ok(())
}

#[test]
fn test_ongoing_result_depends_only_on_injected_date() -> anyhow::Result<()> {
    let record = PatientRecord {
        medication: MedicationHistory::ongoing(ym(2023, 1)),
        ..Default::default()
    };
    let early = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
    let late = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();

    assert_eq!(assess(&record, early)?, assess(&record, early)?);
    assert_eq!(evaluate(&record, early)?.highest_risk(), RiskLevel::Low);
    assert_eq!(evaluate(&record, late)?.highest_risk(), RiskLevel::High);
    Ok(())
}
