//! End-to-end: form JSON → record → assessment.

use chrono::NaiveDate;
use mronj_core::{assess, Procedure, Recommendation, RiskLevel};
use mronj_intake::{parse_intake, IntakeError};

const STOPPED_WITH_DIABETES: &str = r#"{
    "name": "黃淑芬",
    "birthYear": "1950",
    "birthMonth": "2",
    "birthDay": "14",
    "idNumber": "F223456789",
    "gender": "女",
    "transgenderType": "",
    "hasHormoneTherapy": false,
    "hormoneTherapyDuration": "",
    "systemicDiseases": ["糖尿病", "高血壓"],
    "hasRadiotherapy": false,
    "radiotherapyDetails": "",
    "hasCancer": false,
    "cancerHistory": "",
    "otherConditions": "",
    "hasAntiresorptiveMed": true,
    "medicationType": "抗骨質再吸收劑",
    "medicationSubType": "雙磷酸鹽類",
    "drugName": "福善美保骨錠Fosamax Plus",
    "administrationRoute": "口服",
    "indication": "骨質疏鬆",
    "startYear": "2021",
    "startMonth": "1",
    "frequency": "每天",
    "isStopped": true,
    "stopYear": "2022",
    "stopMonth": "1"
}"#;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_store_snapshot_to_assessment() {
    let record = parse_intake(STOPPED_WITH_DIABETES)
        .and_then(|form| form.into_validated_record())
        .unwrap();

    let out = assess(&record, date(2024, 5, 1)).unwrap();
    assert_eq!(out.len(), 5);
    for a in &out {
        if a.procedure == Procedure::NonInvasive {
            assert_eq!(a.risk_level, RiskLevel::Low);
            assert_eq!(a.recommendation, Recommendation::ProceedWithFollowUp);
        } else {
            assert_eq!(a.risk_level, RiskLevel::High);
            assert_eq!(a.recommendation, Recommendation::SpecialistReferral);
        }
    }
}

#[test]
fn test_snapshot_without_medication() {
    let json = STOPPED_WITH_DIABETES.replace(
        "\"hasAntiresorptiveMed\": true",
        "\"hasAntiresorptiveMed\": false",
    );
    let record = parse_intake(&json).unwrap().into_record().unwrap();

    let out = assess(&record, date(2024, 5, 1)).unwrap();
    assert!(out
        .iter()
        .all(|a| a.risk_level == RiskLevel::Low
            && a.recommendation == Recommendation::RoutineTreatment));
}

#[test]
fn test_partial_snapshot_uses_defaults() {
    // Screens not yet visited are simply absent
    let json = r#"{ "name": "Partial", "hasAntiresorptiveMed": false }"#;
    let record = parse_intake(json).unwrap().into_record().unwrap();
    assert_eq!(record.demographics.name, "Partial");
    assert!(!record.has_antiresorptive_medication());
}

#[test]
fn test_reversed_stop_date_is_rejected_at_intake() {
    let json = STOPPED_WITH_DIABETES.replace("\"stopYear\": \"2022\"", "\"stopYear\": \"2020\"");
    let err = parse_intake(&json)
        .and_then(|form| form.into_validated_record())
        .unwrap_err();
    assert!(matches!(err, IntakeError::StopBeforeStart { .. }));
}

mod properties {
    use mronj_intake::IntakeForm;
    use proptest::prelude::*;

    fn medicated(start_year: String, start_month: String) -> IntakeForm {
        IntakeForm {
            has_antiresorptive_med: true,
            start_year,
            start_month,
            ..Default::default()
        }
    }

    proptest! {
        #[test]
        fn valid_months_parse(year in 1990i32..2040, month in 1u32..=12) {
            let record = medicated(year.to_string(), month.to_string()).into_record().unwrap();
            let start = record.medication.medication_start.unwrap();
            prop_assert_eq!(start.year(), year);
            prop_assert_eq!(start.month(), month);
        }

        #[test]
        fn birth_dates_parse_only_if_on_calendar(
            year in 1900i32..2030,
            month in 1u32..=12,
            day in 1u32..=31,
        ) {
            let form = IntakeForm {
                birth_year: year.to_string(),
                birth_month: month.to_string(),
                birth_day: day.to_string(),
                ..Default::default()
            };
            let exists = chrono::NaiveDate::from_ymd_opt(year, month, day).is_some();
            prop_assert_eq!(form.into_record().is_ok(), exists);
        }

        #[test]
        fn out_of_range_months_fail(month in 13u32..1000) {
            prop_assert!(medicated("2020".into(), month.to_string()).into_record().is_err());
        }

        #[test]
        fn stop_not_before_start_passes(
            start_year in 1990i32..2030,
            start_month in 1u32..=12,
            gap in 0i32..120,
        ) {
            let total = start_year * 12 + (start_month as i32 - 1) + gap;
            let mut form = medicated(start_year.to_string(), start_month.to_string());
            form.is_stopped = true;
            form.stop_year = (total / 12).to_string();
            form.stop_month = (total % 12 + 1).to_string();
            prop_assert!(form.check_stop_date().is_ok());
        }
    }
}
