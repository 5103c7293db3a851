//! Intake form state → typed patient record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mronj_core::models::{
    AdministrationRoute, Demographics, DosingFrequency, Gender, HormoneTherapyDuration,
    Indication, MedicalHistory, MedicationClass, MedicationHistory, MedicationSubclass,
    PatientRecord, TransitionKind, YearMonth,
};

/// Intake errors.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("Unknown label for {field}: {value:?}")]
    UnknownLabel { field: &'static str, value: String },

    #[error("Medication start date must be chosen before the stop date")]
    StartDateRequired,

    #[error("Stop date {stop} precedes start date {start}")]
    StopBeforeStart { start: String, stop: String },
}

pub type IntakeResult<T> = Result<T, IntakeError>;

/// Form state as stored by the intake screens.
///
/// Pickers store their selection as strings; an empty string means nothing was
/// chosen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct IntakeForm {
    // Personal info
    pub name: String,
    pub birth_year: String,
    pub birth_month: String,
    pub birth_day: String,
    pub id_number: String,
    pub height: String,
    pub weight: String,

    // Medical history
    pub gender: String,
    pub transgender_type: String,
    pub has_hormone_therapy: bool,
    pub hormone_therapy_duration: String,
    pub systemic_diseases: Vec<String>,
    pub has_radiotherapy: bool,
    pub radiotherapy_details: String,
    pub has_cancer: bool,
    pub cancer_history: String,
    pub other_conditions: String,

    // Medication history
    pub has_antiresorptive_med: bool,
    pub medication_type: String,
    pub medication_sub_type: String,
    pub drug_name: String,
    pub administration_route: String,
    pub indication: String,
    pub start_year: String,
    pub start_month: String,
    pub frequency: String,
    pub is_stopped: bool,
    pub stop_year: String,
    pub stop_month: String,
}

/// Parse form state JSON.
pub fn parse_intake(json: &str) -> IntakeResult<IntakeForm> {
    Ok(serde_json::from_str(json)?)
}

impl IntakeForm {
    /// Convert to a typed record.
    ///
    /// Medication details are only read when the antiresorptive flag is set, and
    /// stop fields only when the medication is marked as stopped.
    pub fn into_record(&self) -> IntakeResult<PatientRecord> {
        let record = PatientRecord::new(
            self.demographics()?,
            self.medical_history()?,
            self.medication()?,
        );

        tracing::debug!(
            on_medication = record.medication.has_antiresorptive_medication,
            stopped = record.medication.is_stopped,
            diseases = record.medical_history.systemic_diseases.len(),
            "parsed intake form"
        );

        Ok(record)
    }

    /// [`IntakeForm::check_stop_date`] followed by [`IntakeForm::into_record`].
    pub fn into_validated_record(&self) -> IntakeResult<PatientRecord> {
        self.check_stop_date()?;
        self.into_record()
    }

    /// Stop-date guard of the medication screen.
    ///
    /// A stop date can only be set once the start date is known, and it must not
    /// fall before the start month. Incomplete stop dates pass.
    pub fn check_stop_date(&self) -> IntakeResult<()> {
        if !self.has_antiresorptive_med || !self.is_stopped {
            return Ok(());
        }

        let stop_year = parse_year("stopYear", &self.stop_year)?;
        let stop_month = parse_month("stopMonth", &self.stop_month)?;
        let (stop_year, stop_month) = match (stop_year, stop_month) {
            (Some(y), Some(m)) => (y, m),
            _ => return Ok(()),
        };

        let start_year = parse_year("startYear", &self.start_year)?;
        let start_month = parse_month("startMonth", &self.start_month)?;
        let (start_year, start_month) = match (start_year, start_month) {
            (Some(y), Some(m)) => (y, m),
            _ => return Err(IntakeError::StartDateRequired),
        };

        if (stop_year, stop_month) < (start_year, start_month) {
            return Err(IntakeError::StopBeforeStart {
                start: format!("{:04}-{:02}", start_year, start_month),
                stop: format!("{:04}-{:02}", stop_year, stop_month),
            });
        }

        Ok(())
    }

    fn demographics(&self) -> IntakeResult<Demographics> {
        let birth_year = parse_year("birthYear", &self.birth_year)?;
        let birth_month = parse_month("birthMonth", &self.birth_month)?;
        let birth_day = parse_day("birthDay", &self.birth_day)?;

        // A complete birth date must exist on the calendar (no 02-31)
        if let (Some(y), Some(m), Some(d)) = (birth_year, birth_month, birth_day) {
            if NaiveDate::from_ymd_opt(y, m, d).is_none() {
                return Err(invalid("birthDay", &self.birth_day));
            }
        }

        Ok(Demographics {
            name: self.name.trim().to_string(),
            birth_year,
            birth_month,
            birth_day,
            id_number: self.id_number.trim().to_string(),
            height_cm: parse_measure("height", &self.height)?,
            weight_kg: parse_measure("weight", &self.weight)?,
        })
    }

    fn medical_history(&self) -> IntakeResult<MedicalHistory> {
        let gender = parse_label("gender", &self.gender, Gender::from_label)?;
        let transition = if gender == Some(Gender::Transgender) {
            parse_label("transgenderType", &self.transgender_type, TransitionKind::from_label)?
        } else {
            None
        };
        let hormone_therapy_duration = if self.has_hormone_therapy {
            parse_label(
                "hormoneTherapyDuration",
                &self.hormone_therapy_duration,
                HormoneTherapyDuration::from_label,
            )?
        } else {
            None
        };

        Ok(MedicalHistory {
            gender,
            transition,
            has_hormone_therapy: self.has_hormone_therapy,
            hormone_therapy_duration,
            systemic_diseases: Default::default(),
            has_radiotherapy_history: self.has_radiotherapy,
            radiotherapy_details: text(&self.radiotherapy_details),
            has_cancer_history: self.has_cancer,
            cancer_details: text(&self.cancer_history),
            other_conditions: text(&self.other_conditions),
        }
        .with_diseases(self.systemic_diseases.iter().filter(|d| !d.trim().is_empty())))
    }

    fn medication(&self) -> IntakeResult<MedicationHistory> {
        if !self.has_antiresorptive_med {
            return Ok(MedicationHistory::none());
        }

        let medication_start = parse_year_month(
            ("startYear", &self.start_year),
            ("startMonth", &self.start_month),
        )?;
        let medication_stop = if self.is_stopped {
            parse_year_month(("stopYear", &self.stop_year), ("stopMonth", &self.stop_month))?
        } else {
            None
        };

        Ok(MedicationHistory {
            has_antiresorptive_medication: true,
            medication_class: parse_label(
                "medicationType",
                &self.medication_type,
                MedicationClass::from_label,
            )?,
            medication_subclass: parse_label(
                "medicationSubType",
                &self.medication_sub_type,
                MedicationSubclass::from_label,
            )?,
            drug_name: text(&self.drug_name),
            route: parse_label(
                "administrationRoute",
                &self.administration_route,
                AdministrationRoute::from_label,
            )?,
            indication: parse_label("indication", &self.indication, Indication::from_label)?,
            frequency: parse_label("frequency", &self.frequency, DosingFrequency::from_label)?,
            medication_start,
            is_stopped: self.is_stopped,
            medication_stop,
        })
    }
}

fn text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn invalid(field: &'static str, value: &str) -> IntakeError {
    IntakeError::InvalidField {
        field,
        value: value.to_string(),
    }
}

fn parse_year(field: &'static str, value: &str) -> IntakeResult<Option<i32>> {
    text(value)
        .map(|v| v.parse::<i32>().map_err(|_| invalid(field, value)))
        .transpose()
}

fn parse_month(field: &'static str, value: &str) -> IntakeResult<Option<u32>> {
    let month = text(value)
        .map(|v| v.parse::<u32>().map_err(|_| invalid(field, value)))
        .transpose()?;
    match month {
        Some(m) if !(1..=12).contains(&m) => Err(invalid(field, value)),
        other => Ok(other),
    }
}

/// Both pickers must be set for a month to be recorded.
fn parse_year_month(
    (year_field, year): (&'static str, &str),
    (month_field, month): (&'static str, &str),
) -> IntakeResult<Option<YearMonth>> {
    match (parse_year(year_field, year)?, parse_month(month_field, month)?) {
        (Some(y), Some(m)) => YearMonth::new(y, m)
            .map(Some)
            .map_err(|_| invalid(year_field, year)),
        _ => Ok(None),
    }
}

fn parse_day(field: &'static str, value: &str) -> IntakeResult<Option<u32>> {
    let day = text(value)
        .map(|v| v.parse::<u32>().map_err(|_| invalid(field, value)))
        .transpose()?;
    match day {
        Some(d) if !(1..=31).contains(&d) => Err(invalid(field, value)),
        other => Ok(other),
    }
}

fn parse_measure(field: &'static str, value: &str) -> IntakeResult<Option<f64>> {
    let measure = text(value)
        .map(|v| v.parse::<f64>().map_err(|_| invalid(field, value)))
        .transpose()?;
    match measure {
        Some(m) if !m.is_finite() || m <= 0.0 => Err(invalid(field, value)),
        other => Ok(other),
    }
}

fn parse_label<T>(
    field: &'static str,
    value: &str,
    from_label: fn(&str) -> Option<T>,
) -> IntakeResult<Option<T>> {
    match text(value) {
        None => Ok(None),
        Some(label) => from_label(&label).map(Some).ok_or(IntakeError::UnknownLabel {
            field,
            value: label,
        }),
    }
}
