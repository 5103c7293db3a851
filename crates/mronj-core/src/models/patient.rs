//! Patient intake record.

use serde::{Deserialize, Serialize};

use super::{MedicalHistory, MedicationHistory};

/// WHO obesity cut-off.
pub const OBESITY_BMI: f64 = 30.0;

/// Identity and body measurements. Only used for report headers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Demographics {
    /// Patient name
    pub name: String,
    /// Birth year
    pub birth_year: Option<i32>,
    /// Birth month (1-12)
    pub birth_month: Option<u32>,
    /// Birth day of month
    pub birth_day: Option<u32>,
    /// National ID number
    pub id_number: String,
    /// Height in centimetres
    pub height_cm: Option<f64>,
    /// Weight in kilograms
    pub weight_kg: Option<f64>,
}

impl Demographics {
    /// Create demographics with a name and ID number.
    pub fn new(name: impl Into<String>, id_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id_number: id_number.into(),
            ..Default::default()
        }
    }

    /// Body mass index, if both measurements are present and positive.
    pub fn bmi(&self) -> Option<f64> {
        let height_m = self.height_cm? / 100.0;
        let weight = self.weight_kg?;
        if height_m <= 0.0 || weight <= 0.0 {
            return None;
        }
        Some(weight / (height_m * height_m))
    }

    pub fn is_obese(&self) -> bool {
        self.bmi().is_some_and(|bmi| bmi >= OBESITY_BMI)
    }

    /// Birth date formatted as `YYYY-MM-DD`, when all parts are known.
    pub fn birth_date(&self) -> Option<String> {
        match (self.birth_year, self.birth_month, self.birth_day) {
            (Some(y), Some(m), Some(d)) => Some(format!("{:04}-{:02}-{:02}", y, m, d)),
            _ => None,
        }
    }
}

/// Complete intake record handed to the risk engine.
///
/// Immutable for the duration of one assessment. The engine reads only the
/// medication dates and the comorbidity flags; everything else is carried for
/// the report layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PatientRecord {
    pub demographics: Demographics,
    pub medical_history: MedicalHistory,
    pub medication: MedicationHistory,
}

impl PatientRecord {
    /// Create a record from its three parts.
    pub fn new(
        demographics: Demographics,
        medical_history: MedicalHistory,
        medication: MedicationHistory,
    ) -> Self {
        Self {
            demographics,
            medical_history,
            medication,
        }
    }

    /// Whether the patient has ever taken antiresorptive medication.
    pub fn has_antiresorptive_medication(&self) -> bool {
        self.medication.has_antiresorptive_medication
    }

    /// Radiotherapy, cancer, diabetes or dialysis.
    pub fn has_high_risk_comorbidity(&self) -> bool {
        self.medical_history.has_high_risk_comorbidity()
    }
}
