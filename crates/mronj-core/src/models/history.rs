//! Medical and medication history.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::YearMonth;
use crate::config::Locale;

/// A systemic disease reported on the intake form.
///
/// Only [`SystemicDisease::Diabetes`] and [`SystemicDisease::Dialysis`] affect
/// classification; every other label is kept verbatim for the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SystemicDisease {
    Diabetes,
    /// Dialysis or renal failure
    Dialysis,
    Other(String),
}

impl SystemicDisease {
    /// Map a form label onto a disease tag. Never fails; unknown labels become `Other`.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed {
            "糖尿病" => return SystemicDisease::Diabetes,
            "洗腎" | "腎衰竭" => return SystemicDisease::Dialysis,
            _ => {}
        }
        match trimmed.to_lowercase().as_str() {
            "diabetes" | "diabetes mellitus" => SystemicDisease::Diabetes,
            "dialysis" | "renal failure" | "renal-failure" => SystemicDisease::Dialysis,
            _ => SystemicDisease::Other(trimmed.to_string()),
        }
    }

    pub fn label(&self, locale: Locale) -> &str {
        match (self, locale) {
            (SystemicDisease::Diabetes, Locale::ZhTw) => "糖尿病",
            (SystemicDisease::Diabetes, Locale::En) => "diabetes",
            (SystemicDisease::Dialysis, Locale::ZhTw) => "洗腎",
            (SystemicDisease::Dialysis, Locale::En) => "dialysis",
            (SystemicDisease::Other(label), _) => label,
        }
    }

    /// Whether this disease triggers the high-risk override.
    pub fn is_high_risk(&self) -> bool {
        matches!(self, SystemicDisease::Diabetes | SystemicDisease::Dialysis)
    }
}

impl fmt::Display for SystemicDisease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Locale::En))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Transgender,
}

localized_labels!(Gender {
    Male => ("男", "male"),
    Female => ("女", "female"),
    Transgender => ("跨性別", "transgender"),
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    MaleToFemale,
    FemaleToMale,
    Other,
}

localized_labels!(TransitionKind {
    MaleToFemale => ("男跨女", "male to female"),
    FemaleToMale => ("女跨男", "female to male"),
    Other => ("其他", "other"),
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HormoneTherapyDuration {
    UnderFiveYears,
    FiveToTenYears,
    OverTenYears,
}

localized_labels!(HormoneTherapyDuration {
    UnderFiveYears => ("5年以內", "under 5 years"),
    FiveToTenYears => ("5-10年", "5-10 years"),
    OverTenYears => ("10年以上", "over 10 years"),
});

/// Reported medical history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MedicalHistory {
    pub gender: Option<Gender>,
    pub transition: Option<TransitionKind>,
    pub has_hormone_therapy: bool,
    pub hormone_therapy_duration: Option<HormoneTherapyDuration>,
    /// Reported systemic diseases
    pub systemic_diseases: BTreeSet<SystemicDisease>,
    pub has_radiotherapy_history: bool,
    pub radiotherapy_details: Option<String>,
    pub has_cancer_history: bool,
    pub cancer_details: Option<String>,
    /// Free-text other conditions
    pub other_conditions: Option<String>,
}

impl MedicalHistory {
    /// Radiotherapy, cancer, diabetes or dialysis.
    pub fn has_high_risk_comorbidity(&self) -> bool {
        self.has_radiotherapy_history
            || self.has_cancer_history
            || self.systemic_diseases.iter().any(SystemicDisease::is_high_risk)
    }

    /// Add diseases by form label.
    pub fn with_diseases<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.systemic_diseases
            .extend(labels.into_iter().map(|l| SystemicDisease::from_label(l.as_ref())));
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MedicationClass {
    Antiresorptive,
    Anabolic,
    AntiresorptiveAndAnabolic,
}

localized_labels!(MedicationClass {
    Antiresorptive => ("抗骨質再吸收劑", "antiresorptive"),
    Anabolic => ("促骨質合成藥物", "anabolic"),
    AntiresorptiveAndAnabolic => ("抗骨質再吸收劑與促骨質合成藥物", "antiresorptive and anabolic"),
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MedicationSubclass {
    Bisphosphonate,
    MonoclonalAntibody,
    /// Selective estrogen receptor modulator
    Serm,
}

localized_labels!(MedicationSubclass {
    Bisphosphonate => ("雙磷酸鹽類", "bisphosphonate"),
    MonoclonalAntibody => ("單株抗體", "monoclonal antibody"),
    Serm => ("選擇性雌激素受體調節物", "selective estrogen receptor modulator"),
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AdministrationRoute {
    Oral,
    Injection,
}

localized_labels!(AdministrationRoute {
    Oral => ("口服", "oral"),
    Injection => ("注射", "injection"),
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Indication {
    Osteoporosis,
    MultipleMyeloma,
    BoneMetastasis,
    Other,
}

localized_labels!(Indication {
    Osteoporosis => ("骨質疏鬆", "osteoporosis"),
    MultipleMyeloma => ("多發性骨髓瘤", "multiple myeloma"),
    BoneMetastasis => ("骨轉移", "bone metastasis"),
    Other => ("其他", "other"),
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DosingFrequency {
    Daily,
    Monthly,
    SemiAnnually,
}

localized_labels!(DosingFrequency {
    Daily => ("每天", "daily"),
    Monthly => ("每個月", "monthly"),
    SemiAnnually => ("每半年", "every six months"),
});

/// Bone-modifying medication history.
///
/// Start and stop are calendar months; the engine treats each as the first
/// day of that month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MedicationHistory {
    /// Gates all duration logic
    pub has_antiresorptive_medication: bool,
    pub medication_class: Option<MedicationClass>,
    pub medication_subclass: Option<MedicationSubclass>,
    /// Brand/trade name as selected on the form
    pub drug_name: Option<String>,
    pub route: Option<AdministrationRoute>,
    pub indication: Option<Indication>,
    pub frequency: Option<DosingFrequency>,
    pub medication_start: Option<YearMonth>,
    pub is_stopped: bool,
    pub medication_stop: Option<YearMonth>,
}

impl MedicationHistory {
    /// No bone-modifying medication.
    pub fn none() -> Self {
        Self::default()
    }

    /// Medication started in the given month and still being taken.
    pub fn ongoing(start: YearMonth) -> Self {
        Self {
            has_antiresorptive_medication: true,
            medication_start: Some(start),
            ..Self::default()
        }
    }

    /// Medication taken between two months.
    pub fn stopped(start: YearMonth, stop: YearMonth) -> Self {
        Self {
            is_stopped: true,
            medication_stop: Some(stop),
            ..Self::ongoing(start)
        }
    }
}
