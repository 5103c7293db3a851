//! Antiresorptive exposure duration.
//!
//! Start and stop are calendar months pinned to day 1. Elapsed days are
//! divided by a fixed 30-day month and rounded up, so any partial month counts
//! as a full month of exposure.

use chrono::NaiveDate;

use super::{AssessmentError, AssessmentResult};
use crate::models::{MedicationHistory, PatientRecord};

/// Fixed month length used for the day → month conversion.
pub const DAYS_PER_MONTH: i64 = 30;

/// Whole months of exposure for the record, as of `today`.
///
/// Zero when the patient has no antiresorptive medication; the date fields are
/// not inspected in that case. `today` is only read for ongoing medication.
pub fn exposure_months(record: &PatientRecord, today: NaiveDate) -> AssessmentResult<u32> {
    medication_exposure_months(&record.medication, today)
}

/// Same as [`exposure_months`], for the medication history alone.
pub fn medication_exposure_months(
    medication: &MedicationHistory,
    today: NaiveDate,
) -> AssessmentResult<u32> {
    if !medication.has_antiresorptive_medication {
        return Ok(0);
    }

    let start = medication
        .medication_start
        .ok_or(AssessmentError::MissingStartDate)?
        .first_day();

    let end = if medication.is_stopped {
        medication
            .medication_stop
            .ok_or(AssessmentError::MissingStopDate)?
            .first_day()
    } else {
        today
    };

    if end < start {
        tracing::warn!(
            %start,
            %end,
            stopped = medication.is_stopped,
            "medication end precedes start; using absolute elapsed time"
        );
    }

    Ok(months_from_days((end - start).num_days()))
}

/// Convert elapsed days to months, rounding up. The sign is ignored.
pub fn months_from_days(days: i64) -> u32 {
    let days = days.abs();
    let months = (days + DAYS_PER_MONTH - 1) / DAYS_PER_MONTH;
    u32::try_from(months).unwrap_or(u32::MAX)
}
