//! Intake form parsing for MRONJ screening.
//!
//! The intake screens keep every picker value as a string with localized
//! labels. This crate turns that state into a typed
//! [`mronj_core::PatientRecord`] the risk engine can assess.

pub mod form;

pub use form::*;
