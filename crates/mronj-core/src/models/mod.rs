//! Domain models for MRONJ screening.

/// Implements `ALL`, `label` and `from_label` for a fieldless enum whose
/// variants carry a Traditional Chinese and an English label.
macro_rules! localized_labels {
    ($ty:ident { $($variant:ident => ($zh:literal, $en:literal)),+ $(,)? }) => {
        impl $ty {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Display label in the given locale.
            pub fn label(&self, locale: $crate::config::Locale) -> &'static str {
                match (self, locale) {
                    $(
                        ($ty::$variant, $crate::config::Locale::ZhTw) => $zh,
                        ($ty::$variant, $crate::config::Locale::En) => $en,
                    )+
                }
            }

            /// Parse a label in either locale (English is case-insensitive).
            pub fn from_label(label: &str) -> Option<Self> {
                let label = label.trim();
                Self::ALL.iter().copied().find(|v| {
                    v.label($crate::config::Locale::ZhTw) == label
                        || v.label($crate::config::Locale::En).eq_ignore_ascii_case(label)
                })
            }
        }
    };
}

mod assessment;
mod calendar;
mod history;
mod patient;

pub use assessment::*;
pub use calendar::*;
pub use history::*;
pub use patient::*;
