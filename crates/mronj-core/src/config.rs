//! Engine configuration.
//!
//! Resolved once by the host application and passed into the engine and the
//! report exporter. Clinical thresholds are deliberately absent here; they live
//! in [`crate::engine`] as constants.

use serde::{Deserialize, Serialize};

/// Output language for procedure, risk and recommendation labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// Traditional Chinese (Taiwan), the language of the intake screens
    #[default]
    #[serde(rename = "zh-TW")]
    ZhTw,
    /// English
    #[serde(rename = "en")]
    En,
}

impl Locale {
    /// Parse a BCP-47 style tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "zh-tw" | "zh_tw" | "zh-hant" | "zh" => Some(Locale::ZhTw),
            "en" | "en-us" | "en-gb" | "en_us" => Some(Locale::En),
            _ => None,
        }
    }

    /// Canonical tag for this locale.
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::ZhTw => "zh-TW",
            Locale::En => "en",
        }
    }
}

/// Configuration shared by assessment and export.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Language used when rendering labels
    pub locale: Locale,
    /// Identifier of the deployment, stamped on exported reports
    pub system_id: Option<String>,
}

impl EngineConfig {
    /// Create a configuration for the given locale.
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            system_id: None,
        }
    }

    /// Set the system identifier for exports.
    pub fn with_system_id(mut self, system_id: impl Into<String>) -> Self {
        self.system_id = Some(system_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale_is_zh_tw() {
        let config = EngineConfig::default();
        assert_eq!(config.locale, Locale::ZhTw);
        assert!(config.system_id.is_none());
    }

    #[test]
    fn test_locale_tags() {
        assert_eq!(Locale::from_tag("zh-TW"), Some(Locale::ZhTw));
        assert_eq!(Locale::from_tag(" EN "), Some(Locale::En));
        assert_eq!(Locale::from_tag("fr"), None);
        assert_eq!(Locale::En.tag(), "en");
    }

    #[test]
    fn test_locale_serde_uses_tags() {
        let json = serde_json::to_string(&Locale::ZhTw).unwrap();
        assert_eq!(json, "\"zh-TW\"");
        let back: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(back, Locale::En);
    }

    #[test]
    fn test_with_system_id() {
        let config = EngineConfig::new(Locale::En).with_system_id("clinic-01");
        assert_eq!(config.system_id.as_deref(), Some("clinic-01"));
    }
}
