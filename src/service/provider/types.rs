//! Raw payload types for provider responses.
//!
//! Everything here is "present with value" or absent. Defaulting decisions
//! for missing categories and audits belong to the synthesizer, not to the
//! wire types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Wrapper type for scores, storing a raw 0.0-1.0 value and helpers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Score(pub f64);

impl Score {
    /// Return the raw 0.0-1.0 value
    pub fn raw(&self) -> f64 {
        self.0
    }

    /// Convert to percentage with 2-decimal precision (0.0 - 100.0)
    pub fn percent(&self) -> f64 {
        (self.0 * 10000.0).round() / 100.0
    }

    /// Convert to an integer percentage, clamped to 0..=100
    pub fn integer(&self) -> u8 {
        (self.0 * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

impl From<f64> for Score {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

/// Raw response envelope from the provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAuditPayload {
    #[serde(rename = "lighthouseResult")]
    pub lighthouse_result: Option<RawLighthouseResult>,
}

/// The category scores and named audit results of one provider run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLighthouseResult {
    #[serde(default)]
    pub categories: RawCategories,
    /// Keyed by the provider's audit vocabulary ("is-on-https",
    /// "color-contrast", ...). Unknown keys are carried, missing keys are
    /// simply absent.
    #[serde(default)]
    pub audits: HashMap<String, RawAudit>,
}

/// Category scores (0.0 to 1.0), each possibly absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCategories {
    pub performance: Option<RawCategory>,
    pub accessibility: Option<RawCategory>,
    #[serde(rename = "best-practices")]
    pub best_practices: Option<RawCategory>,
    pub seo: Option<RawCategory>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawCategory {
    pub score: Option<Score>,
}

/// One named audit result. Binary audits carry a 0/1 `score`; metric
/// audits carry a `numeric_value`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawAudit {
    pub score: Option<f64>,
    #[serde(rename = "numericValue")]
    pub numeric_value: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_conversions() {
        assert_eq!(Score::from(0.95).integer(), 95);
        assert_eq!(Score::from(0.954).integer(), 95);
        assert_eq!(Score::from(0.955).integer(), 96);
        assert_eq!(Score::from(0.873456).percent(), 87.35);
        assert_eq!(Score::default().integer(), 0);
        // Out-of-range raw values clamp instead of overflowing
        assert_eq!(Score::from(1.7).integer(), 100);
        assert_eq!(Score::from(-0.2).integer(), 0);
    }

    #[test]
    fn payload_parsing() {
        let json = r#"{
            "lighthouseResult": {
                "categories": {
                    "performance": { "score": 0.92 },
                    "accessibility": { "score": 0.87 },
                    "best-practices": { "score": 0.95 },
                    "seo": { "score": 0.90 }
                },
                "audits": {
                    "is-on-https": { "score": 1 },
                    "first-contentful-paint": { "score": 0.98, "numericValue": 1184.5 },
                    "some-future-audit": { "score": 0.5 }
                }
            }
        }"#;

        let payload: RawAuditPayload = serde_json::from_str(json).unwrap();
        let lh = payload.lighthouse_result.unwrap();
        assert_eq!(lh.categories.performance.unwrap().score, Some(Score(0.92)));
        assert_eq!(lh.categories.best_practices.unwrap().score, Some(Score(0.95)));
        assert_eq!(lh.audits["is-on-https"].score, Some(1.0));
        assert_eq!(
            lh.audits["first-contentful-paint"].numeric_value,
            Some(1184.5)
        );
        // Unknown audit keys are carried without faulting the parse
        assert!(lh.audits.contains_key("some-future-audit"));
    }

    #[test]
    fn payload_parsing_tolerates_missing_pieces() {
        let payload: RawAuditPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.lighthouse_result.is_none());

        let payload: RawAuditPayload =
            serde_json::from_str(r#"{ "lighthouseResult": {} }"#).unwrap();
        let lh = payload.lighthouse_result.unwrap();
        assert!(lh.categories.performance.is_none());
        assert!(lh.audits.is_empty());

        // A category present without a score is still "absent" signal-wise
        let payload: RawAuditPayload = serde_json::from_str(
            r#"{ "lighthouseResult": { "categories": { "seo": {} } } }"#,
        )
        .unwrap();
        let lh = payload.lighthouse_result.unwrap();
        assert_eq!(lh.categories.seo.unwrap().score, None);
    }
}
