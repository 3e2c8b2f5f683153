//! Rich domain entities - behavior lives WITH data

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AuditError, Result};

// ====== Enums ======

/// Accessibility conformance grade, derived solely from the
/// accessibility score. Never set independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceLevel {
    A,
    AA,
    AAA,
}

impl ComplianceLevel {
    /// Map a 0-100 accessibility score onto its grade.
    /// Monotonic: >= 90 is AAA, >= 70 is AA, everything below is A.
    pub fn from_score(score: u8) -> Self {
        if score >= 90 {
            ComplianceLevel::AAA
        } else if score >= 70 {
            ComplianceLevel::AA
        } else {
            ComplianceLevel::A
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceLevel::A => "A",
            ComplianceLevel::AA => "AA",
            ComplianceLevel::AAA => "AAA",
        }
    }
}

// ====== Category results ======

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityDetails {
    pub https_used: bool,
    pub mixed_content: bool,
    pub security_headers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityResult {
    pub score: u8,
    pub ssl: bool,
    /// Observed security headers, 0..=10
    pub headers: u8,
    pub vulnerabilities: u8,
    pub details: SecurityDetails,
}

/// Field-level timings in milliseconds, layout shift unitless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub first_contentful_paint: f64,
    pub largest_contentful_paint: f64,
    pub cumulative_layout_shift: f64,
    pub total_blocking_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResult {
    pub score: u8,
    /// Seconds until first paint
    pub load_time: f64,
    /// Estimated page weight in KB
    pub page_size: f64,
    pub requests: u32,
    pub metrics: PerformanceMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoDetails {
    pub title_present: bool,
    pub meta_description_present: bool,
    pub h1_present: bool,
    pub image_alt_present: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoResult {
    pub score: u8,
    /// Detected meta tags, 0..=12
    pub meta_tags: u8,
    pub headings: bool,
    pub sitemap: bool,
    pub details: SeoDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityDetails {
    pub color_contrast: bool,
    pub alt_text: bool,
    pub keyboard_navigation: bool,
    pub aria_labels: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityResult {
    pub score: u8,
    pub issues: u8,
    pub compliance: ComplianceLevel,
    pub details: AccessibilityDetails,
}

// ====== Report ======

/// One audit of one URL. Constructed atomically by the synthesizer and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub overall_score: u8,
    pub security: SecurityResult,
    pub performance: PerformanceResult,
    pub seo: SeoResult,
    pub accessibility: AccessibilityResult,
}

impl AuditReport {
    /// Round of the arithmetic mean of four category scores.
    pub fn overall_from(scores: [u8; 4]) -> u8 {
        let sum: u32 = scores.iter().map(|s| u32::from(*s)).sum();
        (sum as f64 / scores.len() as f64).round() as u8
    }

    pub fn category_scores(&self) -> [u8; 4] {
        [
            self.security.score,
            self.performance.score,
            self.seo.score,
            self.accessibility.score,
        ]
    }

    /// Verify every domain bound the report promises its consumers.
    /// A violation here means a synthesis defect, never a provider problem.
    pub fn validate(&self) -> Result<()> {
        for (category, score) in [
            ("overall", self.overall_score),
            ("security", self.security.score),
            ("performance", self.performance.score),
            ("seo", self.seo.score),
            ("accessibility", self.accessibility.score),
        ] {
            if score > 100 {
                return Err(AuditError::invariant(format!(
                    "{category} score {score} exceeds 100"
                )));
            }
        }

        let expected = Self::overall_from(self.category_scores());
        if self.overall_score != expected {
            return Err(AuditError::invariant(format!(
                "overall score {} does not match category mean {}",
                self.overall_score, expected
            )));
        }

        if self.security.headers > 10 {
            return Err(AuditError::invariant(format!(
                "security headers count {} exceeds 10",
                self.security.headers
            )));
        }

        if self.seo.meta_tags > 12 {
            return Err(AuditError::invariant(format!(
                "meta tag count {} exceeds 12",
                self.seo.meta_tags
            )));
        }

        if self.accessibility.compliance != ComplianceLevel::from_score(self.accessibility.score) {
            return Err(AuditError::invariant(format!(
                "compliance {} inconsistent with accessibility score {}",
                self.accessibility.compliance.as_str(),
                self.accessibility.score
            )));
        }

        // Negated comparisons so NaN fails too
        let non_negative = [
            ("loadTime", self.performance.load_time),
            ("pageSize", self.performance.page_size),
            (
                "firstContentfulPaint",
                self.performance.metrics.first_contentful_paint,
            ),
            (
                "largestContentfulPaint",
                self.performance.metrics.largest_contentful_paint,
            ),
            (
                "cumulativeLayoutShift",
                self.performance.metrics.cumulative_layout_shift,
            ),
            (
                "totalBlockingTime",
                self.performance.metrics.total_blocking_time,
            ),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(AuditError::invariant(format!(
                    "{field} is negative or not a number: {value}"
                )));
            }
        }

        Ok(())
    }
}
