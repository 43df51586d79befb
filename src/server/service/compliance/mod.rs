//! Document compliance scoring.
//!
//! A compliance run short-circuits on unusable text, otherwise merges the
//! deterministic rule-based pass with the external semantic reviewer's
//! findings into one weighted percentage. Reviewer failures are never fatal:
//! the run degrades to the rule-based result and records why.

pub mod extract;
pub mod quality;
pub mod score;
pub mod standards;

use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::model::compliance::{
    AnalysisMethod, ComplianceDetails, ComplianceReport, ExternalTally, RuleTally,
};
use crate::model::status::DocumentStatus;
use crate::server::{
    data::document::DocumentRepository, error::Error, external::reviewer::ReviewerClient,
};

use self::{quality::assess_text_quality, score::run_rule_checks, standards::BuildingStandards};

/// Extracted text shorter than this cannot be meaningfully checked.
const MIN_TEXT_LENGTH: usize = 50;
/// Extracted text longer than this exceeds what the pipeline analyses.
const MAX_TEXT_LENGTH: usize = 50_000;
/// Length of the text excerpt kept in the persisted result.
const EXCERPT_LENGTH: usize = 500;

pub static DIAGNOSTIC_INSUFFICIENT_TEXT: &str = "insufficient_text";
pub static DIAGNOSTIC_DOCUMENT_TOO_LARGE: &str = "document_too_large";

/// Scoring weights and thresholds, overridable per deployment.
#[derive(Clone, Debug)]
pub struct ComplianceConfig {
    /// Weight of the external reviewer's percentage in the hybrid score.
    pub ai_weight: f64,
    /// Weight of the rule-based percentage in the hybrid score.
    pub rule_weight: f64,
    /// Minimum final percentage considered compliant.
    pub compliant_threshold: f64,
    /// Check count the reviewer's issue list is measured against.
    pub assumed_ai_checks: u32,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            ai_weight: 0.6,
            rule_weight: 0.4,
            compliant_threshold: 80.0,
            assumed_ai_checks: 10,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_LENGTH {
        return text.to_string();
    }

    let truncated: String = text.chars().take(EXCERPT_LENGTH).collect();
    format!("{}...", truncated)
}

/// Folds the two passes into the final percentage and records which method
/// produced it. With the reviewer available the result is the convex
/// combination of both percentages, so it always lies between them.
pub(crate) fn combine(
    rule: &RuleTally,
    external: &ExternalTally,
    config: &ComplianceConfig,
) -> (f64, AnalysisMethod) {
    if !external.available {
        return (rule.percentage, AnalysisMethod::RuleBased);
    }

    if rule.total == 0 {
        return (external.percentage, AnalysisMethod::AiBased);
    }

    (
        external.percentage * config.ai_weight + rule.percentage * config.rule_weight,
        AnalysisMethod::Hybrid,
    )
}

pub struct ComplianceScorer<'a> {
    db: &'a DatabaseConnection,
    reviewer: &'a ReviewerClient,
    config: ComplianceConfig,
    standards: BuildingStandards,
}

impl<'a> ComplianceScorer<'a> {
    /// Creates a new instance of [`ComplianceScorer`]
    pub fn new(
        db: &'a DatabaseConnection,
        reviewer: &'a ReviewerClient,
        config: ComplianceConfig,
    ) -> Self {
        Self {
            db,
            reviewer,
            config,
            standards: BuildingStandards::default(),
        }
    }

    /// Runs a compliance check over a document's extracted text, persists the
    /// structured result on the document row (overwriting any previous run),
    /// and marks the document `approved` only when compliant.
    pub async fn check_document(&self, document_id: i32) -> Result<ComplianceReport, Error> {
        let document_repo = DocumentRepository::new(self.db);

        let document = document_repo
            .find_by_id(document_id)
            .await?
            .ok_or(Error::DocumentNotFound(document_id))?;

        let text = document.extracted_text.clone().unwrap_or_default();

        if text.trim().len() < MIN_TEXT_LENGTH {
            let report = self.short_circuit_report(
                &text,
                DIAGNOSTIC_INSUFFICIENT_TEXT,
                "Document text extraction failed or insufficient text content",
                "The system could not extract enough text from the document to perform a compliance check",
                vec![
                    "Upload a clearer document".to_string(),
                    "Ensure the document is not password protected".to_string(),
                    "Try a different file format (PDF is recommended)".to_string(),
                ],
            );

            let status = document.status.clone();
            self.persist(&document_repo, document, &report, &status)
                .await?;

            return Ok(report);
        }

        if text.len() > MAX_TEXT_LENGTH {
            let report = self.short_circuit_report(
                &text,
                DIAGNOSTIC_DOCUMENT_TOO_LARGE,
                "Document is too large for detailed analysis",
                "The document exceeds the size limit for compliance analysis",
                vec![
                    "Upload a smaller document or one with less text content".to_string(),
                    "Try splitting large documents into smaller sections".to_string(),
                ],
            );

            let status = document.status.clone();
            self.persist(&document_repo, document, &report, &status)
                .await?;

            return Ok(report);
        }

        let rule_outcome = run_rule_checks(&text, &self.standards);
        let rule_tally = RuleTally {
            passed: rule_outcome.passed(),
            total: rule_outcome.total(),
            percentage: round2(rule_outcome.percentage()),
        };

        let (findings, external_error) = match self.reviewer.check_compliance(&text).await {
            Ok(findings) => {
                let error = findings.error.clone();
                (findings, error)
            }
            Err(e) => {
                warn!("External compliance review failed: {}", e);
                (Default::default(), Some(e.to_string()))
            }
        };

        let total_checks = self.config.assumed_ai_checks;
        let issue_count = findings.issues.len() as u32;
        let passed_checks = total_checks.saturating_sub(issue_count);
        let external_tally = ExternalTally {
            available: external_error.is_none(),
            passed: passed_checks,
            total: total_checks,
            percentage: round2(f64::from(passed_checks) / f64::from(total_checks) * 100.0),
        };

        let (final_percentage, analysis_method) =
            combine(&rule_tally, &external_tally, &self.config);
        let final_percentage = round2(final_percentage);
        let compliant = final_percentage >= self.config.compliant_threshold;

        let mut issues = rule_outcome.issues();
        issues.extend(findings.issues.clone());

        let mut warnings = findings.warnings.clone();
        warnings.extend(rule_outcome.fallback_notes());

        let report = ComplianceReport {
            compliant,
            compliance_percentage: final_percentage,
            compliance_details: ComplianceDetails {
                rule_based_checks: rule_tally,
                ai_checks: external_tally,
                weighted_calculation: analysis_method == AnalysisMethod::Hybrid,
            },
            issues,
            warnings,
            suggestions: findings.suggestions,
            text_quality: assess_text_quality(&text),
            text_extracted: excerpt(&text),
            error: external_error,
            analysis_method,
        };

        let status = if compliant {
            DocumentStatus::Approved
        } else {
            DocumentStatus::Pending
        };

        self.persist(&document_repo, document, &report, status.as_str())
            .await?;

        info!(
            "Document {} compliance: {:.2}% ({})",
            document_id,
            report.compliance_percentage,
            if report.compliant {
                "compliant"
            } else {
                "non-compliant"
            }
        );

        Ok(report)
    }

    fn short_circuit_report(
        &self,
        text: &str,
        diagnostic: &str,
        issue: &str,
        warning: &str,
        suggestions: Vec<String>,
    ) -> ComplianceReport {
        ComplianceReport {
            compliant: false,
            compliance_percentage: 0.0,
            compliance_details: ComplianceDetails {
                rule_based_checks: RuleTally {
                    passed: 0,
                    total: 0,
                    percentage: 0.0,
                },
                ai_checks: ExternalTally {
                    available: false,
                    passed: 0,
                    total: self.config.assumed_ai_checks,
                    percentage: 0.0,
                },
                weighted_calculation: false,
            },
            issues: vec![issue.to_string()],
            warnings: vec![warning.to_string()],
            suggestions,
            text_quality: assess_text_quality(text),
            text_extracted: excerpt(text),
            error: Some(diagnostic.to_string()),
            analysis_method: AnalysisMethod::RuleBased,
        }
    }

    async fn persist<C: sea_orm::ConnectionTrait>(
        &self,
        document_repo: &DocumentRepository<'_, C>,
        document: entity::document::Model,
        report: &ComplianceReport,
        status: &str,
    ) -> Result<(), Error> {
        let result = serde_json::to_value(report)?;

        document_repo
            .set_compliance_result(document, result, status)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::compliance::{AnalysisMethod, ExternalTally, RuleTally};

    use super::{combine, round2, ComplianceConfig};

    fn rule(percentage: f64, passed: u32, total: u32) -> RuleTally {
        RuleTally {
            passed,
            total,
            percentage,
        }
    }

    fn external(available: bool, percentage: f64) -> ExternalTally {
        ExternalTally {
            available,
            passed: 0,
            total: 10,
            percentage,
        }
    }

    mod combine_tests {
        use super::*;

        /// Expect 8/10 rule checks and 2 reviewer issues to land on exactly
        /// the 80% threshold
        #[test]
        fn test_threshold_scenario() {
            let config = ComplianceConfig::default();

            let (percentage, method) =
                combine(&rule(80.0, 8, 10), &external(true, 80.0), &config);

            assert_eq!(round2(percentage), 80.0);
            assert_eq!(method, AnalysisMethod::Hybrid);
            assert!(round2(percentage) >= config.compliant_threshold);
        }

        /// Expect the hybrid score to be a convex combination: never outside
        /// the two contributing percentages
        #[test]
        fn test_weighting_law() {
            let config = ComplianceConfig::default();

            let cases = [(100.0, 40.0), (40.0, 100.0), (0.0, 100.0), (73.5, 91.0)];

            for (rule_pct, ai_pct) in cases {
                let (percentage, method) =
                    combine(&rule(rule_pct, 5, 10), &external(true, ai_pct), &config);

                let low = rule_pct.min(ai_pct);
                let high = rule_pct.max(ai_pct);

                assert!(percentage >= low && percentage <= high);
                assert_eq!(method, AnalysisMethod::Hybrid);
            }
        }

        /// Expect rule-based-only scoring when the reviewer is unavailable
        #[test]
        fn test_reviewer_unavailable() {
            let config = ComplianceConfig::default();

            let (percentage, method) =
                combine(&rule(72.5, 8, 11), &external(false, 0.0), &config);

            assert_eq!(percentage, 72.5);
            assert_eq!(method, AnalysisMethod::RuleBased);
        }

        /// Expect the external percentage alone when the rule pass produced
        /// no checks
        #[test]
        fn test_no_rule_checks() {
            let config = ComplianceConfig::default();

            let (percentage, method) =
                combine(&rule(100.0, 0, 0), &external(true, 90.0), &config);

            assert_eq!(percentage, 90.0);
            assert_eq!(method, AnalysisMethod::AiBased);
        }
    }

    mod round2_tests {
        use super::round2;

        #[test]
        fn test_rounds_to_two_decimals() {
            assert_eq!(round2(66.66666), 66.67);
            assert_eq!(round2(80.0), 80.0);
            assert_eq!(round2(0.004), 0.0);
        }
    }
}
