//! Structured result of a document compliance run. Serialized into the
//! document row's `compliance_result` column and returned to API callers; the
//! camelCase field names are the persisted wire format.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisMethod {
    /// Weighted combination of the external reviewer and the rule-based pass.
    Hybrid,
    /// External reviewer unavailable; rule-based percentage stands alone.
    RuleBased,
    /// Rule-based pass produced no checks; external percentage stands alone.
    AiBased,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TextQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RuleTally {
    pub passed: u32,
    pub total: u32,
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalTally {
    pub available: bool,
    pub passed: u32,
    pub total: u32,
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceDetails {
    pub rule_based_checks: RuleTally,
    pub ai_checks: ExternalTally,
    pub weighted_calculation: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub compliant: bool,
    pub compliance_percentage: f64,
    pub compliance_details: ComplianceDetails,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    pub text_quality: TextQuality,
    /// Leading excerpt of the extracted text (truncated to 500 chars).
    pub text_extracted: String,
    /// Short-circuit or degradation diagnostic (`insufficient_text`,
    /// `document_too_large`, or the external reviewer's error).
    pub error: Option<String>,
    pub analysis_method: AnalysisMethod,
}
