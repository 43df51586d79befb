use crate::server::{error::Error, service::compliance::ComplianceConfig};

pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub ocr_service_url: String,
    pub reviewer_service_url: String,
    /// Timeout applied to both external collaborators, in seconds.
    pub external_timeout_secs: u64,
    pub compliance: ComplianceConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self {
            database_url: require("DATABASE_URL")?,
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            ocr_service_url: require("OCR_SERVICE_URL")?,
            reviewer_service_url: require("REVIEWER_SERVICE_URL")?,
            external_timeout_secs: optional_parsed("EXTERNAL_TIMEOUT_SECS", 10)?,
            compliance: compliance_from_env()?,
        })
    }
}

fn require(var: &str) -> Result<String, Error> {
    std::env::var(var).map_err(|_| Error::MissingEnvVar(var.to_string()))
}

fn optional_parsed<T: std::str::FromStr>(var: &str, default: T) -> Result<T, Error>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(value) => value.parse().map_err(|e| Error::InvalidEnvValue {
            var: var.to_string(),
            reason: format!("{}", e),
        }),
        Err(_) => Ok(default),
    }
}

/// The scoring weights and threshold are a per-jurisdiction configuration
/// surface; unset variables fall back to the defaults.
fn compliance_from_env() -> Result<ComplianceConfig, Error> {
    let defaults = ComplianceConfig::default();

    Ok(ComplianceConfig {
        ai_weight: optional_parsed("COMPLIANCE_AI_WEIGHT", defaults.ai_weight)?,
        rule_weight: optional_parsed("COMPLIANCE_RULE_WEIGHT", defaults.rule_weight)?,
        compliant_threshold: optional_parsed(
            "COMPLIANCE_THRESHOLD",
            defaults.compliant_threshold,
        )?,
        assumed_ai_checks: optional_parsed(
            "COMPLIANCE_ASSUMED_AI_CHECKS",
            defaults.assumed_ai_checks,
        )?,
    })
}
