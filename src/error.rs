use thiserror::Error;

/// Validation failures for the user-tunable profitability thresholds.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("good ride threshold (R$ {good}/km) must be above the medium threshold (R$ {medium}/km)")]
    ThresholdOrder { good: f64, medium: f64 },

    #[error("thresholds must not be negative (got {0})")]
    NegativeThreshold(f64),
}

/// Failures while deriving metrics from a ride offer.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("estimated time is zero, cannot derive value per minute")]
    ZeroEstimatedTime,
}
