use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Profitability thresholds, in R$ per km, plus the auto-analysis switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdConfig {
    /// At or above this rate a ride is classified good.
    pub good_ride_threshold: f64,
    /// At or above this rate (but below the good threshold) a ride is medium.
    pub medium_ride_threshold: f64,
    /// Declared floor in R$ per minute. Surfaced in the settings panel but
    /// not consulted by classification; see DESIGN.md.
    pub minimum_time_value: f64,
    /// Gates whether synthetic scans run on an interval.
    pub auto_analysis_enabled: bool,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            good_ride_threshold: 2.5,
            medium_ride_threshold: 1.8,
            minimum_time_value: 0.5,
            auto_analysis_enabled: true,
        }
    }
}

impl ThresholdConfig {
    /// Reject threshold pairs the classifier cannot order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.medium_ride_threshold < 0.0 {
            return Err(ConfigError::NegativeThreshold(self.medium_ride_threshold));
        }
        if self.good_ride_threshold < 0.0 {
            return Err(ConfigError::NegativeThreshold(self.good_ride_threshold));
        }
        if self.good_ride_threshold <= self.medium_ride_threshold {
            return Err(ConfigError::ThresholdOrder {
                good: self.good_ride_threshold,
                medium: self.medium_ride_threshold,
            });
        }
        Ok(())
    }

    /// Rewrite the two thresholds from a preset, leaving everything else.
    pub fn apply_preset(&mut self, preset: ThresholdPreset) {
        let (good, medium) = preset.thresholds();
        self.good_ride_threshold = good;
        self.medium_ride_threshold = medium;
    }
}

/// Quick configurations offered by the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThresholdPreset {
    Conservative,
    Balanced,
    Aggressive,
}

impl ThresholdPreset {
    pub fn thresholds(self) -> (f64, f64) {
        match self {
            ThresholdPreset::Conservative => (3.0, 2.2),
            ThresholdPreset::Balanced => (2.5, 1.8),
            ThresholdPreset::Aggressive => (2.0, 1.5),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ThresholdPreset::Conservative => "only very good rides",
            ThresholdPreset::Balanced => "balance between volume and quality",
            ThresholdPreset::Aggressive => "accepts more rides",
        }
    }
}
