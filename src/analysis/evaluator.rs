use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::models::RideOffer;

use super::config::ThresholdConfig;

/// Three-way profitability classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Good,
    Medium,
    Bad,
}

impl Tier {
    fn classify(price_per_km: f64, config: &ThresholdConfig) -> Tier {
        if price_per_km >= config.good_ride_threshold {
            Tier::Good
        } else if price_per_km >= config.medium_ride_threshold {
            Tier::Medium
        } else {
            Tier::Bad
        }
    }

    /// Short verdict for toasts and cards.
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Good => "Ótima corrida!",
            Tier::Medium => "Corrida mediana",
            Tier::Bad => "Corrida não recomendada",
        }
    }

    /// Traffic-light color the presentation layer paints with.
    pub fn color(&self) -> &'static str {
        match self {
            Tier::Good => "green",
            Tier::Medium => "yellow",
            Tier::Bad => "red",
        }
    }
}

/// Result of evaluating one offer against the configured thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideAnalysis {
    pub tier: Tier,
    pub price_per_km: f64,
    pub value_per_minute: f64,
    /// How close the rate comes to the good threshold, capped at 100.
    pub efficiency_percent: f64,
}

impl RideAnalysis {
    /// One-line summary for the notification toast.
    pub fn summary(&self, offer: &RideOffer) -> String {
        format!(
            "R$ {:.2}/km • {:.1}km • {}min • Total: R$ {:.2}",
            self.price_per_km, offer.distance_km, offer.estimated_time_minutes, offer.total_value
        )
    }
}

/// Evaluate a ride offer. Pure: no side effects, no clock, no randomness.
pub fn analyze_ride(
    offer: &RideOffer,
    config: &ThresholdConfig,
) -> Result<RideAnalysis, AnalysisError> {
    if offer.estimated_time_minutes == 0 {
        return Err(AnalysisError::ZeroEstimatedTime);
    }

    let price_per_km = offer.price_per_km();
    let tier = Tier::classify(price_per_km, config);
    let value_per_minute = offer.total_value / f64::from(offer.estimated_time_minutes);
    let efficiency_percent = (price_per_km / config.good_ride_threshold * 100.0).min(100.0);

    Ok(RideAnalysis {
        tier,
        price_per_km,
        value_per_minute,
        efficiency_percent,
    })
}
