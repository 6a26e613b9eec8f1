use serde::{Deserialize, Serialize};

use crate::models::{RideApp, RideOffer};

use super::permissions::Permission;

/// Scan cadence used when the settings leave the interval unset.
pub const DEFAULT_SCAN_INTERVAL_MS: u64 = 2000;

/// Tunable probabilities behind the simulated detection draws.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionProfile {
    /// Chance per tick that an enabled app is in the foreground.
    pub activity_probability: f64,
    /// Chance that an active app is currently showing a ride offer.
    pub offer_probability: f64,
    /// Seed for the scan loop RNG; OS entropy when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for DetectionProfile {
    fn default() -> Self {
        Self {
            activity_probability: 0.2,
            offer_probability: 0.3,
            seed: None,
        }
    }
}

/// Host-facing monitor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringSettings {
    pub enabled_apps: Vec<RideApp>,
    /// Milliseconds between scan ticks; zero or `None` falls back to
    /// `DEFAULT_SCAN_INTERVAL_MS`.
    pub scan_interval_ms: Option<u64>,
    pub vibration_enabled: bool,
    pub sound_enabled: bool,
    #[serde(default)]
    pub detection: DetectionProfile,
}

impl Default for MonitoringSettings {
    fn default() -> Self {
        Self {
            enabled_apps: RideApp::ALL.to_vec(),
            scan_interval_ms: None,
            vibration_enabled: true,
            sound_enabled: false,
            detection: DetectionProfile::default(),
        }
    }
}

/// Point-in-time view of the monitor, for status displays.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringStatus {
    pub is_active: bool,
    pub active_apps: Vec<RideApp>,
    pub total_apps: usize,
}

/// Callback set the host installs. Replaced wholesale by `set_callbacks`:
/// single consumer, last writer wins.
#[derive(Default)]
pub struct MonitorCallbacks {
    pub on_ride_detected: Option<Box<dyn Fn(RideOffer) + Send + Sync>>,
    pub on_app_state_change: Option<Box<dyn Fn(RideApp, bool) + Send + Sync>>,
    pub on_permission_required: Option<Box<dyn Fn(Permission) + Send + Sync>>,
}
