use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of transportation apps the monitor knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RideApp {
    #[serde(rename = "99")]
    NinetyNine,
    Uber,
    Indriver,
    UrbanoNorte,
    #[serde(rename = "ITZ Move")]
    ItzMove,
}

impl RideApp {
    pub const ALL: [RideApp; 5] = [
        RideApp::NinetyNine,
        RideApp::Uber,
        RideApp::Indriver,
        RideApp::UrbanoNorte,
        RideApp::ItzMove,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RideApp::NinetyNine => "99",
            RideApp::Uber => "Uber",
            RideApp::Indriver => "Indriver",
            RideApp::UrbanoNorte => "UrbanoNorte",
            RideApp::ItzMove => "ITZ Move",
        }
    }

    /// Android package identifier, kept around for status displays.
    pub fn package_id(&self) -> &'static str {
        match self {
            RideApp::NinetyNine => "com.taxis99",
            RideApp::Uber => "com.ubercab",
            RideApp::Indriver => "sinet.startup.inDriver",
            RideApp::UrbanoNorte => "com.urbanonorte.app",
            RideApp::ItzMove => "com.itzmove.app",
        }
    }
}

impl fmt::Display for RideApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single fare proposal as extracted (here: fabricated) from an app.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideOffer {
    pub app: RideApp,
    pub distance_km: f64,
    pub total_value: f64,
    pub estimated_time_minutes: u32,
    pub location: String,
    pub captured_at: DateTime<Utc>,
    /// True when the offer came out of the scan loop rather than a manual
    /// simulation.
    pub auto_detected: bool,
    /// Dynamic-fare multiplier already applied to `total_value`, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surge_multiplier: Option<f64>,
}

impl RideOffer {
    /// R$ per km. Always derived from the stored value and distance so the
    /// rate can never drift from its inputs.
    pub fn price_per_km(&self) -> f64 {
        self.total_value / self.distance_km
    }
}
