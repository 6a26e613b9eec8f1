use chrono::Utc;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{RideApp, RideOffer};

/// Pickup areas used when fabricating manual-simulation offers.
const LOCATIONS: [&str; 6] = [
    "Centro - São Francisco do Sul",
    "Praia de Ubatuba - São Francisco do Sul",
    "Vila da Glória - São Francisco do Sul",
    "Balneário Barra do Sul",
    "Joinville - Centro",
    "Araquari - Centro",
];

/// Area reported for offers picked up by the scan loop.
const DETECTED_LOCATION: &str = "São Francisco do Sul - SC";

/// Fixed fare scenarios for manual simulation:
/// (distance km, base price, surge multiplier).
const SCENARIOS: [(f64, f64, f64); 5] = [
    (2.5, 12.0, 1.0),
    (8.2, 25.0, 1.0),
    (15.6, 28.0, 1.0),
    (4.1, 18.0, 1.5),
    (6.7, 35.0, 1.8),
];

/// Single source of fabricated ride offers, shared by the scan loop and the
/// manual simulator. Seed it for deterministic output.
pub struct RideGenerator {
    rng: StdRng,
}

impl RideGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }

    /// Fabricate the offer a screen scan would have extracted from `app`.
    pub fn detected_offer(&mut self, app: RideApp) -> RideOffer {
        let distance_km: f64 = self.rng.gen_range(2.0..17.0);
        let total_value: f64 = self.rng.gen_range(10.0..35.0);
        let estimated_time_minutes =
            (distance_km * 3.0 + self.rng.gen_range::<f64, _>(0.0..10.0)).floor() as u32;

        RideOffer {
            app,
            distance_km,
            total_value,
            estimated_time_minutes,
            location: DETECTED_LOCATION.to_string(),
            captured_at: Utc::now(),
            auto_detected: true,
            surge_multiplier: None,
        }
    }

    /// Fabricate a manual-simulation offer from one of the fixed scenarios.
    /// A `None` app picks one of the five at random.
    pub fn scenario_offer(&mut self, app: Option<RideApp>) -> RideOffer {
        let app = app.unwrap_or_else(|| self.pick_app());
        let (distance_km, base_price, multiplier) =
            SCENARIOS[self.rng.gen_range(0..SCENARIOS.len())];
        let total_value = base_price * multiplier;
        let estimated_time_minutes =
            (distance_km * 2.5 + self.rng.gen_range(0.0..15.0) + 5.0).floor() as u32;
        let location = LOCATIONS[self.rng.gen_range(0..LOCATIONS.len())].to_string();

        debug!(
            "simulated {} offer: {:.1}km for R$ {:.2}",
            app, distance_km, total_value
        );

        RideOffer {
            app,
            distance_km,
            total_value,
            estimated_time_minutes,
            location,
            captured_at: Utc::now(),
            auto_detected: false,
            surge_multiplier: (multiplier > 1.0).then_some(multiplier),
        }
    }

    fn pick_app(&mut self) -> RideApp {
        RideApp::ALL[self.rng.gen_range(0..RideApp::ALL.len())]
    }
}

impl Default for RideGenerator {
    fn default() -> Self {
        Self::new()
    }
}
