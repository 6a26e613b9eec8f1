use std::sync::{Arc, Mutex, RwLock};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::alerts;
use crate::generator::RideGenerator;
use crate::models::RideApp;

use super::registry::AppRegistry;
use super::types::{MonitorCallbacks, MonitoringSettings, DEFAULT_SCAN_INTERVAL_MS};

/// Repeating scan over the monitored apps; runs until cancelled. The tick
/// body is synchronous, so each tick completes before the next fires and
/// cancellation never interleaves with a half-dispatched scan.
pub(super) async fn scan_loop(
    settings: MonitoringSettings,
    registry: Arc<Mutex<AppRegistry>>,
    callbacks: Arc<RwLock<MonitorCallbacks>>,
    cancel_token: CancellationToken,
) {
    let interval_ms = settings
        .scan_interval_ms
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_SCAN_INTERVAL_MS);
    let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut rng = match settings.detection.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    // The generator runs on its own stream, offset from the detection seed.
    let mut generator =
        RideGenerator::from_seed_opt(settings.detection.seed.map(|seed| seed.wrapping_add(1)));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                scan_tick(&settings, &registry, &callbacks, &mut rng, &mut generator);
            }
            _ = cancel_token.cancelled() => {
                info!("scan loop shutting down");
                break;
            }
        }
    }
}

fn scan_tick(
    settings: &MonitoringSettings,
    registry: &Mutex<AppRegistry>,
    callbacks: &RwLock<MonitorCallbacks>,
    rng: &mut StdRng,
    generator: &mut RideGenerator,
) {
    let activity_probability = settings.detection.activity_probability.clamp(0.0, 1.0);
    let offer_probability = settings.detection.offer_probability.clamp(0.0, 1.0);

    let mut state_changes: Vec<(RideApp, bool)> = Vec::new();
    let mut active_apps: Vec<RideApp> = Vec::new();

    {
        let mut registry = registry.lock().unwrap();
        for entry in registry.entries_mut() {
            if !settings.enabled_apps.contains(&entry.app) {
                continue;
            }

            let is_active = rng.gen_bool(activity_probability);
            if is_active != entry.is_active {
                entry.is_active = is_active;
                state_changes.push((entry.app, is_active));
            }

            if is_active {
                active_apps.push(entry.app);
            }
        }
    }

    let callbacks = callbacks.read().unwrap();

    for (app, is_active) in state_changes {
        debug!(
            "app {} is now {}",
            app,
            if is_active { "active" } else { "inactive" }
        );
        if let Some(callback) = &callbacks.on_app_state_change {
            callback(app, is_active);
        }
    }

    for app in active_apps {
        if !rng.gen_bool(offer_probability) {
            continue;
        }

        let offer = generator.detected_offer(app);
        info!(
            "ride detected on {}: {:.1}km for R$ {:.2}",
            app, offer.distance_km, offer.total_value
        );
        if let Some(callback) = &callbacks.on_ride_detected {
            callback(offer);
        }

        if settings.vibration_enabled {
            alerts::trigger_vibration();
        }
        if settings.sound_enabled {
            alerts::play_notification_sound();
        }
    }
}
