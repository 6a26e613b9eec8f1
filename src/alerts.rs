//! Stubbed device alert actions.
//!
//! A device build would route these through the platform vibration and
//! notification-sound APIs; the simulation only logs the intent.

use log::info;

pub fn trigger_vibration() {
    info!("alert: vibrating device");
}

pub fn play_notification_sound() {
    info!("alert: playing notification sound");
}
