use tempfile::{tempdir, TempDir};
use tokio::time::{sleep, Duration};

use ridesense::{
    DetectionProfile, MonitoringSettings, RideApp, RideSession, SessionEvent, SettingsStore,
    SimulatedPermissions,
};

fn store(dir: &TempDir) -> SettingsStore {
    SettingsStore::new(dir.path().join("settings.json")).expect("settings store")
}

fn granted_session(dir: &TempDir) -> (RideSession, tokio::sync::mpsc::UnboundedReceiver<SessionEvent>) {
    RideSession::with_probe(
        store(dir),
        Box::new(SimulatedPermissions::always_granted()),
    )
}

#[tokio::test]
async fn simulated_ride_lands_in_history_and_events() {
    let dir = tempdir().expect("tempdir");
    let (session, mut events) = granted_session(&dir);

    let ride = session.simulate_ride(Some(RideApp::Uber)).expect("simulate");
    assert_eq!(ride.offer.app, RideApp::Uber);
    assert!(!ride.offer.auto_detected);

    let recent = session.recent_rides();
    assert_eq!(recent.len(), 1);
    let replayed = &recent[0];
    assert!(
        (replayed.analysis.price_per_km - replayed.offer.price_per_km()).abs() < f64::EPSILON
    );

    match events.try_recv().expect("one event") {
        SessionEvent::RideAnalyzed { offer, analysis } => {
            assert_eq!(offer.app, RideApp::Uber);
            assert!(analysis.efficiency_percent <= 100.0);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn history_keeps_only_the_five_newest() {
    let dir = tempdir().expect("tempdir");
    let (session, _events) = granted_session(&dir);

    for _ in 0..8 {
        session.simulate_ride(None).expect("simulate");
    }

    assert_eq!(session.recent_rides().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn auto_analysis_toggle_drives_the_monitor() {
    let dir = tempdir().expect("tempdir");
    let (session, mut events) = granted_session(&dir);

    // Force deterministic detection so the monitor provably produces rides.
    session
        .settings()
        .update_monitoring(MonitoringSettings {
            enabled_apps: vec![RideApp::NinetyNine],
            scan_interval_ms: Some(1000),
            vibration_enabled: false,
            sound_enabled: false,
            detection: DetectionProfile {
                activity_probability: 1.0,
                offer_probability: 1.0,
                seed: Some(3),
            },
        })
        .expect("update monitoring");

    assert!(session.set_auto_analysis(true).await.expect("enable"));
    assert!(session.monitoring_status().await.is_active);
    assert!(session.settings().analysis().auto_analysis_enabled);

    sleep(Duration::from_millis(2500)).await;

    session.set_auto_analysis(false).await.expect("disable");
    assert!(!session.monitoring_status().await.is_active);
    assert!(!session.settings().analysis().auto_analysis_enabled);

    let mut saw_monitoring_on = false;
    let mut analyzed = 0;
    while let Ok(event) = events.try_recv() {
        match event {
            SessionEvent::MonitoringChanged { active: true } => saw_monitoring_on = true,
            SessionEvent::RideAnalyzed { offer, .. } => {
                assert!(offer.auto_detected);
                assert_eq!(offer.app, RideApp::NinetyNine);
                analyzed += 1;
            }
            _ => {}
        }
    }
    assert!(saw_monitoring_on);
    // Ticks at 0s, 1s and 2s of virtual time.
    assert_eq!(analyzed, 3);

    // No further rides arrive once monitoring is off.
    sleep(Duration::from_millis(5000)).await;
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn monitoring_status_snapshot_counts_the_registry() {
    let dir = tempdir().expect("tempdir");
    let (session, _events) = granted_session(&dir);

    let status = session.monitoring_status().await;
    assert!(!status.is_active);
    assert_eq!(status.total_apps, 5);
    assert!(status.active_apps.is_empty());
}
