use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::time::{sleep, Duration};

use ridesense::{
    DetectionProfile, MonitorCallbacks, MonitoringSettings, Permission, RideApp, RideMonitor,
    SimulatedPermissions,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Settings that make every enabled app active and every active app yield
/// an offer, so callback counts follow the tick count exactly.
fn forced_settings(apps: Vec<RideApp>) -> MonitoringSettings {
    MonitoringSettings {
        enabled_apps: apps,
        scan_interval_ms: Some(2000),
        vibration_enabled: false,
        sound_enabled: false,
        detection: DetectionProfile {
            activity_probability: 1.0,
            offer_probability: 1.0,
            seed: Some(7),
        },
    }
}

fn counting_callbacks(detections: Arc<AtomicUsize>) -> MonitorCallbacks {
    MonitorCallbacks {
        on_ride_detected: Some(Box::new(move |_offer| {
            detections.fetch_add(1, Ordering::SeqCst);
        })),
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn denied_permissions_fail_start_and_report_accessibility() {
    init_logging();
    let mut monitor = RideMonitor::with_probe(Box::new(SimulatedPermissions::always_denied()));

    let permission_requests: Arc<Mutex<Vec<Permission>>> = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&permission_requests);
    monitor.set_callbacks(MonitorCallbacks {
        on_permission_required: Some(Box::new(move |permission| {
            recorded.lock().unwrap().push(permission);
        })),
        ..Default::default()
    });

    assert!(!monitor.start_monitoring(forced_settings(vec![RideApp::Uber])));
    assert!(!monitor.monitoring_status().is_active);
    assert!(!monitor.is_running());

    let requests = permission_requests.lock().unwrap();
    assert_eq!(requests.as_slice(), &[Permission::Accessibility]);
}

#[tokio::test(start_paused = true)]
async fn double_start_keeps_a_single_scan_timer() {
    init_logging();
    let mut monitor = RideMonitor::with_probe(Box::new(SimulatedPermissions::always_granted()));

    let detections = Arc::new(AtomicUsize::new(0));
    monitor.set_callbacks(counting_callbacks(Arc::clone(&detections)));

    assert!(monitor.start_monitoring(forced_settings(vec![RideApp::Uber])));
    assert!(monitor.start_monitoring(forced_settings(vec![RideApp::Uber])));

    // Ticks land at 0s, 2s, 4s, 6s and 8s of virtual time; a duplicated
    // timer would double the count.
    sleep(Duration::from_millis(9000)).await;
    assert_eq!(detections.load(Ordering::SeqCst), 5);

    monitor.stop_monitoring().await.expect("stop");
}

#[tokio::test(start_paused = true)]
async fn stop_silences_all_callbacks() {
    init_logging();
    let mut monitor = RideMonitor::with_probe(Box::new(SimulatedPermissions::always_granted()));

    let detections = Arc::new(AtomicUsize::new(0));
    monitor.set_callbacks(counting_callbacks(Arc::clone(&detections)));

    assert!(monitor.start_monitoring(forced_settings(vec![
        RideApp::Uber,
        RideApp::NinetyNine
    ])));
    sleep(Duration::from_millis(5000)).await;

    monitor.stop_monitoring().await.expect("stop");
    let after_stop = detections.load(Ordering::SeqCst);
    assert!(after_stop > 0);

    sleep(Duration::from_millis(10_000)).await;
    assert_eq!(detections.load(Ordering::SeqCst), after_stop);

    // Stopping again is a no-op.
    monitor.stop_monitoring().await.expect("stop twice");
}

#[tokio::test(start_paused = true)]
async fn status_reports_active_apps_after_a_tick() {
    init_logging();
    let mut monitor = RideMonitor::with_probe(Box::new(SimulatedPermissions::always_granted()));

    let enabled = vec![RideApp::Uber, RideApp::Indriver];
    assert!(monitor.start_monitoring(forced_settings(enabled.clone())));
    sleep(Duration::from_millis(100)).await;

    let status = monitor.monitoring_status();
    assert!(status.is_active);
    assert_eq!(status.total_apps, 5);
    assert_eq!(status.active_apps, enabled);

    monitor.stop_monitoring().await.expect("stop");
    assert!(!monitor.monitoring_status().is_active);
}

#[tokio::test(start_paused = true)]
async fn set_callbacks_replaces_the_previous_consumer() {
    init_logging();
    let mut monitor = RideMonitor::with_probe(Box::new(SimulatedPermissions::always_granted()));

    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    monitor.set_callbacks(counting_callbacks(Arc::clone(&first)));
    monitor.set_callbacks(counting_callbacks(Arc::clone(&second)));

    assert!(monitor.start_monitoring(forced_settings(vec![RideApp::Uber])));
    sleep(Duration::from_millis(100)).await;
    monitor.stop_monitoring().await.expect("stop");

    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert!(second.load(Ordering::SeqCst) > 0);
}

#[tokio::test(start_paused = true)]
async fn unset_interval_falls_back_to_two_seconds() {
    init_logging();
    let mut monitor = RideMonitor::with_probe(Box::new(SimulatedPermissions::always_granted()));

    let detections = Arc::new(AtomicUsize::new(0));
    monitor.set_callbacks(counting_callbacks(Arc::clone(&detections)));

    let mut settings = forced_settings(vec![RideApp::Uber]);
    settings.scan_interval_ms = None;
    assert!(monitor.start_monitoring(settings));

    // Only the immediate first tick fits inside one second.
    sleep(Duration::from_millis(1000)).await;
    assert_eq!(detections.load(Ordering::SeqCst), 1);

    // The next tick arrives at the 2s default cadence.
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(detections.load(Ordering::SeqCst), 2);

    monitor.stop_monitoring().await.expect("stop");
}
