use std::sync::{Arc, Mutex};

use anyhow::Result;
use log::{error, info};
use serde::Serialize;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex as AsyncMutex;

use crate::analysis::{analyze_ride, RideAnalysis};
use crate::error::AnalysisError;
use crate::generator::RideGenerator;
use crate::history::{AnalyzedRide, RideHistory};
use crate::models::{RideApp, RideOffer};
use crate::monitor::{
    MonitorCallbacks, MonitoringStatus, Permission, PermissionProbe, RideMonitor,
};
use crate::settings::SettingsStore;

/// Events the session pushes to the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "type")]
pub enum SessionEvent {
    RideAnalyzed {
        offer: RideOffer,
        analysis: RideAnalysis,
    },
    AppStateChanged {
        app: RideApp,
        is_active: bool,
    },
    PermissionRequired {
        permission: Permission,
    },
    MonitoringChanged {
        active: bool,
    },
}

/// Owns the monitor, generator, history, and settings for one UI session.
/// Construct it when the shell comes up, drop it at teardown; nothing here
/// outlives the session.
pub struct RideSession {
    settings: Arc<SettingsStore>,
    monitor: AsyncMutex<RideMonitor>,
    generator: Mutex<RideGenerator>,
    history: Arc<Mutex<RideHistory>>,
    events: UnboundedSender<SessionEvent>,
}

impl RideSession {
    pub fn new(settings: SettingsStore) -> (Self, UnboundedReceiver<SessionEvent>) {
        Self::build(settings, RideMonitor::new())
    }

    /// Session with a specific permission probe, for tests and for hosts
    /// that already know the platform permission state.
    pub fn with_probe(
        settings: SettingsStore,
        probe: Box<dyn PermissionProbe>,
    ) -> (Self, UnboundedReceiver<SessionEvent>) {
        Self::build(settings, RideMonitor::with_probe(probe))
    }

    fn build(
        settings: SettingsStore,
        monitor: RideMonitor,
    ) -> (Self, UnboundedReceiver<SessionEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let settings = Arc::new(settings);
        let history = Arc::new(Mutex::new(RideHistory::new()));

        monitor.set_callbacks(wire_callbacks(
            Arc::clone(&settings),
            Arc::clone(&history),
            events.clone(),
        ));

        let session = Self {
            settings,
            monitor: AsyncMutex::new(monitor),
            generator: Mutex::new(RideGenerator::new()),
            history,
            events,
        };

        (session, receiver)
    }

    /// Run one manual simulation through the same analyze-record-emit path
    /// automatic detection uses.
    pub fn simulate_ride(&self, app: Option<RideApp>) -> Result<AnalyzedRide, AnalysisError> {
        let offer = self.generator.lock().unwrap().scenario_offer(app);
        dispatch_offer(&self.settings, &self.history, &self.events, offer)
    }

    /// Start automatic monitoring with the stored settings. Returns false
    /// when the permission check fails.
    pub async fn start_monitoring(&self) -> bool {
        let started = self
            .monitor
            .lock()
            .await
            .start_monitoring(self.settings.monitoring());
        if started {
            let _ = self.events.send(SessionEvent::MonitoringChanged { active: true });
        }
        started
    }

    pub async fn stop_monitoring(&self) -> Result<()> {
        self.monitor.lock().await.stop_monitoring().await?;
        let _ = self
            .events
            .send(SessionEvent::MonitoringChanged { active: false });
        Ok(())
    }

    /// Toggle automatic analysis: persists the flag and brings the monitor
    /// in line with it. Returns whether monitoring is running afterwards.
    pub async fn set_auto_analysis(&self, enabled: bool) -> Result<bool> {
        let mut analysis = self.settings.analysis();
        analysis.auto_analysis_enabled = enabled;
        self.settings.update_analysis(analysis)?;

        if enabled {
            Ok(self.start_monitoring().await)
        } else {
            self.stop_monitoring().await?;
            Ok(false)
        }
    }

    pub async fn monitoring_status(&self) -> MonitoringStatus {
        self.monitor.lock().await.monitoring_status()
    }

    pub fn recent_rides(&self) -> Vec<AnalyzedRide> {
        self.history.lock().unwrap().recent()
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }
}

fn wire_callbacks(
    settings: Arc<SettingsStore>,
    history: Arc<Mutex<RideHistory>>,
    events: UnboundedSender<SessionEvent>,
) -> MonitorCallbacks {
    let ride_events = events.clone();
    let state_events = events.clone();
    let permission_events = events;

    MonitorCallbacks {
        on_ride_detected: Some(Box::new(move |offer| {
            if let Err(err) = dispatch_offer(&settings, &history, &ride_events, offer) {
                error!("dropping detected offer: {err}");
            }
        })),
        on_app_state_change: Some(Box::new(move |app, is_active| {
            let _ = state_events.send(SessionEvent::AppStateChanged { app, is_active });
        })),
        on_permission_required: Some(Box::new(move |permission| {
            let _ = permission_events.send(SessionEvent::PermissionRequired { permission });
        })),
    }
}

/// Shared tail of both detection paths.
fn dispatch_offer(
    settings: &SettingsStore,
    history: &Mutex<RideHistory>,
    events: &UnboundedSender<SessionEvent>,
    offer: RideOffer,
) -> Result<AnalyzedRide, AnalysisError> {
    let analysis = analyze_ride(&offer, &settings.analysis())?;
    info!(
        "{} - {}: {}",
        offer.app,
        analysis.tier.label(),
        analysis.summary(&offer)
    );

    let ride = AnalyzedRide {
        offer: offer.clone(),
        analysis: analysis.clone(),
    };
    history.lock().unwrap().record(ride.clone());
    let _ = events.send(SessionEvent::RideAnalyzed { offer, analysis });

    Ok(ride)
}
