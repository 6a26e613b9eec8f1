use std::sync::{Arc, Mutex, RwLock};

use anyhow::{Context, Result};
use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::loop_worker::scan_loop;
use super::permissions::{Permission, PermissionProbe, SimulatedPermissions};
use super::registry::AppRegistry;
use super::types::{MonitorCallbacks, MonitoringSettings, MonitoringStatus};

/// Timer-driven synthetic monitor over the fixed app registry.
///
/// Two states, stopped (no task handle) and running. Both lifecycle
/// operations are idempotent.
pub struct RideMonitor {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
    registry: Arc<Mutex<AppRegistry>>,
    callbacks: Arc<RwLock<MonitorCallbacks>>,
    permissions: Box<dyn PermissionProbe>,
}

impl RideMonitor {
    pub fn new() -> Self {
        Self::with_probe(Box::new(SimulatedPermissions::new()))
    }

    /// Build a monitor with a specific permission probe; device builds hand
    /// the real platform query in here.
    pub fn with_probe(permissions: Box<dyn PermissionProbe>) -> Self {
        Self {
            handle: None,
            cancel_token: None,
            registry: Arc::new(Mutex::new(AppRegistry::new())),
            callbacks: Arc::new(RwLock::new(MonitorCallbacks::default())),
            permissions,
        }
    }

    /// Install the full callback set, dropping whatever was there before.
    pub fn set_callbacks(&self, callbacks: MonitorCallbacks) {
        *self.callbacks.write().unwrap() = callbacks;
    }

    /// Begin the repeating scan. Returns false (and reports the missing
    /// permission) when the permission check fails; true when the scan is
    /// running, including when it already was.
    pub fn start_monitoring(&mut self, settings: MonitoringSettings) -> bool {
        if !self.permissions.all_granted() {
            info!("monitor: insufficient permissions, not starting");
            if let Some(callback) = &self.callbacks.read().unwrap().on_permission_required {
                callback(Permission::Accessibility);
            }
            return false;
        }

        if self.handle.is_some() {
            info!("monitor: already running");
            return true;
        }

        info!("monitor: starting scan loop");
        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(scan_loop(
            settings,
            Arc::clone(&self.registry),
            Arc::clone(&self.callbacks),
            cancel_token.clone(),
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        true
    }

    /// Stop the scan. Safe to call repeatedly and from teardown paths; once
    /// this returns no further callback will be invoked.
    pub async fn stop_monitoring(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle.await.context("scan loop task failed to join")?;
            info!("monitor: stopped");
        }

        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn monitoring_status(&self) -> MonitoringStatus {
        let registry = self.registry.lock().unwrap();
        MonitoringStatus {
            is_active: self.handle.is_some(),
            active_apps: registry.active_apps(),
            total_apps: registry.total(),
        }
    }
}

impl Default for RideMonitor {
    fn default() -> Self {
        Self::new()
    }
}
