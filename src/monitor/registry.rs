use crate::models::RideApp;

/// A tracked transportation app with its simulated activity flag.
#[derive(Debug, Clone)]
pub struct MonitoredApp {
    pub app: RideApp,
    pub package: &'static str,
    pub is_active: bool,
}

/// Fixed-size registry of the apps the scan loop watches. Entries are
/// created once and mutated in place on every tick; they survive monitor
/// restarts and are only dropped at teardown.
#[derive(Debug)]
pub struct AppRegistry {
    apps: Vec<MonitoredApp>,
}

impl AppRegistry {
    pub fn new() -> Self {
        let apps = RideApp::ALL
            .iter()
            .map(|&app| MonitoredApp {
                app,
                package: app.package_id(),
                is_active: false,
            })
            .collect();
        Self { apps }
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut MonitoredApp> {
        self.apps.iter_mut()
    }

    pub fn active_apps(&self) -> Vec<RideApp> {
        self.apps
            .iter()
            .filter(|entry| entry.is_active)
            .map(|entry| entry.app)
            .collect()
    }

    pub fn total(&self) -> usize {
        self.apps.len()
    }
}

impl Default for AppRegistry {
    fn default() -> Self {
        Self::new()
    }
}
