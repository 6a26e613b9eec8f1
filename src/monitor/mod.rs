pub mod controller;
mod loop_worker;
pub mod permissions;
pub mod registry;
mod types;

pub use controller::RideMonitor;
pub use permissions::{Permission, PermissionProbe, SimulatedPermissions};
pub use registry::{AppRegistry, MonitoredApp};
pub use types::{
    DetectionProfile, MonitorCallbacks, MonitoringSettings, MonitoringStatus,
    DEFAULT_SCAN_INTERVAL_MS,
};
