//! Core engine for a ride-offer profitability assistant.
//!
//! Everything "detected" here is fabricated: the monitor rolls dice instead
//! of reading screens, and the permission check is a stochastic stand-in
//! for the platform query. Only the sensing is fake: the lifecycle and the
//! analysis pipeline behave like the real thing. Seams for a device build
//! are the [`monitor::PermissionProbe`] trait and the seedable RNGs behind
//! the generator and detection draws.

pub mod alerts;
pub mod analysis;
pub mod error;
pub mod generator;
pub mod history;
pub mod models;
pub mod monitor;
pub mod session;
pub mod settings;

pub use analysis::{analyze_ride, RideAnalysis, ThresholdConfig, ThresholdPreset, Tier};
pub use error::{AnalysisError, ConfigError};
pub use generator::RideGenerator;
pub use history::{AnalyzedRide, RideHistory};
pub use models::{RideApp, RideOffer};
pub use monitor::{
    DetectionProfile, MonitorCallbacks, MonitoringSettings, MonitoringStatus, Permission,
    PermissionProbe, RideMonitor, SimulatedPermissions, DEFAULT_SCAN_INTERVAL_MS,
};
pub use session::{RideSession, SessionEvent};
pub use settings::SettingsStore;
