use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::analysis::{ThresholdConfig, ThresholdPreset};
use crate::monitor::MonitoringSettings;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default)]
    pub analysis: ThresholdConfig,
    #[serde(default)]
    pub monitoring: MonitoringSettings,
}

/// JSON-backed store for the session's configuration. Ride data is never
/// written here; only what the settings panel edits.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn analysis(&self) -> ThresholdConfig {
        self.data.read().unwrap().analysis.clone()
    }

    pub fn monitoring(&self) -> MonitoringSettings {
        self.data.read().unwrap().monitoring.clone()
    }

    /// Replace the threshold configuration after validating it.
    pub fn update_analysis(&self, analysis: ThresholdConfig) -> Result<()> {
        analysis.validate()?;
        let mut guard = self.data.write().unwrap();
        guard.analysis = analysis;
        self.persist(&guard)
    }

    pub fn update_monitoring(&self, monitoring: MonitoringSettings) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        guard.monitoring = monitoring;
        self.persist(&guard)
    }

    pub fn apply_preset(&self, preset: ThresholdPreset) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        guard.analysis.apply_preset(preset);
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
