use std::fmt;
use std::sync::Mutex;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Platform permissions the monitor depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Permission {
    Accessibility,
    ScreenOverlay,
    Notifications,
}

impl Permission {
    pub const REQUIRED: [Permission; 3] = [
        Permission::Accessibility,
        Permission::ScreenOverlay,
        Permission::Notifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Accessibility => "accessibility",
            Permission::ScreenOverlay => "screenOverlay",
            Permission::Notifications => "notifications",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seam for platform permission queries. The simulation answers randomly; a
/// device build would ask the OS.
pub trait PermissionProbe: Send + Sync {
    fn is_granted(&self, permission: Permission) -> bool;

    /// True only when every required permission is granted. Nothing is
    /// memoized, each permission is re-queried on every call.
    fn all_granted(&self) -> bool {
        Permission::REQUIRED.iter().all(|permission| {
            let granted = self.is_granted(*permission);
            debug!("checking permission {permission}: {granted}");
            granted
        })
    }
}

/// Stochastic stand-in for the real permission state.
pub struct SimulatedPermissions {
    grant_probability: f64,
    rng: Mutex<StdRng>,
}

impl SimulatedPermissions {
    const DEFAULT_GRANT_PROBABILITY: f64 = 0.7;

    pub fn new() -> Self {
        Self {
            grant_probability: Self::DEFAULT_GRANT_PROBABILITY,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            grant_probability: Self::DEFAULT_GRANT_PROBABILITY,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Probe that grants everything; for tests and permissive hosts.
    pub fn always_granted() -> Self {
        Self {
            grant_probability: 1.0,
            rng: Mutex::new(StdRng::seed_from_u64(0)),
        }
    }

    /// Probe that denies everything.
    pub fn always_denied() -> Self {
        Self {
            grant_probability: 0.0,
            rng: Mutex::new(StdRng::seed_from_u64(0)),
        }
    }
}

impl Default for SimulatedPermissions {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionProbe for SimulatedPermissions {
    fn is_granted(&self, _permission: Permission) -> bool {
        self.rng.lock().unwrap().gen_bool(self.grant_probability)
    }
}
