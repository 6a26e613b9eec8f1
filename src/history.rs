use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::analysis::RideAnalysis;
use crate::models::RideOffer;

/// An offer together with its classification, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedRide {
    pub offer: RideOffer,
    pub analysis: RideAnalysis,
}

/// How many recent rides the UI keeps on screen.
const HISTORY_CAPACITY: usize = 5;

/// Bounded list of the most recent analyzed rides, newest first.
#[derive(Debug)]
pub struct RideHistory {
    rides: VecDeque<AnalyzedRide>,
}

impl RideHistory {
    pub fn new() -> Self {
        Self {
            rides: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Push the newest ride, evicting the oldest once the cap is reached.
    pub fn record(&mut self, ride: AnalyzedRide) {
        if self.rides.len() == HISTORY_CAPACITY {
            self.rides.pop_back();
        }
        self.rides.push_front(ride);
    }

    pub fn recent(&self) -> Vec<AnalyzedRide> {
        self.rides.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rides.is_empty()
    }
}

impl Default for RideHistory {
    fn default() -> Self {
        Self::new()
    }
}
