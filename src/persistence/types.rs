use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last known playback state of one video
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SavedPosition {
    pub position_seconds: f64,
    pub rate: f64,
    pub timestamp: DateTime<Utc>,
}

impl SavedPosition {
    pub fn now(position_seconds: f64, rate: f64) -> Self {
        Self {
            position_seconds,
            rate,
            timestamp: Utc::now(),
        }
    }
}
