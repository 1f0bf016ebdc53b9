use serde::{Deserialize, Serialize};

/// Numeric state shared by the player components.
///
/// Writers per field:
/// - `playback_rate`: the adjustment router, and the transient speed
///   controller on its restore path
/// - `subtitle_delay_ms`: the adjustment router and the host UI
/// - `volume`: the adjustment router
///
/// Everything runs on one event loop, so these writes never interleave.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionState {
    pub playback_rate: f64,
    /// Signed; negative shows subtitles earlier
    pub subtitle_delay_ms: i64,
    /// 0..=100
    pub volume: u8,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            playback_rate: 1.0,
            subtitle_delay_ms: 0,
            volume: 100,
        }
    }
}
