use serde::Serialize;

/// Phase of a hold gesture on the hold key
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedState {
    Idle,
    /// Key is down, the disambiguation timer has not decided yet
    Pending,
    /// Temporary rate is applied
    Active,
}

/// Outbound signals for the host UI
#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum PlayerNotice {
    /// Show or hide the temporary speed indicator
    SpeedIndicator { visible: bool, rate: f64 },
    TemporaryRateSelected(f64),
    PlayPauseToggled,
    FullscreenToggled,
    RateChanged(f64),
    DelayChanged(i64),
    VolumeChanged(u8),
    Seeked(f64),
    PositionRestored(f64),
}

/// A bounded change requested by a single key press
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    Rate(f64),
    DelayMs(i64),
    Volume(i16),
    /// Mute sets the volume rather than stepping it
    SetVolume(u8),
    SeekSecs(f64),
}
