use super::input::Key;
use super::media::MediaElement;
use super::session::SessionState;
use super::types::{Adjustment, PlayerNotice};
use crate::config::PlayerConfig;
use log::debug;

/// Add `step` to `current`, round to hundredths so repeated 0.1 steps do not
/// drift, then clamp into `[min, max]`. Inverted bounds never panic: `max` wins.
pub fn step_rate(current: f64, step: f64, min: f64, max: f64) -> f64 {
    let target = ((current + step) * 100.0).round() / 100.0;
    let clamped = target.max(min).min(max);
    if clamped != target {
        debug!("Rate step {:+} from {} clamped to {}", step, current, clamped);
    }
    clamped
}

/// Subtitle delay is unbounded; saturate only at the integer limits.
pub fn step_delay(current: i64, step: i64) -> i64 {
    current.saturating_add(step)
}

pub fn step_volume(current: u8, step: i16) -> u8 {
    (current as i16 + step).clamp(0, 100) as u8
}

/// Relative seek clamped into `[0, duration]`
pub fn seek_target(position: f64, step: f64, duration: f64) -> f64 {
    (position + step).clamp(0.0, duration.max(0.0))
}

/// Maps discrete key presses to bounded changes of rate, delay, volume and
/// position. Holds only the step sizes and bounds from the configuration.
#[derive(Debug, Clone)]
pub struct AdjustmentRouter {
    min_rate: f64,
    max_rate: f64,
    seek_step: f64,
    volume_step: i16,
}

impl AdjustmentRouter {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            min_rate: config.min_rate,
            max_rate: config.max_rate,
            seek_step: config.seek_step_secs,
            volume_step: config.volume_step as i16,
        }
    }

    /// The adjustment bound to `key`, if any
    pub fn route(&self, key: Key) -> Option<Adjustment> {
        let adjustment = match key {
            Key::Equal | Key::NumpadAdd => Adjustment::Rate(0.5),
            Key::Minus | Key::NumpadSubtract => Adjustment::Rate(-0.5),
            Key::BracketRight => Adjustment::Rate(0.1),
            Key::BracketLeft => Adjustment::Rate(-0.1),
            Key::KeyG => Adjustment::DelayMs(100),
            Key::KeyH => Adjustment::DelayMs(-100),
            Key::KeyK => Adjustment::DelayMs(1000),
            Key::KeyJ => Adjustment::DelayMs(-1000),
            Key::Period => Adjustment::DelayMs(10),
            Key::Comma => Adjustment::DelayMs(-10),
            Key::ArrowUp => Adjustment::Volume(self.volume_step),
            Key::ArrowDown => Adjustment::Volume(-self.volume_step),
            Key::KeyM => Adjustment::SetVolume(0),
            Key::ArrowRight => Adjustment::SeekSecs(self.seek_step),
            Key::ArrowLeft => Adjustment::SeekSecs(-self.seek_step),
            _ => return None,
        };
        Some(adjustment)
    }

    /// Apply an adjustment to the session and the media element.
    ///
    /// Seeks are ignored while the duration is unknown.
    pub fn apply<M: MediaElement>(
        &self,
        adjustment: Adjustment,
        session: &mut SessionState,
        media: &mut M,
    ) -> Option<PlayerNotice> {
        match adjustment {
            Adjustment::Rate(step) => {
                let rate = step_rate(session.playback_rate, step, self.min_rate, self.max_rate);
                Some(self.set_rate(rate, session, media))
            }
            Adjustment::DelayMs(step) => {
                session.subtitle_delay_ms = step_delay(session.subtitle_delay_ms, step);
                Some(PlayerNotice::DelayChanged(session.subtitle_delay_ms))
            }
            Adjustment::Volume(step) => {
                session.volume = step_volume(session.volume, step);
                media.set_volume(session.volume);
                Some(PlayerNotice::VolumeChanged(session.volume))
            }
            Adjustment::SetVolume(volume) => {
                session.volume = volume.min(100);
                media.set_volume(session.volume);
                Some(PlayerNotice::VolumeChanged(session.volume))
            }
            Adjustment::SeekSecs(step) => {
                let duration = media.duration_seconds().filter(|d| *d > 0.0)?;
                let target = seek_target(media.position_seconds(), step, duration);
                media.seek(target);
                Some(PlayerNotice::Seeked(target))
            }
        }
    }

    /// Set an absolute rate, clamped to the configured bounds
    pub fn set_rate<M: MediaElement>(
        &self,
        rate: f64,
        session: &mut SessionState,
        media: &mut M,
    ) -> PlayerNotice {
        let rate = step_rate(rate, 0.0, self.min_rate, self.max_rate);
        session.playback_rate = rate;
        media.set_rate(rate);
        PlayerNotice::RateChanged(rate)
    }
}
