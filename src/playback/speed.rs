use super::media::MediaElement;
use super::scheduler::{Scheduler, TimerHandle};
use super::session::SessionState;
use super::types::SpeedState;
use log::{debug, info};
use std::time::Duration;

/// What a hold-key transition did, for the caller to report
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedOutcome {
    /// Hold confirmed: the temporary rate is now applied
    Activated { rate: f64 },
    /// Hold released: the rate captured at key-down is back
    Released { restored_rate: f64 },
    /// Key came up before the hold was confirmed
    Tapped,
}

/// One hold gesture, alive from key-down to key-up
#[derive(Debug)]
struct HoldSession {
    active: bool,
    original_rate: f64,
    timer: Option<TimerHandle>,
}

/// Press/hold/tap state machine on the hold key.
///
/// Idle -> Pending on key-down (the current rate is captured and the
/// disambiguation timer armed). Pending -> Active when the timer fires while
/// playing. Key-up from Pending is a tap and toggles play/pause; key-up from
/// Active restores the captured rate. The media rate is written only when
/// entering and leaving Active.
#[derive(Debug)]
pub struct TransientSpeedController {
    window: Duration,
    temporary_rate: f64,
    hold: Option<HoldSession>,
}

impl TransientSpeedController {
    pub fn new(window: Duration, temporary_rate: f64) -> Self {
        Self {
            window,
            temporary_rate,
            hold: None,
        }
    }

    pub fn state(&self) -> SpeedState {
        match &self.hold {
            None => SpeedState::Idle,
            Some(hold) if hold.active => SpeedState::Active,
            Some(_) => SpeedState::Pending,
        }
    }

    pub fn temporary_rate(&self) -> f64 {
        self.temporary_rate
    }

    /// Choose the rate applied by the next hold. A running hold keeps its rate.
    pub fn set_temporary_rate(&mut self, rate: f64) -> bool {
        if !(rate > 0.0) {
            return false;
        }
        self.temporary_rate = rate;
        true
    }

    /// Rate to restore on release, while a gesture is in progress
    pub fn original_rate(&self) -> Option<f64> {
        self.hold.as_ref().map(|hold| hold.original_rate)
    }

    /// Hold key went down. Ignored while a gesture is already running, which
    /// swallows OS key-repeat.
    pub fn key_down<M: MediaElement, S: Scheduler>(&mut self, media: &M, scheduler: &mut S) {
        if self.hold.is_some() {
            return;
        }
        let original_rate = media.playback_rate();
        let timer = scheduler.schedule(self.window);
        debug!("Hold key down: pending, captured rate {}", original_rate);
        self.hold = Some(HoldSession {
            active: false,
            original_rate,
            timer: Some(timer),
        });
    }

    /// Dispatch a fired timer. Returns `None` when the timer is not ours or
    /// the hold could not be activated.
    ///
    /// While paused the gesture stays Pending until key-up, which then counts
    /// as a tap.
    pub fn on_timer<M: MediaElement>(
        &mut self,
        handle: TimerHandle,
        media: &mut M,
    ) -> Option<SpeedOutcome> {
        let hold = self.hold.as_mut()?;
        if hold.active || hold.timer != Some(handle) {
            return None;
        }
        hold.timer = None;

        if media.paused() {
            debug!("Hold window elapsed while paused, staying pending");
            return None;
        }

        hold.active = true;
        media.set_rate(self.temporary_rate);
        info!(
            "Hold confirmed: rate {} -> {}",
            hold.original_rate, self.temporary_rate
        );
        Some(SpeedOutcome::Activated {
            rate: self.temporary_rate,
        })
    }

    /// Whether `handle` is the armed disambiguation timer
    pub fn owns_timer(&self, handle: TimerHandle) -> bool {
        self.hold
            .as_ref()
            .is_some_and(|hold| hold.timer == Some(handle))
    }

    /// Hold key came up.
    pub fn key_up<M: MediaElement, S: Scheduler>(
        &mut self,
        media: &mut M,
        scheduler: &mut S,
        session: &mut SessionState,
    ) -> Option<SpeedOutcome> {
        let hold = self.hold.take()?;
        if let Some(timer) = hold.timer {
            if !scheduler.cancel(timer) {
                debug!("Disambiguation timer already gone");
            }
        }

        if hold.active {
            Some(restore(hold.original_rate, media, session))
        } else {
            debug!("Hold key released early: tap");
            media.toggle_play();
            Some(SpeedOutcome::Tapped)
        }
    }

    /// Cancel any armed timer and undo an active override. Never toggles
    /// playback.
    pub fn teardown<M: MediaElement, S: Scheduler>(
        &mut self,
        media: &mut M,
        scheduler: &mut S,
        session: &mut SessionState,
    ) -> Option<SpeedOutcome> {
        let hold = self.hold.take()?;
        if let Some(timer) = hold.timer {
            scheduler.cancel(timer);
        }
        hold.active
            .then(|| restore(hold.original_rate, media, session))
    }
}

fn restore<M: MediaElement>(rate: f64, media: &mut M, session: &mut SessionState) -> SpeedOutcome {
    media.set_rate(rate);
    session.playback_rate = rate;
    info!("Hold released: rate restored to {}", rate);
    SpeedOutcome::Released {
        restored_rate: rate,
    }
}
