use super::store::PositionStore;
use super::types::SavedPosition;
use crate::playback::{MediaElement, Scheduler, SessionState, TimerHandle};
use log::{info, warn};
use std::time::Duration;

/// Saves the playback position of one video periodically, on pause and on
/// teardown, and restores it once after metadata loads.
///
/// Store failures are logged and dropped; they never reach playback.
pub struct PositionTracker<P: PositionStore> {
    store: P,
    video_id: String,
    interval: Duration,
    timer: Option<TimerHandle>,
    restore_attempted: bool,
}

impl<P: PositionStore> PositionTracker<P> {
    pub fn new(store: P, video_id: impl Into<String>, interval: Duration) -> Self {
        Self {
            store,
            video_id: video_id.into(),
            interval,
            timer: None,
            restore_attempted: false,
        }
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Arm the periodic save timer
    pub fn start<S: Scheduler>(&mut self, scheduler: &mut S) {
        if self.timer.is_none() {
            self.timer = Some(scheduler.schedule(self.interval));
        }
    }

    pub fn owns_timer(&self, handle: TimerHandle) -> bool {
        self.timer == Some(handle)
    }

    /// Periodic save fired; save and re-arm.
    pub fn on_timer<M: MediaElement, S: Scheduler>(
        &mut self,
        handle: TimerHandle,
        media: &M,
        session: &SessionState,
        scheduler: &mut S,
    ) -> bool {
        if !self.owns_timer(handle) {
            return false;
        }
        self.save_now(media, session);
        self.timer = Some(scheduler.schedule(self.interval));
        true
    }

    /// Save unless playback has not started or the duration is unknown.
    /// Returns whether anything was written.
    pub fn save_now<M: MediaElement>(&mut self, media: &M, session: &SessionState) -> bool {
        let position = media.position_seconds();
        let has_duration = media.duration_seconds().is_some_and(|d| d > 0.0);
        if position <= 0.0 || !has_duration {
            return false;
        }

        let saved = SavedPosition::now(position, session.playback_rate);
        match self.store.save(&self.video_id, &saved) {
            Ok(()) => true,
            Err(e) => {
                warn!("Could not save position for {}: {}", self.video_id, e);
                false
            }
        }
    }

    /// Seek to the saved position, once per tracker.
    ///
    /// Only applied when the saved position is positive and the element is
    /// still at its initial position, so a seek made during loading wins.
    pub fn restore<M: MediaElement>(&mut self, media: &mut M) -> Option<f64> {
        if self.restore_attempted {
            return None;
        }
        self.restore_attempted = true;

        let saved = match self.store.load(&self.video_id) {
            Ok(saved) => saved?,
            Err(e) => {
                warn!("Could not load position for {}: {}", self.video_id, e);
                return None;
            }
        };

        if saved.position_seconds <= 0.0 || media.position_seconds() != 0.0 {
            return None;
        }

        media.seek(saved.position_seconds);
        info!(
            "Restored position {:.1}s for {}",
            saved.position_seconds, self.video_id
        );
        Some(saved.position_seconds)
    }

    /// Cancel the periodic timer and write a final save.
    pub fn stop<M: MediaElement, S: Scheduler>(
        &mut self,
        media: &M,
        session: &SessionState,
        scheduler: &mut S,
    ) {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel(timer);
        }
        self.save_now(media, session);
    }
}
