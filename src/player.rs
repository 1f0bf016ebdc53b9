use crate::config::PlayerConfig;
use crate::errors::PlayerResult;
use crate::persistence::{PositionStore, PositionTracker};
use crate::playback::{
    AdjustmentRouter, InputEvent, InputPort, Key, KeyEvent, MediaElement, PlayerNotice,
    Scheduler, SessionState, SpeedOutcome, SpeedState, TransientSpeedController,
};
use crate::subtitles::{RenderSurface, SubtitleSyncController, SubtitleTrack};
use log::{debug, info};
use std::collections::VecDeque;

/// One playback session of one video.
///
/// Owns the session state and every component, and serializes all input,
/// timer and clock events through `&mut self`. Dropping the player runs
/// [`Player::shutdown`]. Construction fails on a configuration that does
/// not pass [`PlayerConfig::validate`].
pub struct Player<M, S, R, P>
where
    M: MediaElement,
    S: Scheduler,
    R: RenderSurface,
    P: PositionStore,
{
    media: M,
    scheduler: S,
    session: SessionState,
    subtitles: SubtitleSyncController<R>,
    speed: TransientSpeedController,
    router: AdjustmentRouter,
    tracker: PositionTracker<P>,
    presets: Vec<f64>,
    notices: VecDeque<PlayerNotice>,
    shut_down: bool,
}

impl<M, S, R, P> Player<M, S, R, P>
where
    M: MediaElement,
    S: Scheduler,
    R: RenderSurface,
    P: PositionStore,
{
    pub fn new(
        config: &PlayerConfig,
        media: M,
        mut scheduler: S,
        surface: R,
        store: P,
        video_id: impl Into<String>,
    ) -> PlayerResult<Self> {
        config.validate()?;
        let session = SessionState {
            playback_rate: media.playback_rate(),
            subtitle_delay_ms: 0,
            volume: media.volume().min(100),
        };
        let mut tracker =
            PositionTracker::new(store, video_id, config.position_save_interval());
        tracker.start(&mut scheduler);
        info!("Player session started for {}", tracker.video_id());

        Ok(Self {
            media,
            scheduler,
            session,
            subtitles: SubtitleSyncController::new(surface),
            speed: TransientSpeedController::new(
                config.disambiguation_window(),
                config.default_temporary_rate,
            ),
            router: AdjustmentRouter::new(config),
            tracker,
            presets: config.temporary_rate_presets.clone(),
            notices: VecDeque::new(),
            shut_down: false,
        })
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    /// Direct access for the host, e.g. to simulate clock progress
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn subtitles(&self) -> &SubtitleSyncController<R> {
        &self.subtitles
    }

    pub fn store(&self) -> &P {
        self.tracker.store()
    }

    pub fn speed_state(&self) -> SpeedState {
        self.speed.state()
    }

    pub fn temporary_rate(&self) -> f64 {
        self.speed.temporary_rate()
    }

    /// Select the subtitle track, `None` for no subtitles
    pub fn set_subtitle_track(&mut self, track: Option<&SubtitleTrack>) {
        self.subtitles.set_track(track);
        self.refresh_subtitle();
    }

    /// Delay set from the host UI
    pub fn set_subtitle_delay(&mut self, delay_ms: i64) {
        self.session.subtitle_delay_ms = delay_ms;
        self.notices.push_back(PlayerNotice::DelayChanged(delay_ms));
        self.refresh_subtitle();
    }

    /// Rate set from the host UI, clamped like keyboard steps
    pub fn set_playback_rate(&mut self, rate: f64) {
        let notice = self.router.set_rate(rate, &mut self.session, &mut self.media);
        self.notices.push_back(notice);
    }

    /// Drain and handle every queued input event
    pub fn pump(&mut self, port: &mut InputPort) {
        while let Some(event) = port.poll() {
            self.handle(event);
        }
    }

    pub fn handle(&mut self, event: InputEvent) {
        if self.shut_down {
            return;
        }
        match event {
            InputEvent::KeyDown(key) => self.on_key_down(key),
            InputEvent::KeyUp(key) => self.on_key_up(key),
            InputEvent::TimeUpdate => self.refresh_subtitle(),
            InputEvent::Paused => {
                self.tracker.save_now(&self.media, &self.session);
            }
            InputEvent::MetadataLoaded => {
                if let Some(position) = self.tracker.restore(&mut self.media) {
                    self.notices.push_back(PlayerNotice::PositionRestored(position));
                }
            }
        }
    }

    /// Dispatch every timer that has come due on the scheduler
    pub fn poll_timers(&mut self) {
        if self.shut_down {
            return;
        }
        for handle in self.scheduler.due() {
            if self.speed.owns_timer(handle) {
                if let Some(outcome) = self.speed.on_timer(handle, &mut self.media) {
                    self.report_speed(outcome);
                }
            } else if !self.tracker.on_timer(
                handle,
                &self.media,
                &self.session,
                &mut self.scheduler,
            ) {
                debug!("Ignoring stale timer {:?}", handle);
            }
        }
    }

    /// Pop the next notice for the host UI
    pub fn next_notice(&mut self) -> Option<PlayerNotice> {
        self.notices.pop_front()
    }

    pub fn drain_notices(&mut self) -> Vec<PlayerNotice> {
        self.notices.drain(..).collect()
    }

    /// Stop the session: cancel timers, restore an overridden rate and save
    /// the final position. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        if let Some(outcome) =
            self.speed
                .teardown(&mut self.media, &mut self.scheduler, &mut self.session)
        {
            self.report_speed(outcome);
        }
        self.tracker
            .stop(&self.media, &self.session, &mut self.scheduler);
        info!("Player session ended for {}", self.tracker.video_id());
    }

    fn on_key_down(&mut self, event: KeyEvent) {
        if event.in_text_field {
            return;
        }
        if event.repeat && !event.key.auto_repeats() {
            debug!("Ignoring auto-repeat of {:?}", event.key);
            return;
        }
        match event.key {
            Key::Space => self.speed.key_down(&self.media, &mut self.scheduler),
            Key::KeyF => self.notices.push_back(PlayerNotice::FullscreenToggled),
            Key::Digit(n) => {
                let preset = usize::from(n).checked_sub(1).and_then(|i| self.presets.get(i));
                let Some(&rate) = preset else {
                    return;
                };
                if self.speed.set_temporary_rate(rate) {
                    self.notices
                        .push_back(PlayerNotice::TemporaryRateSelected(rate));
                }
            }
            key => {
                let Some(adjustment) = self.router.route(key) else {
                    return;
                };
                if let Some(notice) =
                    self.router
                        .apply(adjustment, &mut self.session, &mut self.media)
                {
                    let delay_changed = matches!(notice, PlayerNotice::DelayChanged(_));
                    self.notices.push_back(notice);
                    if delay_changed {
                        self.refresh_subtitle();
                    }
                }
            }
        }
    }

    fn on_key_up(&mut self, event: KeyEvent) {
        if event.key != Key::Space {
            return;
        }
        if let Some(outcome) =
            self.speed
                .key_up(&mut self.media, &mut self.scheduler, &mut self.session)
        {
            self.report_speed(outcome);
        }
    }

    fn report_speed(&mut self, outcome: SpeedOutcome) {
        let notice = match outcome {
            SpeedOutcome::Activated { rate } => PlayerNotice::SpeedIndicator {
                visible: true,
                rate,
            },
            SpeedOutcome::Released { restored_rate } => PlayerNotice::SpeedIndicator {
                visible: false,
                rate: restored_rate,
            },
            SpeedOutcome::Tapped => PlayerNotice::PlayPauseToggled,
        };
        self.notices.push_back(notice);
    }

    fn refresh_subtitle(&mut self) {
        self.subtitles.on_time_update(
            self.media.position_seconds(),
            self.session.subtitle_delay_ms,
        );
    }
}

impl<M, S, R, P> Drop for Player<M, S, R, P>
where
    M: MediaElement,
    S: Scheduler,
    R: RenderSurface,
    P: PositionStore,
{
    fn drop(&mut self) {
        self.shutdown();
    }
}
