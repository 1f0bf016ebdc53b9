use crate::config::PlayerConfig;
use crate::playback::{
    seek_target, step_delay, step_rate, step_volume, Adjustment, AdjustmentRouter, InputEvent,
    InputPort, Key, KeyEvent, MediaElement, MockMediaElement, PlayerNotice, Scheduler,
    SessionState, SpeedOutcome, SpeedState, TransientSpeedController, VirtualScheduler,
};
use std::time::Duration;

#[cfg(test)]
mod test_helpers {
    use super::MediaElement;

    /// Media element double that records every rate write
    #[derive(Debug)]
    pub struct FakeMedia {
        pub position: f64,
        pub duration: Option<f64>,
        pub paused: bool,
        pub rate: f64,
        pub volume: u8,
        pub rate_writes: Vec<f64>,
        pub toggles: usize,
    }

    impl FakeMedia {
        pub fn playing() -> Self {
            Self {
                position: 30.0,
                duration: Some(120.0),
                paused: false,
                rate: 1.0,
                volume: 50,
                rate_writes: Vec::new(),
                toggles: 0,
            }
        }

        pub fn paused() -> Self {
            Self {
                paused: true,
                ..Self::playing()
            }
        }
    }

    impl MediaElement for FakeMedia {
        fn position_seconds(&self) -> f64 {
            self.position
        }
        fn duration_seconds(&self) -> Option<f64> {
            self.duration
        }
        fn paused(&self) -> bool {
            self.paused
        }
        fn playback_rate(&self) -> f64 {
            self.rate
        }
        fn volume(&self) -> u8 {
            self.volume
        }
        fn seek(&mut self, seconds: f64) {
            self.position = seconds;
        }
        fn set_rate(&mut self, rate: f64) {
            self.rate = rate;
            self.rate_writes.push(rate);
        }
        fn set_volume(&mut self, volume: u8) {
            self.volume = volume;
        }
        fn toggle_play(&mut self) {
            self.paused = !self.paused;
            self.toggles += 1;
        }
    }
}

use test_helpers::FakeMedia;

const WINDOW: Duration = Duration::from_millis(200);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Advance virtual time and dispatch due timers to the controller
fn advance(
    controller: &mut TransientSpeedController,
    scheduler: &mut VirtualScheduler,
    media: &mut FakeMedia,
    by: Duration,
) -> Vec<SpeedOutcome> {
    scheduler.advance(by);
    scheduler
        .due()
        .into_iter()
        .filter_map(|handle| controller.on_timer(handle, media))
        .collect()
}

#[test]
fn test_hold_activates_and_release_restores() {
    let mut media = FakeMedia::playing();
    let mut scheduler = VirtualScheduler::new();
    let mut session = SessionState::default();
    let mut speed = TransientSpeedController::new(WINDOW, 2.0);

    speed.key_down(&media, &mut scheduler);
    assert_eq!(speed.state(), SpeedState::Pending);
    assert!(advance(&mut speed, &mut scheduler, &mut media, ms(199)).is_empty());
    assert!(media.rate_writes.is_empty());

    let outcomes = advance(&mut speed, &mut scheduler, &mut media, ms(1));
    assert_eq!(outcomes, vec![SpeedOutcome::Activated { rate: 2.0 }]);
    assert_eq!(speed.state(), SpeedState::Active);
    assert_eq!(media.rate, 2.0);

    let released = speed.key_up(&mut media, &mut scheduler, &mut session);
    assert_eq!(
        released,
        Some(SpeedOutcome::Released { restored_rate: 1.0 })
    );
    assert_eq!(speed.state(), SpeedState::Idle);
    assert_eq!(media.rate_writes, vec![2.0, 1.0]);
    assert_eq!(media.toggles, 0);
}

#[test]
fn test_quick_tap_toggles_without_rate_change() {
    let mut media = FakeMedia::playing();
    let mut scheduler = VirtualScheduler::new();
    let mut session = SessionState::default();
    let mut speed = TransientSpeedController::new(WINDOW, 2.0);

    speed.key_down(&media, &mut scheduler);
    advance(&mut speed, &mut scheduler, &mut media, ms(120));
    let outcome = speed.key_up(&mut media, &mut scheduler, &mut session);

    assert_eq!(outcome, Some(SpeedOutcome::Tapped));
    assert_eq!(media.toggles, 1);
    assert_eq!(scheduler.armed_count(), 0);

    // The cancelled timer never fires later
    assert!(advance(&mut speed, &mut scheduler, &mut media, ms(1000)).is_empty());
    assert!(media.rate_writes.is_empty());
}

#[test]
fn test_hold_while_paused_stays_pending_then_taps() {
    let mut media = FakeMedia::paused();
    let mut scheduler = VirtualScheduler::new();
    let mut session = SessionState::default();
    let mut speed = TransientSpeedController::new(WINDOW, 2.0);

    speed.key_down(&media, &mut scheduler);
    assert!(advance(&mut speed, &mut scheduler, &mut media, ms(5000)).is_empty());
    assert_eq!(speed.state(), SpeedState::Pending);

    let outcome = speed.key_up(&mut media, &mut scheduler, &mut session);
    assert_eq!(outcome, Some(SpeedOutcome::Tapped));
    assert_eq!(media.toggles, 1);
    assert!(!media.paused);
    assert!(media.rate_writes.is_empty());
}

#[test]
fn test_key_repeat_is_ignored() {
    let mut media = FakeMedia::playing();
    let mut scheduler = VirtualScheduler::new();
    let mut speed = TransientSpeedController::new(WINDOW, 2.0);

    speed.key_down(&media, &mut scheduler);
    media.rate = 1.5;
    speed.key_down(&media, &mut scheduler);
    speed.key_down(&media, &mut scheduler);

    assert_eq!(scheduler.armed_count(), 1);
    assert_eq!(speed.original_rate(), Some(1.0));
}

#[test]
fn test_restore_uses_rate_captured_at_key_down() {
    let mut media = FakeMedia::playing();
    let mut scheduler = VirtualScheduler::new();
    let mut session = SessionState::default();
    let router = AdjustmentRouter::new(&PlayerConfig::default());
    let mut speed = TransientSpeedController::new(WINDOW, 2.0);

    speed.key_down(&media, &mut scheduler);
    router.apply(Adjustment::Rate(0.5), &mut session, &mut media);
    assert_eq!(media.rate, 1.5);

    advance(&mut speed, &mut scheduler, &mut media, WINDOW);
    assert_eq!(speed.state(), SpeedState::Active);

    speed.key_up(&mut media, &mut scheduler, &mut session);
    assert_eq!(media.rate, 1.0);
    assert_eq!(session.playback_rate, 1.0);
}

#[test]
fn test_temporary_rate_selection() {
    let mut speed = TransientSpeedController::new(WINDOW, 2.0);
    assert!(speed.set_temporary_rate(3.0));
    assert!(!speed.set_temporary_rate(0.0));
    assert!(!speed.set_temporary_rate(f64::NAN));
    assert_eq!(speed.temporary_rate(), 3.0);
}

#[test]
fn test_teardown_cancels_pending_timer() {
    let mut media = FakeMedia::playing();
    let mut scheduler = VirtualScheduler::new();
    let mut session = SessionState::default();
    let mut speed = TransientSpeedController::new(WINDOW, 2.0);

    speed.key_down(&media, &mut scheduler);
    assert_eq!(speed.teardown(&mut media, &mut scheduler, &mut session), None);
    assert_eq!(scheduler.armed_count(), 0);
    assert_eq!(media.toggles, 0);
    assert!(media.rate_writes.is_empty());
}

#[test]
fn test_teardown_restores_active_override() {
    let mut media = FakeMedia::playing();
    let mut scheduler = VirtualScheduler::new();
    let mut session = SessionState::default();
    let mut speed = TransientSpeedController::new(WINDOW, 2.5);

    speed.key_down(&media, &mut scheduler);
    advance(&mut speed, &mut scheduler, &mut media, WINDOW);
    assert_eq!(media.rate, 2.5);

    let outcome = speed.teardown(&mut media, &mut scheduler, &mut session);
    assert_eq!(outcome, Some(SpeedOutcome::Released { restored_rate: 1.0 }));
    assert_eq!(media.rate, 1.0);
    assert_eq!(speed.state(), SpeedState::Idle);
}

#[test]
fn test_rate_written_only_on_active_transitions() {
    let mut media = MockMediaElement::new();
    media.expect_playback_rate().return_const(1.25);
    media.expect_paused().return_const(false);
    let mut seq = mockall::Sequence::new();
    media
        .expect_set_rate()
        .with(mockall::predicate::eq(2.0))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    media
        .expect_set_rate()
        .with(mockall::predicate::eq(1.25))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    media.expect_toggle_play().times(0);

    let mut scheduler = VirtualScheduler::new();
    let mut session = SessionState::default();
    let mut speed = TransientSpeedController::new(WINDOW, 2.0);

    speed.key_down(&media, &mut scheduler);
    scheduler.advance(WINDOW);
    for handle in scheduler.due() {
        speed.on_timer(handle, &mut media);
    }
    speed.key_up(&mut media, &mut scheduler, &mut session);
}

#[test]
fn test_step_functions_clamp() {
    assert_eq!(step_rate(3.8, 0.5, 0.25, 4.0), 4.0);
    assert_eq!(step_rate(0.3, -0.5, 0.25, 4.0), 0.25);
    assert_eq!(step_rate(1.0, 0.1, 0.25, 4.0), 1.1);
    let mut rate = 1.0;
    for _ in 0..3 {
        rate = step_rate(rate, 0.1, 0.25, 4.0);
    }
    assert_eq!(rate, 1.3);

    assert_eq!(step_delay(-50, -1000), -1050);
    assert_eq!(step_delay(i64::MAX, 10), i64::MAX);

    assert_eq!(step_volume(95, 10), 100);
    assert_eq!(step_volume(5, -10), 0);

    assert_eq!(seek_target(5.0, -10.0, 100.0), 0.0);
    assert_eq!(seek_target(95.0, 10.0, 100.0), 100.0);
    assert_eq!(seek_target(50.0, 10.0, 100.0), 60.0);
}

#[test]
fn test_router_key_map() {
    let router = AdjustmentRouter::new(&PlayerConfig::default());
    assert_eq!(router.route(Key::Equal), Some(Adjustment::Rate(0.5)));
    assert_eq!(router.route(Key::NumpadSubtract), Some(Adjustment::Rate(-0.5)));
    assert_eq!(router.route(Key::BracketLeft), Some(Adjustment::Rate(-0.1)));
    assert_eq!(router.route(Key::KeyG), Some(Adjustment::DelayMs(100)));
    assert_eq!(router.route(Key::KeyJ), Some(Adjustment::DelayMs(-1000)));
    assert_eq!(router.route(Key::Comma), Some(Adjustment::DelayMs(-10)));
    assert_eq!(router.route(Key::ArrowDown), Some(Adjustment::Volume(-10)));
    assert_eq!(router.route(Key::KeyM), Some(Adjustment::SetVolume(0)));
    assert_eq!(router.route(Key::ArrowLeft), Some(Adjustment::SeekSecs(-10.0)));
    assert_eq!(router.route(Key::Space), None);
    assert_eq!(router.route(Key::Digit(1)), None);
}

#[test]
fn test_router_apply_updates_session_and_media() {
    let router = AdjustmentRouter::new(&PlayerConfig::default());
    let mut session = SessionState {
        volume: 50,
        ..SessionState::default()
    };
    let mut media = FakeMedia::playing();

    let notice = router.apply(Adjustment::Rate(0.5), &mut session, &mut media);
    assert_eq!(notice, Some(PlayerNotice::RateChanged(1.5)));
    assert_eq!(media.rate, 1.5);

    let notice = router.apply(Adjustment::DelayMs(-100), &mut session, &mut media);
    assert_eq!(notice, Some(PlayerNotice::DelayChanged(-100)));

    let notice = router.apply(Adjustment::Volume(10), &mut session, &mut media);
    assert_eq!(notice, Some(PlayerNotice::VolumeChanged(60)));
    assert_eq!(media.volume, 60);

    let notice = router.apply(Adjustment::SeekSecs(10.0), &mut session, &mut media);
    assert_eq!(notice, Some(PlayerNotice::Seeked(40.0)));
    assert_eq!(media.position, 40.0);
}

#[test]
fn test_router_seek_needs_duration() {
    let router = AdjustmentRouter::new(&PlayerConfig::default());
    let mut session = SessionState::default();
    let mut media = FakeMedia {
        duration: None,
        ..FakeMedia::playing()
    };

    assert_eq!(
        router.apply(Adjustment::SeekSecs(10.0), &mut session, &mut media),
        None
    );
    assert_eq!(media.position, 30.0);
}

#[test]
fn test_virtual_scheduler_orders_and_cancels() {
    let mut scheduler = VirtualScheduler::new();
    let late = scheduler.schedule(ms(300));
    let early = scheduler.schedule(ms(100));
    let dropped = scheduler.schedule(ms(200));

    assert!(scheduler.cancel(dropped));
    assert!(!scheduler.cancel(dropped));
    assert_eq!(scheduler.next_deadline(), Some(ms(100)));

    scheduler.advance(ms(500));
    assert_eq!(scheduler.due(), vec![early, late]);
    assert!(!scheduler.cancel(early));
    assert!(scheduler.due().is_empty());
    assert_eq!(scheduler.now(), ms(500));
}

#[test]
fn test_key_codes() {
    assert_eq!(Key::from_code("Space"), Some(Key::Space));
    assert_eq!(Key::from_code("Digit3"), Some(Key::Digit(3)));
    assert_eq!(Key::from_code("Digit0"), None);
    assert_eq!(Key::from_code("KeyZ"), None);
    assert_eq!(Key::from_code("BracketRight"), Some(Key::BracketRight));
}

#[test]
fn test_input_port_is_fifo() {
    let mut port = InputPort::new();
    port.push_key_down("Space", false, false);
    port.push_key_down("KeyQ", false, false);
    port.push(InputEvent::TimeUpdate);
    port.push_key_up("Space");

    assert_eq!(port.len(), 3);
    assert_eq!(
        port.poll(),
        Some(InputEvent::KeyDown(KeyEvent::new(Key::Space)))
    );
    assert_eq!(port.poll(), Some(InputEvent::TimeUpdate));
    assert_eq!(port.poll(), Some(InputEvent::KeyUp(KeyEvent::new(Key::Space))));
    assert!(port.is_empty());
}

#[test]
fn test_router_with_inverted_bounds_does_not_panic() {
    let config = PlayerConfig {
        min_rate: 4.0,
        max_rate: 1.0,
        ..PlayerConfig::default()
    };
    let router = AdjustmentRouter::new(&config);
    let mut session = SessionState::default();
    let mut media = FakeMedia::playing();

    let notice = router.apply(Adjustment::Rate(0.5), &mut session, &mut media);
    assert_eq!(notice, Some(PlayerNotice::RateChanged(1.0)));
    assert_eq!(step_rate(2.0, 0.0, 4.0, 1.0), 1.0);
    assert_eq!(step_rate(1.0, f64::NAN, 0.25, 4.0), 0.25);
}

#[test]
fn test_only_step_keys_auto_repeat() {
    for key in [Key::BracketRight, Key::Minus, Key::KeyG, Key::ArrowUp, Key::ArrowLeft] {
        assert!(key.auto_repeats(), "{:?}", key);
    }
    for key in [Key::Space, Key::KeyF, Key::KeyM, Key::Digit(3)] {
        assert!(!key.auto_repeats(), "{:?}", key);
    }
}
