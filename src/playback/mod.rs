mod adjust;
mod input;
mod media;
mod scheduler;
mod session;
mod speed;
mod types;

pub use adjust::{seek_target, step_delay, step_rate, step_volume, AdjustmentRouter};
pub use input::{InputEvent, InputPort, Key, KeyEvent};
pub use media::MediaElement;
pub use scheduler::{InstantScheduler, Scheduler, TimerHandle, VirtualScheduler};
pub use session::SessionState;
pub use speed::{SpeedOutcome, TransientSpeedController};
pub use types::{Adjustment, PlayerNotice, SpeedState};

#[cfg(test)]
pub use media::MockMediaElement;
#[cfg(test)]
pub mod unit_test;
