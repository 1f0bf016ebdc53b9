pub mod subtitles;
pub use subtitles::{
    parse_subtitles, parse_track, Cue, CueIndex, RenderSurface, SubtitleFormat,
    SubtitleSyncController, SubtitleTrack,
};

pub mod playback;
pub use playback::{
    AdjustmentRouter, InputEvent, InputPort, Key, KeyEvent, MediaElement, PlayerNotice,
    Scheduler, SessionState, SpeedState, TransientSpeedController, VirtualScheduler,
};

pub mod persistence;
pub use persistence::{
    JsonFilePositionStore, MemoryPositionStore, PositionStore, PositionTracker, SavedPosition,
};

pub mod config;
pub use config::PlayerConfig;

pub mod player;
pub use player::Player;

pub mod errors;
pub use errors::{ConfigError, ParseError, PlayerError, PlayerResult, StoreError};

/// Read a subtitle file from disk and parse it, taking the format from the
/// file extension.
pub fn load_subtitle_file<P: AsRef<std::path::Path>>(path: P) -> PlayerResult<Vec<Cue>> {
    let path = path.as_ref();
    let format = SubtitleFormat::from_extension(&path.to_string_lossy())?;
    let content = std::fs::read_to_string(path)?;
    Ok(parse_subtitles(&content, format)?)
}
