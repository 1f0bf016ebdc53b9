mod index;
mod parser;
mod sync;
mod types;
mod utils;

pub use index::CueIndex;
pub use parser::{parse_subtitles, parse_track};
pub use sync::{adjusted_time_ms, RenderSurface, SubtitleSyncController};
pub use types::{Cue, ParsedTrack, SubtitleFormat, SubtitleTrack};

#[cfg(test)]
pub use sync::MockRenderSurface;

// Exports for testing
pub use utils::{format_timestamp, parse_timestamp, parse_timing_line};
