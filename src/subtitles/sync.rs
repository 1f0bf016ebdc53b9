use super::index::CueIndex;
use super::parser::parse_track;
use super::types::SubtitleTrack;
use log::{info, warn};

/// Where resolved subtitle text goes. An empty string means "render nothing".
#[cfg_attr(test, mockall::automock)]
pub trait RenderSurface {
    fn show_subtitle(&mut self, text: &str);
}

/// Milliseconds on the subtitle timeline for a playback position and delay.
///
/// Positive delay shows later cues sooner in playback time.
pub fn adjusted_time_ms(position_seconds: f64, subtitle_delay_ms: i64) -> i64 {
    (position_seconds * 1000.0).round() as i64 + subtitle_delay_ms
}

/// Resolves the visible cue on every time update and pushes text changes
/// to the rendering surface. Owns the cue index of the active track.
pub struct SubtitleSyncController<R: RenderSurface> {
    index: Option<CueIndex>,
    surface: R,
    displayed: String,
}

impl<R: RenderSurface> SubtitleSyncController<R> {
    pub fn new(surface: R) -> Self {
        Self {
            index: None,
            surface,
            displayed: String::new(),
        }
    }

    /// Select a track, or clear the selection with `None`.
    ///
    /// A track that fails to parse behaves like no track at all.
    pub fn set_track(&mut self, track: Option<&SubtitleTrack>) {
        self.index = track.and_then(|track| match parse_track(&track.content, track.format) {
            Ok(parsed) => {
                info!(
                    "Loaded {} subtitle track: {} cues, {} malformed blocks skipped",
                    track.format,
                    parsed.cues.len(),
                    parsed.skipped_blocks
                );
                Some(CueIndex::build(parsed.cues))
            }
            Err(e) => {
                warn!("Subtitle track rejected, showing no subtitles: {}", e);
                None
            }
        });
        self.emit(String::new());
    }

    pub fn has_track(&self) -> bool {
        self.index.is_some()
    }

    pub fn index(&self) -> Option<&CueIndex> {
        self.index.as_ref()
    }

    /// Text that should be visible, without emitting anything
    pub fn resolve(&self, position_seconds: f64, subtitle_delay_ms: i64) -> &str {
        match &self.index {
            Some(index) => index.text_at(adjusted_time_ms(position_seconds, subtitle_delay_ms)),
            None => "",
        }
    }

    /// Handle a time update from the media clock.
    pub fn on_time_update(&mut self, position_seconds: f64, subtitle_delay_ms: i64) {
        let text = self.resolve(position_seconds, subtitle_delay_ms).to_string();
        self.emit(text);
    }

    /// Text most recently sent to the surface
    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    fn emit(&mut self, text: String) {
        if text != self.displayed {
            self.surface.show_subtitle(&text);
            self.displayed = text;
        }
    }
}
