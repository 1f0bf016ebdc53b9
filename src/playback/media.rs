/// Control surface of the host media element.
///
/// The element owns decoding and the playback clock; the core only reads its
/// clock and issues seek, rate, volume and play/pause commands.
#[cfg_attr(test, mockall::automock)]
pub trait MediaElement {
    fn position_seconds(&self) -> f64;
    /// `None` until metadata has loaded
    fn duration_seconds(&self) -> Option<f64>;
    fn paused(&self) -> bool;
    fn playback_rate(&self) -> f64;
    /// 0..=100
    fn volume(&self) -> u8;

    fn seek(&mut self, seconds: f64);
    fn set_rate(&mut self, rate: f64);
    fn set_volume(&mut self, volume: u8);
    fn toggle_play(&mut self);
}
