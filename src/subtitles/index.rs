use super::types::Cue;

/// Time-ordered cues of the active subtitle track.
///
/// Cues are kept sorted by `(start_ms, end_ms)` with a stable sort, so the
/// overlap tie-break never depends on input order except for identical ranges.
/// The visible cue is then the highest-positioned cue that has started and not
/// yet ended, which a max-of-`end_ms` segment tree answers in logarithmic time
/// no matter how long earlier cues stay on screen.
#[derive(Debug, Default, Clone)]
pub struct CueIndex {
    cues: Vec<Cue>,
    ends: EndTree,
}

impl CueIndex {
    pub fn build(cues: Vec<Cue>) -> Self {
        let mut index = Self::default();
        index.rebuild(cues);
        index
    }

    /// Replace the held cues.
    pub fn rebuild(&mut self, mut cues: Vec<Cue>) {
        cues.sort_by(|a, b| (a.start_ms, a.end_ms).cmp(&(b.start_ms, b.end_ms)));
        self.ends = EndTree::build(cues.iter().map(|cue| cue.end_ms));
        self.cues = cues;
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// The cue visible at `time_ms`.
    ///
    /// When several cues contain `time_ms`, the one that began most recently
    /// wins; among equal starts the one ending last wins.
    pub fn active_at(&self, time_ms: i64) -> Option<&Cue> {
        // First cue starting strictly after time_ms
        let upper = self.cues.partition_point(|cue| cue.start_ms <= time_ms);
        self.ends
            .rightmost_above(upper, time_ms)
            .map(|i| &self.cues[i])
    }

    /// Text visible at `time_ms`, empty when nothing is showing
    pub fn text_at(&self, time_ms: i64) -> &str {
        self.active_at(time_ms)
            .map(|cue| cue.text.as_str())
            .unwrap_or("")
    }
}

/// Segment tree over cue end times. Node `n` covers a power-of-two span and
/// holds the largest end inside it; leaves past the last cue hold `i64::MIN`.
#[derive(Debug, Clone)]
struct EndTree {
    leaves: usize,
    max: Vec<i64>,
}

impl Default for EndTree {
    fn default() -> Self {
        Self::build(std::iter::empty())
    }
}

impl EndTree {
    fn build(ends: impl ExactSizeIterator<Item = i64>) -> Self {
        let leaves = ends.len().next_power_of_two();
        let mut max = vec![i64::MIN; 2 * leaves];
        for (i, end) in ends.enumerate() {
            max[leaves + i] = end;
        }
        for node in (1..leaves).rev() {
            max[node] = max[2 * node].max(max[2 * node + 1]);
        }
        Self { leaves, max }
    }

    /// Greatest position `< limit` whose end lies after `time_ms`
    fn rightmost_above(&self, limit: usize, time_ms: i64) -> Option<usize> {
        self.search(1, 0, self.leaves, limit, time_ms)
    }

    fn search(&self, node: usize, lo: usize, hi: usize, limit: usize, time_ms: i64) -> Option<usize> {
        if lo >= limit || self.max[node] <= time_ms {
            return None;
        }
        if hi - lo == 1 {
            return Some(lo);
        }
        let mid = lo + (hi - lo) / 2;
        self.search(2 * node + 1, mid, hi, limit, time_ms)
            .or_else(|| self.search(2 * node, lo, mid, limit, time_ms))
    }
}
