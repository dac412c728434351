use std::time::{Duration, Instant};

/// Width of the sliding window behind the live WPM
pub const LIVE_WINDOW: Duration = Duration::from_millis(10_000);
pub const CHARS_PER_WORD: f64 = 5.0;

/// Sliding log of keystroke instants for the live WPM reading
#[derive(Debug, Clone, Default)]
pub struct SpeedEstimator {
    keystrokes: Vec<Instant>,
}

impl SpeedEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log `count` keystrokes that all landed at `at`
    pub fn record_keystrokes(&mut self, count: usize, at: Instant) {
        self.keystrokes.extend(std::iter::repeat(at).take(count));
    }

    /// Words per minute over the last [`LIVE_WINDOW`], pruning older entries.
    pub fn live_wpm(&mut self, at: Instant) -> f64 {
        if self.keystrokes.is_empty() {
            return 0.0;
        }

        self.keystrokes
            .retain(|&t| at.saturating_duration_since(t) <= LIVE_WINDOW);

        let window_minutes = LIVE_WINDOW.as_secs_f64() / 60.0;
        (self.keystrokes.len() as f64 / CHARS_PER_WORD) / window_minutes
    }

    pub fn len(&self) -> usize {
        self.keystrokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keystrokes.is_empty()
    }

    pub fn clear(&mut self) {
        self.keystrokes.clear();
    }
}

fn elapsed_minutes(started_at: Option<Instant>, now: Instant) -> f64 {
    started_at.map_or(0.0, |s| now.saturating_duration_since(s).as_secs_f64() / 60.0)
}

/// Words per minute since `started_at`, 0 before the session starts
pub fn total_wpm(chars: usize, started_at: Option<Instant>, now: Instant) -> f64 {
    match elapsed_minutes(started_at, now) {
        minutes if minutes > 0.0 => (chars as f64 / CHARS_PER_WORD) / minutes,
        _ => 0.0,
    }
}

/// Characters per minute since `started_at`, 0 before the session starts
pub fn cpm(chars: usize, started_at: Option<Instant>, now: Instant) -> f64 {
    match elapsed_minutes(started_at, now) {
        minutes if minutes > 0.0 => chars as f64 / minutes,
        _ => 0.0,
    }
}
