use std::time::Instant;

use tracing::{debug, info, trace};

use crate::analyzer::{analyze, progress_percent};
use crate::classify::{classify, CharacterClassification};
use crate::clock::{Clock, SystemClock};
use crate::metrics::Metrics;
use crate::render::{project, FrameRequester, RenderFrame, RenderScheduler};
use crate::snippets::Snippet;
use crate::speed::{cpm, total_wpm, SpeedEstimator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SessionState {
    Idle,
    Active,
}

/// One typing run against one target text.
///
/// Owns the keystroke log, the typed text and the latest metrics. Every
/// input recomputes the metrics right away; the visual is projected on the
/// next frame.
#[derive(Debug)]
pub struct Session<C: Clock = SystemClock> {
    clock: C,
    target: String,
    typed: String,
    typed_len: usize,
    started_at: Option<Instant>,
    speed: SpeedEstimator,
    metrics: Metrics,
    scheduler: RenderScheduler,
    frame: RenderFrame,
}

impl Session<SystemClock> {
    pub fn new(target: impl Into<String>) -> Self {
        Self::with_clock(target, SystemClock)
    }
}

impl<C: Clock> Session<C> {
    pub fn with_clock(target: impl Into<String>, clock: C) -> Self {
        let mut session = Self {
            clock,
            target: target.into(),
            typed: String::new(),
            typed_len: 0,
            started_at: None,
            speed: SpeedEstimator::new(),
            metrics: Metrics::default(),
            scheduler: RenderScheduler::default(),
            frame: RenderFrame::default(),
        };
        session.reset();
        session
    }

    /// Route projection requests to the host's frame loop
    pub fn set_frame_requester(&mut self, requester: Box<dyn FrameRequester>) {
        self.scheduler.set_requester(requester);
    }

    pub fn state(&self) -> SessionState {
        if self.started_at.is_some() {
            SessionState::Active
        } else {
            SessionState::Idle
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Latest projected visual
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    pub fn keystrokes_logged(&self) -> usize {
        self.speed.len()
    }

    pub fn classification(&self) -> Vec<CharacterClassification> {
        classify(&self.target, &self.typed)
    }

    pub fn switch_snippet(&mut self, snippet: &Snippet) {
        info!(id = %snippet.id, "switching snippet");
        self.target = snippet.text.clone();
        self.reset();
    }

    /// Back to idle with an empty input. Calling it twice changes nothing.
    pub fn reset(&mut self) {
        debug!(state = %self.state(), "resetting session");
        self.typed.clear();
        self.typed_len = 0;
        self.started_at = None;
        self.speed.clear();
        self.scheduler.supersede();
        self.frame = project(&classify(&self.target, ""));
        let now = self.clock.now();
        self.recompute(now);
    }

    /// Take a whole-buffer snapshot of the input field
    pub fn record_input(&mut self, new_typed: &str) {
        let now = self.clock.now();
        self.start_if_idle(new_typed, now);

        let new_len = new_typed.chars().count();
        if new_len > self.typed_len {
            self.speed.record_keystrokes(new_len - self.typed_len, now);
        }

        self.typed = new_typed.to_string();
        self.typed_len = new_len;
        self.recompute(now);
        self.scheduler.schedule(&self.typed);
    }

    /// Replace the selected range of the typed text with `text`.
    ///
    /// Every inserted char counts as a keystroke, regardless of how much
    /// was replaced. Returns the cursor position after the insertion.
    pub fn insert_at_cursor(
        &mut self,
        text: &str,
        selection_start: usize,
        selection_end: usize,
    ) -> usize {
        let now = self.clock.now();
        let mut chars: Vec<char> = self.typed.chars().collect();
        let end = selection_end.min(chars.len());
        let start = selection_start.min(chars.len());
        let (start, end) = (start.min(end), start.max(end));

        let inserted: Vec<char> = text.chars().collect();
        let count = inserted.len();
        chars.splice(start..end, inserted);
        let new_typed: String = chars.iter().collect();

        self.start_if_idle(&new_typed, now);
        self.speed.record_keystrokes(count, now);
        self.typed_len = chars.len();
        self.typed = new_typed;
        self.recompute(now);
        self.scheduler.schedule(&self.typed);

        start + count
    }

    /// Recompute the metrics without new input, so the live speed decays
    pub fn refresh(&mut self) {
        let now = self.clock.now();
        self.recompute(now);
    }

    /// Run the pending projection, if any. Returns true when the visual changed.
    pub fn render_pending(&mut self) -> bool {
        match self.scheduler.take_pending() {
            Some(typed) => {
                self.frame = project(&classify(&self.target, &typed));
                true
            }
            None => false,
        }
    }

    pub fn has_pending_render(&self) -> bool {
        self.scheduler.is_pending()
    }

    fn start_if_idle(&mut self, new_typed: &str, now: Instant) {
        if self.started_at.is_none() && !new_typed.is_empty() {
            debug!("session started");
            self.started_at = Some(now);
        }
    }

    fn recompute(&mut self, now: Instant) {
        let analysis = analyze(&self.typed, &self.target);
        self.metrics = Metrics {
            live_wpm: self.speed.live_wpm(now),
            total_wpm: total_wpm(self.typed_len, self.started_at, now),
            cpm: cpm(self.typed_len, self.started_at, now),
            mistakes: analysis.mistakes,
            accuracy_percent: analysis.accuracy_percent,
            pattern: analysis.pattern,
            progress_percent: progress_percent(self.typed_len, self.target.chars().count()),
        };
        trace!(metrics = ?self.metrics, "metrics recomputed");
    }
}
