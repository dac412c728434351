/// Snapshot of everything the front end shows about a session
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub live_wpm: f64,
    pub total_wpm: f64,
    pub cpm: f64,
    pub mistakes: usize,
    pub accuracy_percent: u8,
    pub pattern: String,
    pub progress_percent: f64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            live_wpm: 0.0,
            total_wpm: 0.0,
            cpm: 0.0,
            mistakes: 0,
            accuracy_percent: 100,
            pattern: String::new(),
            progress_percent: 0.0,
        }
    }
}

impl Metrics {
    /// Pattern as displayed, `-` when nothing was mistyped
    pub fn pattern_label(&self) -> &str {
        if self.pattern.is_empty() {
            "-"
        } else {
            &self.pattern
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} wpm live   {} wpm   {} cpm   {}% acc   {} mistakes   pattern {}",
            self.live_wpm.round(),
            self.total_wpm.round(),
            self.cpm.round(),
            self.accuracy_percent,
            self.mistakes,
            self.pattern_label()
        )
    }
}
