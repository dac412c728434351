use crate::classify::{CharClass, CharacterClassification};

/// A run of consecutive display chars that share one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderToken {
    pub class: CharClass,
    pub is_space: bool,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderLine {
    pub tokens: Vec<RenderToken>,
}

impl RenderLine {
    pub fn width(&self) -> usize {
        self.tokens.iter().map(|t| t.text.chars().count()).sum()
    }
}

/// Display-ready projection of a classification sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderFrame {
    pub lines: Vec<RenderLine>,
}

impl RenderFrame {
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.tokens.is_empty())
    }

    pub fn tokens(&self) -> impl Iterator<Item = &RenderToken> {
        self.lines.iter().flat_map(|l| l.tokens.iter())
    }
}

/// Group classifications into lines of styled runs.
///
/// A newline display char closes the current line and is not drawn.
pub fn project(classes: &[CharacterClassification]) -> RenderFrame {
    let mut lines = vec![RenderLine::default()];

    for c in classes {
        if c.display == '\n' {
            lines.push(RenderLine::default());
            continue;
        }

        let Some(line) = lines.last_mut() else {
            continue;
        };
        match line.tokens.last_mut() {
            Some(tok) if tok.class == c.class && tok.is_space == c.is_space => {
                tok.text.push(c.glyph());
            }
            _ => line.tokens.push(RenderToken {
                class: c.class,
                is_space: c.is_space,
                text: c.glyph().to_string(),
            }),
        }
    }

    if lines.len() == 1 && lines[0].tokens.is_empty() {
        lines.clear();
    }
    RenderFrame { lines }
}

/// Asks the host to run the pending projection at its next frame
pub trait FrameRequester {
    fn request_frame(&self);
}

/// For hosts that poll [`RenderScheduler::take_pending`] on their own cadence
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFrameRequester;

impl FrameRequester for NoopFrameRequester {
    fn request_frame(&self) {}
}

/// At most one pending projection, the latest typed text wins.
pub struct RenderScheduler {
    pending: Option<String>,
    requester: Box<dyn FrameRequester>,
}

impl std::fmt::Debug for RenderScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderScheduler")
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new(Box::new(NoopFrameRequester))
    }
}

impl RenderScheduler {
    pub fn new(requester: Box<dyn FrameRequester>) -> Self {
        Self {
            pending: None,
            requester,
        }
    }

    pub fn set_requester(&mut self, requester: Box<dyn FrameRequester>) {
        self.requester = requester;
    }

    /// Store `typed` for the next frame. Returns true when a frame was requested.
    pub fn schedule(&mut self, typed: &str) -> bool {
        let was_pending = self.pending.is_some();
        self.pending = Some(typed.to_string());
        if !was_pending {
            self.requester.request_frame();
        }
        !was_pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Hand over the latest payload and clear the pending slot
    pub fn take_pending(&mut self) -> Option<String> {
        self.pending.take()
    }

    /// Drop any pending payload without running it
    pub fn supersede(&mut self) {
        self.pending = None;
    }
}
