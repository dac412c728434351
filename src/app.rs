use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::{Config, ConfigStore, Theme};
use crate::error::Result;
use crate::input::InputField;
use crate::render::FrameRequester;
use crate::session::{Session, SessionState};
use crate::snippets::{Snippet, SnippetLibrary};

pub const HINT_IDLE: &str = "Start typing to see live metrics.";
pub const HINT_ACTIVE: &str = "Measuring speed and accuracy in real time.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Wires the input field, the snippet catalog and a typing session together
pub struct App<C: Clock = SystemClock> {
    library: SnippetLibrary,
    current: Snippet,
    session: Session<C>,
    input: InputField,
    config: Config,
    store: Box<dyn ConfigStore>,
}

impl<C: Clock> App<C> {
    /// Opens the snippet named by `config.snippet`
    pub fn new(
        library: SnippetLibrary,
        config: Config,
        store: Box<dyn ConfigStore>,
        clock: C,
    ) -> Result<Self> {
        let current = library.get(&config.snippet)?.clone();
        let session = Session::with_clock(current.text.clone(), clock);
        Ok(Self {
            library,
            current,
            session,
            input: InputField::new(),
            config,
            store,
        })
    }

    pub fn set_frame_requester(&mut self, requester: Box<dyn FrameRequester>) {
        self.session.set_frame_requester(requester);
    }

    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn library(&self) -> &SnippetLibrary {
        &self.library
    }

    pub fn current_snippet(&self) -> &Snippet {
        &self.current
    }

    pub fn theme(&self) -> Theme {
        self.config.theme
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn hint(&self) -> &'static str {
        if self.input.is_empty() {
            HINT_IDLE
        } else {
            HINT_ACTIVE
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Control {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            KeyCode::Esc => return Control::Quit,
            KeyCode::Char('c') if ctrl => return Control::Quit,
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::Char('n') if ctrl => self.next_snippet(),
            KeyCode::Char('t') if ctrl => self.toggle_theme(),
            KeyCode::Char(d) if alt && d.is_ascii_digit() && d != '0' => {
                let idx = d as usize - '1' as usize;
                if let Some(id) = self.library.by_index(idx).map(|s| s.id.clone()) {
                    // index is in range, so the lookup cannot fail
                    let _ = self.select_snippet(&id);
                }
            }
            KeyCode::Tab => self.indent(),
            KeyCode::Enter => self.edit(|f| f.insert_char('\n')),
            KeyCode::Backspace => self.edit(InputField::backspace),
            KeyCode::Delete => self.edit(InputField::delete),
            KeyCode::Left => self.input.left(shift),
            KeyCode::Right => self.input.right(shift),
            KeyCode::Home => self.input.home(shift),
            KeyCode::End => self.input.end(shift),
            KeyCode::Char(c) if !ctrl && !alt => self.edit(|f| f.insert_char(c)),
            _ => {}
        }
        Control::Continue
    }

    /// Periodic refresh so the live speed decays while the user pauses
    pub fn on_tick(&mut self) {
        if self.session.state() == SessionState::Active {
            self.session.refresh();
        }
    }

    /// Run the pending render projection. Returns true if the visual changed.
    pub fn on_frame(&mut self) -> bool {
        self.session.render_pending()
    }

    pub fn reset(&mut self) {
        self.input.clear();
        self.session.reset();
    }

    pub fn select_snippet(&mut self, id: &str) -> Result<()> {
        let snippet = self.library.get(id)?.clone();
        self.input.clear();
        self.session.switch_snippet(&snippet);
        self.current = snippet;
        Ok(())
    }

    pub fn next_snippet(&mut self) {
        let next = self.library.next_after(&self.current.id).clone();
        self.input.clear();
        self.session.switch_snippet(&next);
        self.current = next;
    }

    /// Flip the theme and persist it; the rest of the stored config is kept
    pub fn toggle_theme(&mut self) {
        self.config.theme = self.config.theme.toggled();
        info!(theme = %self.config.theme, "theme changed");

        let mut stored = self.store.load();
        stored.theme = self.config.theme;
        if let Err(e) = self.store.save(&stored) {
            warn!(error = %e, "could not persist theme");
        }
    }

    /// Indent gesture: fixed-width spaces at the cursor, replacing the selection
    pub fn indent(&mut self) {
        let (start, end) = self.input.selection_range();
        let spaces = " ".repeat(self.config.indent_width);
        let cursor = self.session.insert_at_cursor(&spaces, start, end);
        self.input.set(self.session.typed(), cursor);
    }

    fn edit(&mut self, f: impl FnOnce(&mut InputField)) {
        f(&mut self.input);
        let text = self.input.text();
        if text != self.session.typed() {
            self.session.record_input(&text);
        }
    }
}
