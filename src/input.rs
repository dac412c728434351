/// Editable text field feeding whole-buffer snapshots to a session.
///
/// Cursor and selection are char indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    chars: Vec<char>,
    cursor: usize,
    anchor: Option<usize>,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Ordered `(start, end)` of the selection, or `(cursor, cursor)` when none
    pub fn selection_range(&self) -> (usize, usize) {
        match self.anchor {
            Some(a) if a != self.cursor => (a.min(self.cursor), a.max(self.cursor)),
            _ => (self.cursor, self.cursor),
        }
    }

    pub fn has_selection(&self) -> bool {
        let (start, end) = self.selection_range();
        start != end
    }

    /// Replace the content, e.g. after a session applied an insertion
    pub fn set(&mut self, text: &str, cursor: usize) {
        self.chars = text.chars().collect();
        self.cursor = cursor.min(self.chars.len());
        self.anchor = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    /// Insert at the cursor, replacing any selection
    pub fn insert_str(&mut self, s: &str) {
        let (start, end) = self.selection_range();
        let inserted: Vec<char> = s.chars().collect();
        let n = inserted.len();
        self.chars.splice(start..end, inserted);
        self.cursor = start + n;
        self.anchor = None;
    }

    pub fn backspace(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.cursor > 0 {
            self.chars.remove(self.cursor - 1);
            self.cursor -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    fn delete_selection(&mut self) -> bool {
        let (start, end) = self.selection_range();
        self.anchor = None;
        if start == end {
            return false;
        }
        self.chars.drain(start..end);
        self.cursor = start;
        true
    }

    fn move_to(&mut self, pos: usize, select: bool) {
        if select {
            self.anchor.get_or_insert(self.cursor);
        } else {
            self.anchor = None;
        }
        self.cursor = pos.min(self.chars.len());
    }

    pub fn left(&mut self, select: bool) {
        self.move_to(self.cursor.saturating_sub(1), select);
    }

    pub fn right(&mut self, select: bool) {
        self.move_to(self.cursor + 1, select);
    }

    /// Start of the current line
    pub fn home(&mut self, select: bool) {
        let start = self.chars[..self.cursor]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1);
        self.move_to(start, select);
    }

    /// End of the current line
    pub fn end(&mut self, select: bool) {
        let end = self.chars[self.cursor..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(self.chars.len(), |i| self.cursor + i);
        self.move_to(end, select);
    }

    /// Zero-based (line, column) of the cursor, in chars
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.chars[..self.cursor];
        let line = before.iter().filter(|&&c| c == '\n').count();
        let col = before.iter().rev().take_while(|&&c| c != '\n').count();
        (line, col)
    }

    /// Chars between the start of the cursor's line and the cursor
    pub fn line_before_cursor(&self) -> String {
        let before = &self.chars[..self.cursor];
        let start = before.iter().rposition(|&c| c == '\n').map_or(0, |i| i + 1);
        before[start..].iter().collect()
    }
}
