pub mod palette;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::classify::SPACE_GLYPH;
use crate::clock::Clock;
use crate::render::RenderFrame;
use palette::Palette;

const HORIZONTAL_MARGIN: u16 = 1;
const EMPTY_VISUAL: &str = "Start typing.";
const LEGEND: &str =
    "(tab) indent  (ctrl+r) reset  (ctrl+n) next  (alt+1-9) pick  (ctrl+t) theme  (esc) quit";

/// Draw the app and place the terminal cursor at the input cursor
pub fn draw<C: Clock>(app: &App<C>, f: &mut Frame) {
    let area = f.area();
    f.render_widget(app, area);

    let visual = visual_area(layout(area)[1]);
    let (col, line) = cursor_offset(app);
    let (scroll_y, scroll_x) = scroll_for(col, line, visual);
    if visual.width > 0 && visual.height > 0 {
        f.set_cursor_position((
            visual.x + col.saturating_sub(scroll_x),
            visual.y + line.saturating_sub(scroll_y),
        ));
    }
}

fn layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(1), // snippet chips
            Constraint::Min(3),    // typing visual
            Constraint::Length(1), // metrics
            Constraint::Length(1), // progress
            Constraint::Length(1), // hint
            Constraint::Length(1), // legend
        ])
        .split(area)
}

fn visual_area(outer: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(outer)
}

/// Display (column, line) of the input cursor inside the visual.
///
/// Chars before the cursor are typed, so their display glyphs are the typed
/// chars themselves, with spaces and tabs drawn as one-column placeholders.
pub fn cursor_offset<C: Clock>(app: &App<C>) -> (u16, u16) {
    let (line, _) = app.input().cursor_line_col();
    let before: String = app
        .input()
        .line_before_cursor()
        .chars()
        .map(|c| if c == '\t' || c == ' ' { SPACE_GLYPH } else { c })
        .collect();
    (
        before.width().min(u16::MAX as usize) as u16,
        line.min(u16::MAX as usize) as u16,
    )
}

/// (vertical, horizontal) scroll that keeps the cursor inside `area`
pub fn scroll_for(col: u16, line: u16, area: Rect) -> (u16, u16) {
    let y = line.saturating_sub(area.height.saturating_sub(1));
    let x = col.saturating_sub(area.width.saturating_sub(1));
    (y, x)
}

fn visual_lines<'a>(frame: &'a RenderFrame, palette: &Palette) -> Vec<Line<'a>> {
    if frame.is_empty() {
        return vec![Line::from(Span::styled(EMPTY_VISUAL, palette.pending))];
    }
    frame
        .lines
        .iter()
        .map(|l| {
            Line::from(
                l.tokens
                    .iter()
                    .map(|t| Span::styled(t.text.as_str(), palette.token_style(t.class, t.is_space)))
                    .collect::<Vec<Span>>(),
            )
        })
        .collect()
}

impl<C: Clock> Widget for &App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = Palette::for_theme(self.theme());
        let session = self.session();
        let metrics = session.metrics();

        Block::default().style(palette.base).render(area, buf);
        let chunks = layout(area);

        let chips = self
            .library()
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let style = if s.id == self.current_snippet().id {
                    palette.chip_active
                } else {
                    palette.chip
                };
                Span::styled(format!(" {}:{} ", i + 1, s.id), style)
            })
            .collect::<Vec<Span>>();
        Paragraph::new(Line::from(chips)).render(chunks[0], buf);

        let visual = visual_area(chunks[1]);
        let (col, line) = cursor_offset(self);
        let scroll = scroll_for(col, line, visual);
        let title = Span::styled(format!(" {} ", self.current_snippet().title), palette.accent);
        Paragraph::new(visual_lines(session.frame(), &palette))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(palette.muted)
                    .title(title),
            )
            .scroll(scroll)
            .render(chunks[1], buf);

        Paragraph::new(Span::styled(metrics.summary(), palette.accent))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        let progress = metrics.progress_percent.clamp(0.0, 100.0);
        Gauge::default()
            .gauge_style(palette.gauge)
            .ratio(progress / 100.0)
            .label(format!("{}%", progress.round()))
            .render(chunks[3], buf);

        Paragraph::new(Span::styled(self.hint(), palette.muted))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        Paragraph::new(Span::styled(LEGEND, palette.muted)).render(chunks[5], buf);
    }
}
