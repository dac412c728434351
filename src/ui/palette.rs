use ratatui::style::{Color, Modifier, Style};

use crate::classify::CharClass;
use crate::config::Theme;

/// Colours for one theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub base: Style,
    pub correct: Style,
    pub wrong: Style,
    pub pending: Style,
    pub extra: Style,
    pub accent: Style,
    pub muted: Style,
    pub chip: Style,
    pub chip_active: Style,
    pub gauge: Style,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        match theme {
            Theme::Dark => Self {
                base: Style::default().fg(Color::Gray).bg(Color::Black),
                correct: bold.fg(Color::Green),
                wrong: bold.fg(Color::Red),
                pending: Style::default().fg(Color::DarkGray),
                extra: bold.fg(Color::White).bg(Color::Red),
                accent: bold.fg(Color::Cyan),
                muted: Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
                chip: Style::default().fg(Color::Gray),
                chip_active: bold.fg(Color::Black).bg(Color::Cyan),
                gauge: Style::default().fg(Color::Cyan).bg(Color::Black),
            },
            Theme::Light => Self {
                base: Style::default().fg(Color::Black).bg(Color::White),
                correct: bold.fg(Color::Rgb(0, 128, 0)),
                wrong: bold.fg(Color::Rgb(200, 0, 0)),
                pending: Style::default().fg(Color::Gray),
                extra: bold.fg(Color::White).bg(Color::Rgb(200, 0, 0)),
                accent: bold.fg(Color::Blue),
                muted: Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
                chip: Style::default().fg(Color::DarkGray),
                chip_active: bold.fg(Color::White).bg(Color::Blue),
                gauge: Style::default().fg(Color::Blue).bg(Color::White),
            },
        }
    }

    pub fn token_style(&self, class: CharClass, is_space: bool) -> Style {
        let style = match class {
            CharClass::Correct => self.correct,
            CharClass::Wrong => self.wrong,
            CharClass::Pending => self.pending,
            CharClass::Extra => self.extra,
        };
        match class {
            // placeholders for expected or matched whitespace recede
            CharClass::Correct | CharClass::Pending if is_space => style.add_modifier(Modifier::DIM),
            _ => style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_placeholders_dimmed() {
        let p = Palette::for_theme(Theme::Dark);
        assert!(p
            .token_style(CharClass::Pending, true)
            .add_modifier
            .contains(Modifier::DIM));
        assert!(!p
            .token_style(CharClass::Wrong, true)
            .add_modifier
            .contains(Modifier::DIM));
    }

    #[test]
    fn test_themes_differ() {
        assert_ne!(
            Palette::for_theme(Theme::Dark),
            Palette::for_theme(Theme::Light)
        );
    }
}
