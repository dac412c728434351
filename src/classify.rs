/// Glyph shown in place of a space or tab so the visual stays aligned
pub const SPACE_GLYPH: char = '·';

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum CharClass {
    Correct,
    Wrong,
    Pending,
    Extra,
}

/// Classification of a single position in the typing visual
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterClassification {
    pub class: CharClass,
    /// target char for correct/pending positions, typed char for wrong/extra
    pub display: char,
    pub is_space: bool,
}

impl CharacterClassification {
    fn new(class: CharClass, display: char) -> Self {
        Self {
            class,
            display,
            is_space: is_space(display),
        }
    }

    /// Char to draw, with spaces and tabs swapped for the placeholder glyph
    pub fn glyph(&self) -> char {
        if self.is_space {
            SPACE_GLYPH
        } else {
            self.display
        }
    }
}

fn is_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Classify every position of `max(len(target), len(typed))`.
pub fn classify(target: &str, typed: &str) -> Vec<CharacterClassification> {
    let target: Vec<char> = target.chars().collect();
    let typed: Vec<char> = typed.chars().collect();
    let n = target.len().max(typed.len());

    (0..n)
        .filter_map(|i| {
            let (class, display) = match (target.get(i), typed.get(i)) {
                (None, Some(&t)) => (CharClass::Extra, t),
                (Some(&e), None) => (CharClass::Pending, e),
                (Some(&e), Some(&t)) if e == t => (CharClass::Correct, e),
                (Some(_), Some(&t)) => (CharClass::Wrong, t),
                (None, None) => return None,
            };
            Some(CharacterClassification::new(class, display))
        })
        .collect()
}
