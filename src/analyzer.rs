use itertools::Itertools;

/// Label every whitespace mismatch is counted under
pub const WHITESPACE_LABEL: &str = "space";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Analysis {
    pub mistakes: usize,
    pub accuracy_percent: u8,
    /// Most frequent mismatched char, empty when there are no mismatches
    pub pattern: String,
}

impl Default for Analysis {
    fn default() -> Self {
        Self {
            mistakes: 0,
            accuracy_percent: 100,
            pattern: String::new(),
        }
    }
}

/// Compare `typed` against `target` position by position.
///
/// Positions past the end of the target count as mismatches.
pub fn analyze(typed: &str, target: &str) -> Analysis {
    let typed: Vec<char> = typed.chars().collect();
    if typed.is_empty() {
        return Analysis::default();
    }
    let target: Vec<char> = target.chars().collect();

    let mismatches = typed
        .iter()
        .enumerate()
        .filter(|&(i, c)| target.get(i) != Some(c))
        .map(|(_, &c)| c)
        .collect::<Vec<char>>();

    let mistakes = mismatches.len();
    let correct = typed.len().saturating_sub(mistakes) as f64;
    let accuracy = (correct / typed.len() as f64 * 100.0).max(0.0).round();

    Analysis {
        mistakes,
        accuracy_percent: accuracy.min(100.0) as u8,
        pattern: detect_pattern(&mismatches),
    }
}

/// Most frequent mismatch label; equal counts keep first-occurrence order.
pub fn detect_pattern(mismatches: &[char]) -> String {
    let mut counts: Vec<(String, usize)> = vec![];
    for &c in mismatches {
        let label = if c.is_whitespace() {
            WHITESPACE_LABEL.to_string()
        } else {
            c.to_string()
        };
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }

    counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1))
        .next()
        .map(|(label, _)| label)
        .unwrap_or_default()
}

/// Share of the target typed so far, clamped to [0, 100].
pub fn progress_percent(typed_len: usize, target_len: usize) -> f64 {
    if target_len == 0 {
        return 0.0;
    }
    (typed_len as f64 / target_len as f64 * 100.0).clamp(0.0, 100.0)
}
