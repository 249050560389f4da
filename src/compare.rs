//! Side-by-side view of the curated answer and the current one.

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

use crate::simulator::example::FINAL_RESPONSE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Same,
    Removed,
    Added,
}

impl LineKind {
    fn prefix(&self) -> char {
        match self {
            LineKind::Same => ' ',
            LineKind::Removed => '-',
            LineKind::Added => '+',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub kind: LineKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub baseline: String,
    pub current: String,
    pub lines: Vec<DiffLine>,
    /// Fraction of lines the two answers share, in `[0, 1]`
    pub similarity: f32,
}

impl Comparison {
    pub fn new(baseline: &str, current: &str) -> Self {
        let diff = TextDiff::from_lines(baseline, current);
        let lines = diff
            .iter_all_changes()
            .map(|change| DiffLine {
                kind: match change.tag() {
                    ChangeTag::Equal => LineKind::Same,
                    ChangeTag::Delete => LineKind::Removed,
                    ChangeTag::Insert => LineKind::Added,
                },
                text: change.value().trim_end_matches(['\r', '\n']).to_string(),
            })
            .collect();

        Self {
            baseline: baseline.to_string(),
            current: current.to_string(),
            lines,
            similarity: diff.ratio(),
        }
    }

    /// Compare against the curated Tokyo itinerary.
    pub fn against_example(current: &str) -> Self {
        Self::new(FINAL_RESPONSE, current)
    }

    pub fn is_identical(&self) -> bool {
        self.lines.iter().all(|l| l.kind == LineKind::Same)
    }

    /// Unified-style rendering with `-`, `+` and ` ` prefixes.
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("{}{}", l.kind.prefix(), l.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_answers() {
        let cmp = Comparison::against_example(FINAL_RESPONSE);
        assert!(cmp.is_identical());
        assert_eq!(cmp.similarity, 1.0);
        assert!(cmp.render().lines().all(|l| l.starts_with(' ')));
    }

    #[test]
    fn test_changed_line() {
        let cmp = Comparison::new("a\nb\nc", "a\nx\nc");
        assert_eq!(cmp.render(), " a\n-b\n+x\n c");
        assert!(!cmp.is_identical());
        assert!(cmp.similarity < 1.0);
    }

    #[test]
    fn test_simulated_answer_differs_from_example() {
        let sim = crate::simulator::simulate("Plan a weekend in Lisbon");
        let cmp = Comparison::against_example(sim.final_response());
        assert!(cmp.lines.iter().any(|l| l.kind == LineKind::Removed));
        assert!(cmp.lines.iter().any(|l| l.kind == LineKind::Added));
    }

    #[test]
    fn test_empty_current() {
        let cmp = Comparison::new("only line", "");
        assert_eq!(cmp.render(), "-only line");
    }
}
