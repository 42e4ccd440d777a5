use lazy_static::lazy_static;
use regex::Regex;
use std::ops::Index;

lazy_static! {
    static ref NON_DIGIT: Regex = Regex::new(r"[^0-9\s]").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Trimmed, non-blank lines of a transcript in their original order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineSequence {
    lines: Vec<String>,
}

impl LineSequence {
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        LineSequence { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }
}

impl Index<usize> for LineSequence {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.lines[index]
    }
}

/// Replaces every non-digit with a space and collapses whitespace runs,
/// leaving only digit groups separated by single spaces.
pub fn digits_only(text: &str) -> String {
    let spaced = NON_DIGIT.replace_all(text, " ");
    WHITESPACE_RUN.replace_all(&spaced, " ").into_owned()
}

/// Character length as a reader counts it, not bytes.
pub fn char_len(line: &str) -> usize {
    line.chars().count()
}
