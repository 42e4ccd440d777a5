// Holder name extraction. Strategies run in a fixed order and the first one
// that produces a name wins.
use super::extractors::{FieldExtractor, BARE_ID_NUMBER_LINE};
use crate::models::rules::{
    contains_any, ENROLMENT_MARKERS, NAME_BOILERPLATE, NAME_EXCLUDED_WORDS, NAME_HEADER_SKIP,
    NAME_NEXT_LINE_BOILERPLATE, RELATION_MARKERS,
};
use crate::models::Extraction;
use crate::processing::tokenizer::{char_len, LineSequence};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

lazy_static! {
    static ref NAME_CHARS: Regex = Regex::new(r"^[A-Za-z\s.'-]+$").unwrap();
    static ref LEADING_DIGIT: Regex = Regex::new(r"^\d+").unwrap();
    static ref NAME_BEFORE_RELATION: Regex =
        Regex::new(r"(?i)([A-Za-z\s]+)\s+(?:D/O|S/O|W/O)").unwrap();
}

type StrategyFn = fn(&LineSequence, &str) -> Option<String>;

pub struct NameStrategy {
    pub label: &'static str,
    run: StrategyFn,
}

impl NameStrategy {
    pub fn apply(&self, lines: &LineSequence, text: &str) -> Option<String> {
        (self.run)(lines, text)
    }
}

pub const NAME_STRATEGIES: &[NameStrategy] = &[
    NameStrategy {
        label: "after enrolment header",
        run: after_enrolment_header,
    },
    NameStrategy {
        label: "proper-case line",
        run: proper_case_line,
    },
    NameStrategy {
        label: "before relation marker",
        run: before_relation_marker,
    },
    NameStrategy {
        label: "repeated word",
        run: repeated_word,
    },
];

/// Runs `strategies` in order and returns the label and value of the first hit.
pub fn first_success<'a>(
    strategies: &'a [NameStrategy],
    lines: &LineSequence,
    text: &str,
) -> Option<(&'a str, String)> {
    strategies
        .iter()
        .find_map(|strategy| strategy.apply(lines, text).map(|name| (strategy.label, name)))
}

impl FieldExtractor {
    pub fn extract_name(text: &str) -> Extraction {
        let lines = LineSequence::from_text(text);
        match first_success(NAME_STRATEGIES, &lines, text) {
            Some((label, name)) => {
                debug!("Found name ({}): {}", label, name);
                Extraction::Found(name)
            }
            None => Extraction::NotFound,
        }
    }
}

/// Whether a line could plausibly be a person's name.
pub fn is_valid_name_line(line: &str) -> bool {
    if !NAME_CHARS.is_match(line) {
        return false;
    }
    let len = char_len(line);
    if !(2..=50).contains(&len) {
        return false;
    }
    if contains_any(&line.to_lowercase(), NAME_EXCLUDED_WORDS) {
        return false;
    }
    // Printed headers are usually set in capitals
    if line == line.to_uppercase() && len > 10 {
        return false;
    }
    line.split_whitespace().count() <= 4
}

/// Every word capitalised, and no word longer than two letters in all caps.
pub fn is_proper_name_case(line: &str) -> bool {
    line.split_whitespace().all(|word| {
        let starts_upper = word.chars().next().map_or(true, |c| !c.is_lowercase());
        starts_upper && !(char_len(word) > 2 && word == word.to_uppercase())
    })
}

fn is_header_noise(line: &str, lower: &str) -> bool {
    let len = char_len(line);
    contains_any(lower, NAME_HEADER_SKIP)
        || LEADING_DIGIT.is_match(line)
        || BARE_ID_NUMBER_LINE.is_match(line)
        || !(2..=50).contains(&len)
}

fn nearest_name_before(lines: &LineSequence, index: usize) -> Option<String> {
    (0..index)
        .rev()
        .map(|j| &lines[j])
        .find(|line| is_valid_name_line(line))
        .map(|line| line.trim().to_string())
}

fn after_enrolment_header(lines: &LineSequence, _text: &str) -> Option<String> {
    let header = (0..lines.len())
        .find(|&index| contains_any(&lines[index].to_lowercase(), ENROLMENT_MARKERS))?;

    for index in header + 1..lines.len() {
        let line = &lines[index];
        let lower = line.to_lowercase();
        if is_header_noise(line, &lower) {
            continue;
        }
        if contains_any(&lower, RELATION_MARKERS) {
            if let Some(name) = nearest_name_before(lines, index) {
                return Some(name);
            }
            continue;
        }
        if is_valid_name_line(line) {
            return Some(line.trim().to_string());
        }
    }
    None
}

fn proper_case_line(lines: &LineSequence, _text: &str) -> Option<String> {
    for index in 0..lines.len() {
        let line = &lines[index];
        if contains_any(&line.to_lowercase(), NAME_BOILERPLATE) {
            continue;
        }
        if !is_valid_name_line(line) || !is_proper_name_case(line) {
            continue;
        }
        let next = lines.get(index + 1).unwrap_or("").to_lowercase();
        if !contains_any(&next, NAME_NEXT_LINE_BOILERPLATE) {
            return Some(line.trim().to_string());
        }
    }
    None
}

fn before_relation_marker(_lines: &LineSequence, text: &str) -> Option<String> {
    let captures = NAME_BEFORE_RELATION.captures(text)?;
    let candidate = captures[1].trim();
    if is_valid_name_line(candidate) {
        Some(candidate.to_string())
    } else {
        None
    }
}

/// Names are often printed twice; the most repeated name word is a last resort.
fn repeated_word(lines: &LineSequence, _text: &str) -> Option<String> {
    let name_lines: Vec<&str> = lines.iter().filter(|line| is_valid_name_line(line)).collect();

    // Insertion order is kept so ties go to the word seen first
    let mut counts: Vec<(String, usize)> = Vec::new();
    for word in name_lines.iter().flat_map(|line| line.split_whitespace()) {
        if char_len(word) <= 2 {
            continue;
        }
        let lower = word.to_lowercase();
        match counts.iter_mut().find(|(seen, _)| *seen == lower) {
            Some(entry) => entry.1 += 1,
            None => counts.push((lower, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (word, count) in &counts {
        if *count > 1 && best.map_or(true, |(_, top)| *count > top) {
            best = Some((word.as_str(), *count));
        }
    }
    let (word, _) = best?;

    name_lines
        .iter()
        .flat_map(|line| line.split_whitespace())
        .find(|candidate| candidate.to_lowercase() == word)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> LineSequence {
        LineSequence::from_text(text)
    }

    #[test]
    fn name_validity_rules() {
        assert!(is_valid_name_line("Rahul Sharma"));
        assert!(is_valid_name_line("R. K. Verma"));
        assert!(!is_valid_name_line("Rahul 42"));
        assert!(!is_valid_name_line("A"));
        assert!(!is_valid_name_line("Government of India"));
        assert!(!is_valid_name_line("RAHUL SHARMA"));
        assert!(is_valid_name_line("RAHUL RAJ"));
        assert!(!is_valid_name_line("Ravi Ravi Ravi Ravi Ravi"));
        assert!(!is_valid_name_line("Female"));
    }

    #[test]
    fn proper_case_rules() {
        assert!(is_proper_name_case("Rahul Sharma"));
        assert!(is_proper_name_case("R. K. Verma"));
        assert!(!is_proper_name_case("rahul Sharma"));
        assert!(!is_proper_name_case("RAHUL Sharma"));
    }

    #[test]
    fn strategy_order_is_fixed() {
        let labels: Vec<&str> = NAME_STRATEGIES.iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec!["after enrolment header", "proper-case line", "before relation marker", "repeated word"]
        );
    }

    #[test]
    fn name_after_enrolment_header() {
        let text = "Enrolment No.: 1111/22222/33333\nMobile: 9876543210\nAnita Kumari\nS/O Vijay";
        assert_eq!(after_enrolment_header(&lines(text), text), Some("Anita Kumari".to_string()));
        assert_eq!(FieldExtractor::extract_name(text), "Anita Kumari");
    }

    #[test]
    fn name_before_relation_line_after_header() {
        let text = "Enrolment No.: 1111/22222/33333\n1234 5678 9012\nsuresh babu\nD/O: Harish";
        // suresh babu is name-valid, so the forward scan returns it before the relation line
        assert_eq!(after_enrolment_header(&lines(text), text), Some("suresh babu".to_string()));

        let text = "Sunita Rai\nEnrolment No.: 1111/22222/33333\nD/O: Harish";
        assert_eq!(after_enrolment_header(&lines(text), text), Some("Sunita Rai".to_string()));
    }

    #[test]
    fn proper_case_fallback() {
        let text = "GOVERNMENT OF INDIA\nPriya Verma\nDOB: 21/09/1992\nFEMALE";
        assert_eq!(FieldExtractor::extract_name(text), "Priya Verma");
    }

    #[test]
    fn proper_case_skips_line_before_header() {
        let text = "Ravi Teja\nGovernment of India";
        assert_eq!(proper_case_line(&lines(text), text), None);
    }

    #[test]
    fn relation_prefix_fallback() {
        let text = "ramesh kumar S/O vikas";
        assert_eq!(proper_case_line(&lines(text), text), None);
        assert_eq!(FieldExtractor::extract_name(text), "ramesh kumar");
    }

    #[test]
    fn repeated_word_fallback() {
        let text = "vikram\n12 vikram road\nvikram";
        assert_eq!(repeated_word(&lines(text), text), Some("vikram".to_string()));
        assert_eq!(FieldExtractor::extract_name(text), "vikram");
    }

    #[test]
    fn not_found_without_name_lines() {
        let text = "GOVERNMENT OF INDIA\n2345 6789 0124\nDOB: 01/01/1990\nMALE";
        assert_eq!(FieldExtractor::extract_name(text), Extraction::NotFound);
        assert_eq!(FieldExtractor::extract_name(""), Extraction::NotFound);
    }
}
