// Field-specific extraction functions for the card transcripts
use crate::models::rules::{
    contains_any, ADDRESS_EXCLUDED_WORDS, ADDRESS_STOP_WORD, DAUGHTER_OF, GENDER_WORDS,
    MAX_ADDRESS_LINES, RELATION_MARKERS,
};
use crate::models::Extraction;
use crate::processing::tokenizer::{char_len, digits_only, LineSequence};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

lazy_static! {
    // Digit groupings tried in order over the digits-only transcript
    static ref ID_NUMBER_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"\b([0-9]{4})\s+([0-9]{4})\s+([0-9]{4})\b").unwrap(),
        Regex::new(r"\b([0-9]{4})([0-9]{4})([0-9]{4})\b").unwrap(),
        Regex::new(r"\b([0-9]{3})\s+([0-9]{3})\s+([0-9]{3})\s+([0-9]{3})\b").unwrap(),
    ];

    // Labelled birth dates; the last one is an unseparated DDMMYYYY run.
    // ASCII digits only: other scripts never pass the date check downstream.
    static ref DOB_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)DOB\s*:?\s*([0-9]{2}[/\-][0-9]{2}[/\-][0-9]{4})").unwrap(),
        Regex::new(r"(?i)Date\s+of\s+Birth\s*:?\s*([0-9]{2}[/\-][0-9]{2}[/\-][0-9]{4})").unwrap(),
        Regex::new(r"(?i)Birth\s*:?\s*([0-9]{2}[/\-][0-9]{2}[/\-][0-9]{4})").unwrap(),
        Regex::new(r"(?i)DOB\s*:?\s*([0-9]{2})([0-9]{2})([0-9]{4})").unwrap(),
    ];

    static ref BARE_DATE: Regex = Regex::new(r"([0-9]{2}[/\-][0-9]{2}[/\-][0-9]{4})").unwrap();

    pub(crate) static ref BARE_ID_NUMBER_LINE: Regex =
        Regex::new(r"^[0-9]{4}\s?[0-9]{4}\s?[0-9]{4}$").unwrap();
}

/// Stateless heuristics that pull card fields out of OCR transcripts.
pub struct FieldExtractor;

impl FieldExtractor {
    /// 12-digit ID number, looked up across 4-4-4, contiguous and 3-3-3-3 groupings.
    pub fn extract_id_number(text: &str) -> Extraction {
        let clean = digits_only(text);
        for pattern in ID_NUMBER_PATTERNS.iter() {
            for captures in pattern.captures_iter(&clean) {
                let number: String = captures
                    .iter()
                    .skip(1)
                    .flatten()
                    .map(|group| group.as_str())
                    .collect();
                if number.len() == 12 {
                    debug!("Found ID number: {}", number);
                    return Extraction::Found(number);
                }
            }
        }
        Extraction::NotFound
    }

    /// Date of birth from a labelled field, else from a date printed next to the gender.
    pub fn extract_date_of_birth(text: &str) -> Extraction {
        for pattern in DOB_PATTERNS.iter() {
            if let Some(captures) = pattern.captures(text) {
                let dob = if captures.len() == 4 {
                    format!("{}/{}/{}", &captures[1], &captures[2], &captures[3])
                } else {
                    captures[1].to_string()
                };
                debug!("Found DOB: {}", dob);
                return Extraction::Found(dob);
            }
        }

        let lines = LineSequence::from_text(text);
        for index in 0..lines.len() {
            if !contains_any(&lines[index].to_lowercase(), GENDER_WORDS) {
                continue;
            }
            if let Some(dob) = date_near(&lines, index) {
                debug!("Found DOB near gender: {}", dob);
                return Extraction::Found(dob);
            }
        }
        Extraction::NotFound
    }

    /// Address block following the relation line, joined with ", ".
    pub fn extract_address(text: &str) -> Extraction {
        let lines = LineSequence::from_text(text);
        let parts = address_lines(&lines);
        if parts.is_empty() {
            return Extraction::NotFound;
        }
        let address = parts.join(", ").trim().to_string();
        debug!("Found address: {}", address);
        Extraction::Found(address)
    }
}

pub(crate) fn is_relation_line(line: &str) -> bool {
    contains_any(&line.to_lowercase(), RELATION_MARKERS)
}

/// First bare date on the gender line or the two lines above it, top line first.
fn date_near(lines: &LineSequence, gender_index: usize) -> Option<String> {
    (gender_index.saturating_sub(2)..=gender_index)
        .find_map(|index| BARE_DATE.captures(&lines[index]).map(|c| c[1].to_string()))
}

fn is_address_line(line: &str) -> bool {
    char_len(line) > 2
        && !contains_any(&line.to_lowercase(), ADDRESS_EXCLUDED_WORDS)
        && !BARE_ID_NUMBER_LINE.is_match(line)
}

fn address_lines(lines: &LineSequence) -> Vec<&str> {
    let start = match (0..lines.len()).find(|&index| is_relation_line(&lines[index])) {
        Some(index) => index,
        None => return Vec::new(),
    };

    let mut parts = Vec::new();
    for index in start + 1..lines.len() {
        let line = &lines[index];
        // A bare D/O line puts the parent's name on the next line
        if is_relation_line(line) || lines[index - 1].to_lowercase().contains(DAUGHTER_OF) {
            continue;
        }
        if is_address_line(line) {
            parts.push(line);
        }
        if parts.len() >= MAX_ADDRESS_LINES || line.to_lowercase().contains(ADDRESS_STOP_WORD) {
            break;
        }
    }
    parts
}
