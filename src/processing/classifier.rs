use crate::models::rules::{
    contains_any, Indicator, IndicatorRule, BACK_INDICATORS, CONTACT_TOKENS, DOB_GENDER_TOKENS,
    FRONT_INDICATORS, SIDE_POLICY_VERSION, SIDE_SCORE_THRESHOLD,
};
use crate::models::SideLabel;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

lazy_static! {
    static ref GROUPED_ID_NUMBER: Regex =
        Regex::new(r"\b[0-9]{4}\s?[0-9]{4}\s?[0-9]{4}\b").unwrap();
    static ref PIN_CODE: Regex = Regex::new(r"\b[0-9]{6}\b").unwrap();
    // 1947 alone, or a 1800 toll-free number; not a year inside a date or a PIN like 180001
    static ref HELPLINE: Regex =
        Regex::new(r"(?:^|\s)(?:1947(?:\s|$)|1800[\s-][0-9])").unwrap();
}

/// Weighted indicator totals behind a side decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideScore {
    pub front: u32,
    pub back: u32,
    pub label: SideLabel,
}

pub struct SideClassifier;

impl SideClassifier {
    pub fn classify(text: &str) -> SideLabel {
        Self::score(text).label
    }

    pub fn score(text: &str) -> SideScore {
        let lower = text.to_lowercase();
        let front = Self::total(FRONT_INDICATORS, text, &lower);
        let back = Self::total(BACK_INDICATORS, text, &lower);
        let label = Self::decide(front, back, text, &lower);
        debug!(
            "Side scores (policy v{}): front={} back={} -> {}",
            SIDE_POLICY_VERSION, front, back, label
        );
        SideScore { front, back, label }
    }

    fn total(rules: &[IndicatorRule], raw: &str, lower: &str) -> u32 {
        rules
            .iter()
            .filter(|rule| Self::matches(rule.indicator, raw, lower))
            .map(|rule| rule.weight)
            .sum()
    }

    fn matches(indicator: Indicator, raw: &str, lower: &str) -> bool {
        match indicator {
            Indicator::AnyOf(tokens) => contains_any(lower, tokens),
            Indicator::GroupedIdNumber => has_id_number(raw),
            Indicator::PinCode => PIN_CODE.is_match(lower),
            Indicator::Contact => has_contact(lower),
        }
    }

    fn decide(front: u32, back: u32, raw: &str, lower: &str) -> SideLabel {
        if front > back && front >= SIDE_SCORE_THRESHOLD {
            return SideLabel::Front;
        }
        if back > front && back >= SIDE_SCORE_THRESHOLD {
            return SideLabel::Back;
        }
        if front == back && front > 0 {
            if has_contact(lower) {
                return SideLabel::Back;
            }
            if has_id_number(raw) && contains_any(lower, DOB_GENDER_TOKENS) {
                return SideLabel::Front;
            }
        }
        SideLabel::Unknown
    }
}

/// A 12-digit number printed 4-4-4 or run together.
pub fn has_id_number(text: &str) -> bool {
    GROUPED_ID_NUMBER.is_match(text)
}

pub fn has_pin_code(text: &str) -> bool {
    PIN_CODE.is_match(text)
}

/// Website, help mail or helpline number. `lower` must already be lowercased.
pub fn has_contact(lower: &str) -> bool {
    contains_any(lower, CONTACT_TOKENS) || HELPLINE.is_match(lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRONT: &str = "Government of India\nRahul Sharma\nDOB: 01/01/1990\nMALE\n2345 6789 0124";
    const BACK: &str = "Unique Identification Authority of India\nwww.uidai.gov.in\nAddress: 123 Main St";

    #[test]
    fn front_face_is_front() {
        let score = SideClassifier::score(FRONT);
        assert_eq!(score.front, 9);
        assert_eq!(score.back, 0);
        assert_eq!(score.label, SideLabel::Front);
    }

    #[test]
    fn back_face_is_back() {
        assert_eq!(SideClassifier::classify(BACK), SideLabel::Back);
        assert_eq!(SideClassifier::classify("help@uidai.gov.in\nAddress: 123 Main St"), SideLabel::Back);
    }

    #[test]
    fn classification_is_deterministic() {
        for text in [FRONT, BACK, "", "noise"] {
            assert_eq!(SideClassifier::classify(text), SideClassifier::classify(text));
        }
    }

    #[test]
    fn weak_evidence_is_unknown() {
        assert_eq!(SideClassifier::classify(""), SideLabel::Unknown);
        // Front 2 vs back 0: below threshold
        assert_eq!(SideClassifier::classify("Government of India"), SideLabel::Unknown);
    }

    #[test]
    fn tie_with_contact_token_is_back() {
        // front: birth date 2; back: contact 2
        let score = SideClassifier::score("DOB\nwww.example.in");
        assert_eq!((score.front, score.back), (2, 2));
        assert_eq!(score.label, SideLabel::Back);
    }

    #[test]
    fn tie_with_number_and_dob_is_front() {
        // front: id number 3 + gender 2 = 5; back: address 3 + unique authority 2 = 5
        let text = "2345 6789 0124\nMale\nAddress\nUnique Identification Authority";
        let score = SideClassifier::score(text);
        assert_eq!((score.front, score.back), (5, 5));
        assert_eq!(score.label, SideLabel::Front);
    }

    #[test]
    fn tie_without_tie_breakers_is_unknown() {
        // front: gender 2; back: issuing authority 2
        let text = "Female\nUnique Identification Authority";
        assert_eq!(SideClassifier::classify(text), SideLabel::Unknown);
    }

    #[test]
    fn number_detection() {
        assert!(has_id_number("2345 6789 0124"));
        assert!(has_id_number("234567890124"));
        assert!(!has_id_number("2345 6789"));
        assert!(has_pin_code("Lucknow - 226001"));
        assert!(!has_pin_code("234567890124"));
    }

    #[test]
    fn helpline_numbers_must_stand_alone() {
        assert!(has_contact("call 1947 for help"));
        assert!(has_contact("1800-300-1947"));
        assert!(has_contact("toll free 1800 180 1947"));
        assert!(!has_contact("jammu 180001"));
        assert!(!has_contact("dob: 01/01/1947"));
        assert!(!has_contact("year of birth 19470"));
    }

    #[test]
    fn pin_starting_with_1800_is_not_a_helpline() {
        // back: issuing authority 2 + pin 1, no contact
        let score = SideClassifier::score("Female\nUnique Identification Authority\n180001");
        assert_eq!((score.front, score.back), (2, 3));
    }
}
