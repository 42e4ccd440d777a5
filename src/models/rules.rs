// Keyword and indicator tables shared by the extractors, the side classifier
// and the content validator. Editing any of these shifts extraction and
// classification outcomes; bump SIDE_POLICY_VERSION when the indicator tables
// or thresholds change.

/// Revision of the side indicator weights and decision thresholds.
pub const SIDE_POLICY_VERSION: u32 = 1;

/// Minimum winning score for a confident side decision.
pub const SIDE_SCORE_THRESHOLD: u32 = 3;

/// Abbreviations that anchor the parent/spouse line ("daughter of", "son of", "wife of").
pub const RELATION_MARKERS: &[&str] = &["d/o", "s/o", "w/o"];

/// Printed alone on its line, with the parent's name on the line below.
pub const DAUGHTER_OF: &str = "d/o";

/// Marks the enrolment header printed above the holder's name on letter-style cards.
pub const ENROLMENT_MARKERS: &[&str] = &["enrolment", "enrollment"];

/// Lines after the enrolment header that can never be the name line.
pub const NAME_HEADER_SKIP: &[&str] = &[
    "government",
    "authority",
    "india",
    "unique identification",
    "enrolment",
    "enrollment",
    "no.",
    "mobile",
    "phone",
    "aadhaar",
    "dob",
    "date",
    "birth",
    "female",
    "male",
];

/// Substrings that disqualify a line from being a person's name.
pub const NAME_EXCLUDED_WORDS: &[&str] = &[
    "government",
    "authority",
    "india",
    "unique",
    "identification",
    "enrolment",
    "enrollment",
    "aadhaar",
    "mobile",
    "phone",
    "address",
    "dob",
    "date",
    "birth",
    "male",
    "female",
    "pin",
    "code",
    "state",
    "district",
    "kerala",
    "kannur",
    "your",
    "no",
    "card",
    "helps",
    "valid",
    "throughout",
    "country",
    "avail",
    "various",
    "services",
    "carry",
    "smart",
    "keep",
    "updated",
    "email",
];

/// Institutional boilerplate skipped by the proper-case name scan.
pub const NAME_BOILERPLATE: &[&str] = &[
    "government",
    "authority",
    "india",
    "unique identification",
    "enrolment",
    "aadhaar",
];

/// Next-line tokens that reveal a candidate name line is really a header.
pub const NAME_NEXT_LINE_BOILERPLATE: &[&str] = &["government", "authority"];

/// Lines inside the address block that are not part of the address.
pub const ADDRESS_EXCLUDED_WORDS: &[&str] = &[
    "government",
    "authority",
    "mobile",
    "aadhaar",
    "dob",
    "female",
    "male",
];

/// A line containing this token closes the address block.
pub const ADDRESS_STOP_WORD: &str = "mobile";

pub const MAX_ADDRESS_LINES: usize = 5;

/// Gender words that sit next to the birth date on the card face.
pub const GENDER_WORDS: &[&str] = &["female", "male"];

/// Proof that a transcript comes from the issuing authority's card at all.
pub const INSTITUTIONAL_TOKENS: &[&str] = &[
    "government",
    "govt",
    "india",
    "unique identification",
    "uidai",
    "aadhaar",
    "aadhar",
];

/// Personal details printed on the front face.
pub const PERSONAL_INFO_TOKENS: &[&str] = &["dob", "date", "birth", "male", "female"];

/// Words that only appear around a postal address.
pub const ADDRESS_CONTEXT_TOKENS: &[&str] = &[
    "address",
    "s/o",
    "d/o",
    "w/o",
    "c/o",
    "district",
    "village",
    "street",
    "road",
];

/// Website and mail tokens printed on the back face. The helpline numbers
/// (1947, 1800 toll-free) are matched as whole tokens by the classifier.
pub const CONTACT_TOKENS: &[&str] = &["uidai.gov.in", "www.", "help@"];

/// Birth-date and gender tokens used by the side tie-break.
pub const DOB_GENDER_TOKENS: &[&str] = &["dob", "date of birth", "year of birth", "male", "female"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Any of the substrings occurs in the lowercased transcript.
    AnyOf(&'static [&'static str]),
    /// A 12-digit ID number, grouped 4-4-4 or contiguous.
    GroupedIdNumber,
    /// A standalone 6-digit postal code.
    PinCode,
    /// A website or mail token, or a helpline number standing on its own.
    Contact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorRule {
    pub name: &'static str,
    pub indicator: Indicator,
    pub weight: u32,
}

pub const FRONT_INDICATORS: &[IndicatorRule] = &[
    IndicatorRule {
        name: "government header",
        indicator: Indicator::AnyOf(&["government of india", "govt of india", "govt. of india"]),
        weight: 2,
    },
    IndicatorRule {
        name: "birth date",
        indicator: Indicator::AnyOf(&["dob", "date of birth", "year of birth"]),
        weight: 2,
    },
    IndicatorRule {
        name: "gender",
        indicator: Indicator::AnyOf(&["male", "female", "transgender"]),
        weight: 2,
    },
    IndicatorRule {
        name: "id number",
        indicator: Indicator::GroupedIdNumber,
        weight: 3,
    },
];

pub const BACK_INDICATORS: &[IndicatorRule] = &[
    IndicatorRule {
        name: "address label",
        indicator: Indicator::AnyOf(&["address"]),
        weight: 3,
    },
    IndicatorRule {
        name: "issuing authority",
        indicator: Indicator::AnyOf(&["unique identification authority"]),
        weight: 2,
    },
    IndicatorRule {
        name: "contact",
        indicator: Indicator::Contact,
        weight: 2,
    },
    IndicatorRule {
        name: "relation",
        indicator: Indicator::AnyOf(&["s/o", "d/o", "w/o", "c/o"]),
        weight: 1,
    },
    IndicatorRule {
        name: "pin code",
        indicator: Indicator::PinCode,
        weight: 1,
    },
    IndicatorRule {
        name: "locality",
        indicator: Indicator::AnyOf(&["district", "dist:", "p.o.", "post office"]),
        weight: 1,
    },
];

/// True when `text` (already lowercased) contains any of the tokens.
pub fn contains_any(text: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|token| text.contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_weights_are_positive() {
        for rule in FRONT_INDICATORS.iter().chain(BACK_INDICATORS) {
            assert!(rule.weight > 0, "{} has no weight", rule.name);
        }
    }

    #[test]
    fn contains_any_matches_substrings() {
        assert!(contains_any("d/o ramesh kumar", RELATION_MARKERS));
        assert!(!contains_any("ramesh kumar", RELATION_MARKERS));
    }
}
