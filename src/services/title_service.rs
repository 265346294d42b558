use std::fmt;
use log::debug;
use regex::Regex;
use crate::errors::WikiError;

const TITLE_PATTERN: &str = "^[a-zA-Z0-9]+$";

/// A page title that has passed validation.
///
/// Only [`TitleValidator::validate`] hands these out, so anything taking a
/// `&Title` can rely on it being letters and digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Checks raw path segments against the page title grammar
#[derive(Debug, Clone)]
pub struct TitleValidator {
    pattern: Regex,
}

impl TitleValidator {
    /// Compile the title pattern
    pub fn new() -> Self {
        let pattern = Regex::new(TITLE_PATTERN).expect("title pattern is a valid regex");
        Self { pattern }
    }

    pub fn is_valid(&self, raw: &str) -> bool {
        self.pattern.is_match(raw)
    }

    /// Validate a raw title taken from the request path
    pub fn validate(&self, raw: &str) -> Result<Title, WikiError> {
        if self.is_valid(raw) {
            Ok(Title(raw.to_string()))
        } else {
            debug!("Rejected title: {:?}", raw);
            Err(WikiError::InvalidTitle(raw.to_string()))
        }
    }
}

impl Default for TitleValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn accepts_letters_and_digits() {
        let validator = TitleValidator::new();
        for raw in ["a", "Z", "0", "FrontPage", "page42", "ABCxyz0123456789"] {
            assert!(validator.is_valid(raw), "{raw} should be accepted");
            assert_eq!(validator.validate(raw).unwrap().as_str(), raw);
        }
    }

    #[test]
    fn rejects_everything_else() {
        let validator = TitleValidator::new();
        for raw in [
            "", " ", "a b", "a/b", "../etc", "..", "a.txt", "tab\t", "new\nline", "dash-ed",
            "under_score", "é", "page%2F", "/Alice", "Alice/",
        ] {
            assert!(!validator.is_valid(raw), "{raw:?} should be rejected");
            assert!(matches!(validator.validate(raw), Err(WikiError::InvalidTitle(_))));
        }
    }

    #[test]
    fn title_displays_as_raw_string() {
        let title = TitleValidator::new().validate("Alice").unwrap();
        assert_eq!(title.to_string(), "Alice");
    }

    proptest! {
        #[test]
        fn prop_alphanumeric_titles_accepted(raw in "[a-zA-Z0-9]{1,64}") {
            prop_assert!(TitleValidator::new().is_valid(&raw));
        }

        #[test]
        fn prop_any_other_char_rejected(
            prefix in "[a-zA-Z0-9]{0,16}",
            bad in "[^a-zA-Z0-9]",
            suffix in "[a-zA-Z0-9]{0,16}",
        ) {
            let raw = format!("{prefix}{bad}{suffix}");
            prop_assert!(!TitleValidator::new().is_valid(&raw));
        }
    }
}
