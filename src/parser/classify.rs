//! Keyword classification shared by every extraction path.

/// Words that mark a finding as hedged rather than confirmed. One set for all
/// paths that classify free text.
const HEDGE_KEYWORDS: &[&str] = &["potential", "possible", "might be", "warning"];

/// Phrases that mark a numbered block as a hedged finding
const HEDGED_ERROR_PHRASES: &[&str] = &["potential error", "possible error"];

const NOT_IN_CODE_PHRASES: &[&str] = &[
    "not in the provided code",
    "not in provided code",
    "not present in the code",
];

const NO_ERRORS_PHRASES: &[&str] = &[
    "there are no syntax errors",
    "no errors found",
    "code is correct",
];

/// Keyword categories for unlabeled prose, checked in order
const TYPE_KEYWORDS: &[(&[&str], &str)] = &[
    (&["syntax error"], "Syntax Error"),
    (&["runtime error", "runtime exception"], "Runtime Error"),
    (&["logical error", "logic error"], "Logical Error"),
    (&["type error"], "Type Error"),
    (&["reference error"], "Reference Error"),
    (&["import error", "module not found"], "Import Error"),
];

fn contains_any(text: &str, needles: &[&str]) -> bool {
    let lower = text.to_lowercase();
    needles.iter().any(|n| lower.contains(n))
}

pub fn is_hedged(text: &str) -> bool {
    contains_any(text, HEDGE_KEYWORDS)
}

pub fn mentions_hedged_error(text: &str) -> bool {
    contains_any(text, HEDGED_ERROR_PHRASES)
}

pub fn is_not_in_code(text: &str) -> bool {
    contains_any(text, NOT_IN_CODE_PHRASES)
}

/// Whether a located errors section states that nothing is wrong
pub fn declares_no_errors(text: &str) -> bool {
    contains_any(text, NO_ERRORS_PHRASES)
}

/// Heuristic for "this text talks about errors": an `error:` token, or both
/// `line` and `error` somewhere in it.
pub fn has_error_tokens(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("error:") || (lower.contains("line") && lower.contains("error"))
}

/// Category label for unlabeled prose, if a known keyword appears
pub fn classify_type(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    TYPE_KEYWORDS
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lower.contains(n)))
        .map(|(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hedge_keywords() {
        assert!(is_hedged("Potential null dereference"));
        assert!(is_hedged("this might be undefined"));
        assert!(is_hedged("Warning: unused import"));
        assert!(!is_hedged("Syntax Error"));
    }

    #[test]
    fn test_not_in_code() {
        assert!(is_not_in_code("This call is NOT in the provided code."));
        assert!(is_not_in_code("issue not present in the code"));
        assert!(!is_not_in_code("present in the code"));
    }

    #[test]
    fn test_error_tokens() {
        assert!(has_error_tokens("Error: bad"));
        assert!(has_error_tokens("On line 4 there is an error"));
        assert!(!has_error_tokens("No errors here"));
        assert!(!has_error_tokens("The code prints a line"));
    }

    #[test]
    fn test_classify_type_priority() {
        assert_eq!(
            classify_type("A syntax error and a type error"),
            Some("Syntax Error")
        );
        assert_eq!(classify_type("ModuleNotFound: module not found"), Some("Import Error"));
        assert_eq!(classify_type("a logic error in the loop"), Some("Logical Error"));
        assert_eq!(classify_type("something odd"), None);
    }

    #[test]
    fn test_declares_no_errors() {
        assert!(declares_no_errors("There are no syntax errors in this code."));
        assert!(declares_no_errors("The code is correct."));
        assert!(!declares_no_errors("1. Line 3: bad"));
    }
}
