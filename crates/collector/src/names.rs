//! Display-name fallback
//!
//! Derives a human-readable display name from an email address, used only
//! when the session carries no profile display name. Best-effort: it is not
//! validated against real name formats and never fails.

use std::sync::OnceLock;

use regex::Regex;

fn camel_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Z]?[a-z]+").expect("camel pattern is valid"))
}

fn letters_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)[a-z]{2,}").expect("letters pattern is valid"))
}

/// Derive a display name from an email-like string.
///
/// Takes the part before the first `@`, keeps only ASCII letters (other
/// characters separate words), splits camel-cased runs into their
/// `[A-Z]?[a-z]+` subtokens, title-cases each token and joins them with
/// single spaces. Empty input produces an empty string.
///
/// ```
/// use collector::derive_display_name;
///
/// assert_eq!(derive_display_name("john.doe@x.com"), "John Doe");
/// assert_eq!(derive_display_name("jsmith123@x.com"), "Jsmith");
/// assert_eq!(derive_display_name(""), "");
/// ```
pub fn derive_display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();

    let mut words = Vec::new();
    for run in local.split(|c: char| !c.is_ascii_alphabetic()) {
        if run.is_empty() {
            continue;
        }
        for token in word_tokens(run) {
            words.push(title_case(token));
        }
    }

    words.join(" ")
}

/// Split one all-letter run into word-like tokens: camel-cased subtokens
/// first, then any 2+ letter run of either case, else the run itself.
fn word_tokens(run: &str) -> Vec<&str> {
    let camel: Vec<&str> = camel_regex().find_iter(run).map(|m| m.as_str()).collect();
    if !camel.is_empty() {
        return camel;
    }

    let letters: Vec<&str> = letters_regex().find_iter(run).map(|m| m.as_str()).collect();
    if !letters.is_empty() {
        return letters;
    }

    vec![run]
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
        None => String::new(),
    }
}
