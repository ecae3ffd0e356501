use crate::models::NameParts;
use lazy_static::lazy_static;
use regex::Regex;

/// Placeholder some issuers print instead of a proper `<<` delimiter run.
pub const FILLER_MARKER: char = 'L';

lazy_static! {
    // MRZ delimiter and whitespace, in any mix and any run length
    static ref NAME_SEPARATORS: Regex = Regex::new(r"[<\s]+").unwrap();
}

/// Which positional rule produced a name split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRule {
    /// Nothing but fillers and delimiters.
    Empty,
    /// A lone token, taken as the surname.
    SingleToken,
    /// Default: last token is the surname.
    SurnameLast,
    /// Three or more tokens led by an upper-case word: first token is the surname.
    SurnameFirst,
}

/// Split a raw name field into name tokens, dropping delimiters and filler.
///
/// Tokens equal to `marker` are noise wherever they appear. Tokens made only
/// of repeated markers (`LL`, `LLL`, ...) are residue of padding and are
/// dropped from both ends of the sequence.
pub fn clean_name_tokens(raw: &str, marker: char) -> Vec<String> {
    let mut tokens: Vec<&str> = NAME_SEPARATORS
        .split(raw)
        .filter(|token| !token.is_empty() && !is_single_marker(token, marker))
        .collect();

    while tokens.first().map_or(false, |t| is_marker_run(t, marker)) {
        tokens.remove(0);
    }
    while tokens.last().map_or(false, |t| is_marker_run(t, marker)) {
        tokens.pop();
    }

    tokens.into_iter().map(str::to_string).collect()
}

/// Recover (given name, surname) from a raw name field using the default
/// filler marker. Never fails; unusable input yields empty strings.
pub fn disambiguate(raw: &str) -> NameParts {
    disambiguate_with_marker(raw, FILLER_MARKER).0
}

pub fn disambiguate_with_marker(raw: &str, marker: char) -> (NameParts, NameRule) {
    let tokens = clean_name_tokens(raw, marker);
    split_name_tokens(&tokens)
}

/// Apply the positional tie-break to already cleaned tokens.
///
/// The surname-first override is checked before the default surname-last rule
/// and needs at least three tokens, so a two-token name is always
/// given + surname whatever its casing.
pub fn split_name_tokens(tokens: &[String]) -> (NameParts, NameRule) {
    match tokens {
        [] => (NameParts::default(), NameRule::Empty),
        [only] => (NameParts::new("", only.as_str()), NameRule::SingleToken),
        [first, rest @ ..] if rest.len() >= 2 && is_upper_case_word(first) => (
            NameParts::new(rest.join(" "), first.as_str()),
            NameRule::SurnameFirst,
        ),
        [init @ .., last] => (
            NameParts::new(init.join(" "), last.as_str()),
            NameRule::SurnameLast,
        ),
    }
}

fn is_single_marker(token: &str, marker: char) -> bool {
    let mut chars = token.chars();
    chars.next() == Some(marker) && chars.next().is_none()
}

fn is_marker_run(token: &str, marker: char) -> bool {
    !token.is_empty() && token.chars().all(|c| c == marker)
}

fn is_upper_case_word(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
        && !token.chars().any(|c| c.is_lowercase() || c.is_whitespace())
}
