use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SPLIT: Regex = Regex::new(r"[,.:;'\s]+").expect("valid regex");
}

/// Tokenize one line of text: split on runs of whitespace, commas,
/// periods, colons, semicolons, and apostrophes, lowercase each piece,
/// and drop tokens shorter than 3 characters and the token "the".
///
/// Documents and queries go through this identically; vocabulary
/// matching depends on that symmetry.
pub fn tokenize(line: &str) -> Vec<String> {
    SPLIT
        .split(line)
        .filter(|piece| !piece.is_empty())
        .map(|piece| piece.to_lowercase())
        .filter(|token| keep(token))
        .collect()
}

fn keep(token: &str) -> bool {
    token.chars().count() >= 3 && token != "the"
}
