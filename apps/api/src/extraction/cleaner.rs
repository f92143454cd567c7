//! Resume text normalization ahead of vectorization.
//!
//! The steps run in a fixed order and each one rewrites the output of the previous one.
//! Reordering them changes the token stream the fitted vectorizers were trained on.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters replaced by a space in the punctuation step.
const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

// `\s` alone misses 0x1C-0x1F, which the trained vocabulary treats as whitespace.
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http[^\s\x1C-\x1F]+[\s\x1C-\x1F]").unwrap());
// Unbounded on purpose: `cc` inside "account" is removed too.
static RT_CC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"RT|cc").unwrap());
static HASHTAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#[^\s\x1C-\x1F]+[\s\x1C-\x1F]").unwrap());
static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@[^\s\x1C-\x1F]+").unwrap());
static PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("[{}]", regex::escape(PUNCTUATION))).unwrap());
static NON_ASCII_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\x00-\x7F]").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\x1C-\x1F]+").unwrap());

/// Normalizes raw resume text into the token stream the classifiers expect.
///
/// Total and pure. The result is not trimmed: a single leading or trailing space survives.
pub fn clean_resume(text: &str) -> String {
    let text = URL_RE.replace_all(text, " ");
    let text = RT_CC_RE.replace_all(&text, " ");
    let text = HASHTAG_RE.replace_all(&text, " ");
    let text = MENTION_RE.replace_all(&text, "  ");
    let text = PUNCTUATION_RE.replace_all(&text, " ");
    let text = NON_ASCII_RE.replace_all(&text, " ");
    WHITESPACE_RE.replace_all(&text, " ").into_owned()
}

/// Cleaned resume text. Only ever fed to a vectorizer; never shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn from_raw(raw: &str) -> Self {
        Self(clean_resume(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
