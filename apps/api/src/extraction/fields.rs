//! Pattern-based field extraction over raw (uncleaned) resume text.
//!
//! Every rule is independent and infallible: no match yields `None` or an empty list.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::catalog::{EDUCATION, SKILLS};
use crate::models::analysis::ExtractionResult;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b").unwrap()
});
static CLOSED_AREA_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3}\)").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+\b\s\b[A-Z][a-z]+\b").unwrap());

static SKILL_PATTERNS: Lazy<Vec<(&'static str, Regex)>> =
    Lazy::new(|| compile_catalog(SKILLS));
static EDUCATION_PATTERNS: Lazy<Vec<(&'static str, Regex)>> =
    Lazy::new(|| compile_catalog(EDUCATION));

/// Compiles one case-insensitive whole-word matcher per catalog entry.
///
/// "Whole word" means the entry is not directly preceded or followed by a word character.
/// Unlike `\b`, this also holds for entries that end in punctuation, so "C++." matches `C++`.
fn compile_catalog(catalog: &'static [&'static str]) -> Vec<(&'static str, Regex)> {
    catalog
        .iter()
        .map(|&entry| {
            let pattern = format!(r"(?i)(?:^|\W){}(?:\W|$)", regex::escape(entry));
            (entry, Regex::new(&pattern).unwrap())
        })
        .collect()
}

fn match_catalog(patterns: &[(&'static str, Regex)], text: &str) -> Vec<String> {
    patterns
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(entry, _)| entry.to_string())
        .collect()
}

/// First phone-number-shaped run in the text, verbatim.
///
/// The leading `\b` can never sit in front of `(` or `+`, so a directly preceding opening
/// parenthesis (when the match closes it) or plus sign is folded back into the result:
/// "(415) 555-2671" and "+1-212-555-0100" come back whole.
pub fn extract_contact_number_from_resume(text: &str) -> Option<String> {
    let found = PHONE_RE.find(text)?;
    let prefix = &text[..found.start()];
    let fold_back = (prefix.ends_with('(') && CLOSED_AREA_CODE_RE.is_match(found.as_str()))
        || prefix.ends_with('+');
    let start = if fold_back { found.start() - 1 } else { found.start() };
    Some(text[start..found.end()].to_string())
}

/// First email address in the text.
pub fn extract_email_from_resume(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// Skills from the fixed catalog that appear in the text, in catalog order.
pub fn extract_skills_from_resume(text: &str) -> Vec<String> {
    match_catalog(&SKILL_PATTERNS, text)
}

/// Fields of study from the fixed catalog that appear in the text, in catalog order.
pub fn extract_education_from_resume(text: &str) -> Vec<String> {
    match_catalog(&EDUCATION_PATTERNS, text)
}

/// First pair of consecutive capitalized words. A heuristic, not entity recognition:
/// "Senior Engineer" is as good a name as any to this rule.
pub fn extract_name_from_resume(text: &str) -> Option<String> {
    NAME_RE.find(text).map(|m| m.as_str().to_string())
}

/// Runs all five extraction rules over the same raw text.
pub fn extract_fields(text: &str) -> ExtractionResult {
    ExtractionResult {
        name: extract_name_from_resume(text),
        phone: extract_contact_number_from_resume(text),
        email: extract_email_from_resume(text),
        skills: extract_skills_from_resume(text),
        education: extract_education_from_resume(text),
    }
}
