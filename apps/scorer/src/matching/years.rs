//! Years-of-experience phrase matcher.
//!
//! Recognises "5 years of experience", "5+ years", "3 yrs exp" and the
//! reversed "experience: 6 years" form. Additional phrasings can be plugged in
//! through [`YearsPatternMatcher::with_patterns`].

use once_cell::sync::Lazy;
use regex::Regex;

/// Two-digit cap keeps calendar years ("since 2015") out of the count.
const DEFAULT_PATTERNS: &[&str] = &[
    r"\b(\d{1,2})\s*\+?\s*(?:years?|yrs?)\b(?:\s+of)?(?:\s+[a-z\-]+)?\s+(?:experience|exp)\b",
    r"\b(\d{1,2})\s*\+\s*(?:years?|yrs?)\b",
    r"\b(?:experience|exp)\b[^.\d]{0,24}?\b(\d{1,2})\s*\+?\s*(?:years?|yrs?)\b",
];

static DEFAULT_MATCHER: Lazy<YearsPatternMatcher> = Lazy::new(|| {
    YearsPatternMatcher::with_patterns(DEFAULT_PATTERNS)
        .expect("built-in years patterns are valid")
});

/// A set of regexes whose first capture group is a number of years.
#[derive(Debug, Clone)]
pub struct YearsPatternMatcher {
    patterns: Vec<Regex>,
}

impl YearsPatternMatcher {
    /// The built-in phrase set, compiled once per process.
    pub fn standard() -> &'static YearsPatternMatcher {
        &DEFAULT_MATCHER
    }

    pub fn with_patterns(patterns: &[&str]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Largest year count mentioned anywhere in `text` (case-insensitive).
    pub fn max_years(&self, text: &str) -> Option<u32> {
        let text = text.to_lowercase();
        self.patterns
            .iter()
            .flat_map(|re| re.captures_iter(&text))
            .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
            .max()
    }
}
