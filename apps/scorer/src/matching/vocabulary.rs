//! Static vocabulary tables shared by the analyzers.
//!
//! Everything here is immutable data. The analyzers only read from these
//! slices, so new synonyms or role words can be added without touching the
//! matching logic.

/// Words dropped by the keyword extractor.
pub const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "nor", "so", "yet", "for", "of", "in", "on", "at",
    "to", "by", "with", "from", "as", "into", "about", "is", "are", "was", "were", "be",
    "been", "being", "am", "have", "has", "had", "do", "does", "did", "will", "would",
    "shall", "should", "can", "could", "may", "might", "must", "this", "that", "these",
    "those", "it", "its", "we", "you", "our", "your", "they", "their", "i", "my",
];

/// Canonical skill groups. Each group lists equivalent spellings; the first
/// entry is the canonical name.
pub const SKILL_SYNONYMS: &[&[&str]] = &[
    &["javascript", "js", "es6", "es2015", "ecmascript"],
    &["typescript", "ts"],
    &["python", "py", "python3"],
    &["react", "reactjs", "react.js"],
    &["node", "nodejs", "node.js"],
    &["angular", "angularjs", "angular.js"],
    &["vue", "vuejs", "vue.js"],
    &["next", "nextjs", "next.js"],
    &["express", "expressjs", "express.js"],
    &["golang", "go"],
    &["c#", "csharp", "c sharp"],
    &["c++", "cpp"],
    &["postgresql", "postgres", "psql"],
    &["mongodb", "mongo"],
    &["kubernetes", "k8s"],
    &["amazon web services", "aws"],
    &["google cloud", "gcp", "google cloud platform"],
    &["machine learning", "ml"],
    &["continuous integration", "ci/cd", "cicd"],
    &["rust", "rustlang"],
];

/// Words that mark a token as role-indicative even when it is not purely
/// alphabetic.
pub const ROLE_WORDS: &[&str] = &[
    "developer", "engineer", "architect", "manager", "lead", "senior", "junior", "principal",
    "staff", "intern", "stack", "full-stack", "fullstack", "frontend", "front-end", "backend",
    "back-end", "devops", "sre", "analyst", "designer", "scientist", "consultant",
    "administrator", "specialist", "director", "head", "software", "data", "web", "mobile",
    "cloud", "platform", "qa", "ui/ux", "ml",
];

/// Leadership titles that lift the detected seniority floor to "lead".
pub const LEADERSHIP_WORDS: &[&str] = &[
    "lead", "tech lead", "team lead", "manager", "director", "architect", "principal",
    "head of", "vp",
];

/// Section headings that signal a structured resume.
pub const STRUCTURAL_KEYWORDS: &[&str] = &[
    "experience", "education", "skills", "projects", "certifications", "summary",
    "achievements", "employment", "work history", "objective", "publications", "awards",
];

/// Generic technical vocabulary used to gauge technical density.
pub const TECHNICAL_TERMS: &[&str] = &[
    "api", "database", "framework", "library", "algorithm", "architecture", "microservices",
    "cloud", "devops", "agile", "scrum", "testing", "deployment", "git", "docker", "sql",
    "backend", "frontend", "server", "performance", "security", "ci/cd",
];

/// Returns every synonym group the (lower-cased) skill belongs to.
pub fn synonym_groups(skill: &str) -> impl Iterator<Item = &'static [&'static str]> + '_ {
    SKILL_SYNONYMS
        .iter()
        .copied()
        .filter(move |group| group.iter().any(|alias| *alias == skill))
}

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonym_lookup_by_alias() {
        let groups: Vec<_> = synonym_groups("js").collect();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0][0], "javascript");
    }

    #[test]
    fn test_synonym_lookup_unknown_skill_is_empty() {
        assert_eq!(synonym_groups("cobol").count(), 0);
    }

    #[test]
    fn test_tables_are_lowercase() {
        let all = STOPWORDS
            .iter()
            .chain(ROLE_WORDS)
            .chain(LEADERSHIP_WORDS)
            .chain(STRUCTURAL_KEYWORDS)
            .chain(TECHNICAL_TERMS)
            .chain(SKILL_SYNONYMS.iter().flat_map(|g| g.iter()));
        for word in all {
            assert_eq!(*word, word.to_lowercase(), "'{word}' must be lowercase");
        }
    }

    #[test]
    fn test_stopword_set_size() {
        assert!(STOPWORDS.len() >= 45);
        assert!(is_stopword("the"));
        assert!(!is_stopword("rust"));
    }
}
