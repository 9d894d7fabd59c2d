//! Skill extraction against a fixed vocabulary

use crate::error::{Result, ResumeAnalyzerError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A sorted set of canonical skill names drawn from the vocabulary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    /// Skills in `self` that are absent from `other`
    pub fn difference(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.difference(&other.0).cloned().collect())
    }

    pub fn is_subset(&self, other: &SkillSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl FromIterator<String> for SkillSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        SkillSet(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

struct SkillPattern {
    skill: String,
    regex: Regex,
}

/// Case-insensitive whole-word matcher over the skill vocabulary.
///
/// A skill matches when it is delimited by non-word characters or the ends of
/// the text. Plain `\b` anchors would never fire after a trailing symbol such as
/// the `+` of "C++", so the delimiters are spelled out instead.
pub struct SkillExtractor {
    patterns: Vec<SkillPattern>,
}

impl SkillExtractor {
    pub fn new(vocabulary: &[String]) -> Result<Self> {
        let patterns = vocabulary
            .iter()
            .map(|skill| {
                let pattern = format!(r"(?i)(?:^|\W){}(?:\W|$)", regex::escape(skill));
                Regex::new(&pattern)
                    .map(|regex| SkillPattern { skill: skill.clone(), regex })
                    .map_err(|e| ResumeAnalyzerError::Configuration(format!(
                        "Failed to build matcher for skill '{}': {}", skill, e
                    )))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn extract(&self, text: &str) -> SkillSet {
        self.patterns
            .iter()
            .filter(|p| p.regex.is_match(text))
            .map(|p| p.skill.clone())
            .collect()
    }

    pub fn skill_count(&self) -> usize {
        self.patterns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn extractor() -> SkillExtractor {
        SkillExtractor::new(&Catalog::default().skills).unwrap()
    }

    #[test]
    fn test_empty_text() {
        assert!(extractor().extract("").is_empty());
    }

    #[test]
    fn test_case_insensitive_whole_words() {
        let skills = extractor().extract("Skilled in python, sql and EXCEL; strong leadership.");
        assert_eq!(skills.to_vec(), vec!["Excel", "Leadership", "Python", "SQL"]);
    }

    #[test]
    fn test_java_not_matched_inside_javascript() {
        let skills = extractor().extract("Frontend work in JavaScript and TypeScript");
        assert!(skills.contains("JavaScript"));
        assert!(!skills.contains("Java"));

        let skills = extractor().extract("JavaScript plus some Java on the backend");
        assert!(skills.contains("Java"));
    }

    #[test]
    fn test_symbol_skills() {
        let skills = extractor().extract("Languages: C++, Node.js");
        assert!(skills.contains("C++"));
        assert!(skills.contains("Node.js"));

        assert!(extractor().extract("Wrote C++").contains("C++"));
        assert!(!extractor().extract("Nodexjs services").contains("Node.js"));
    }

    #[test]
    fn test_multi_word_skills() {
        let skills = extractor().extract("Background in machine learning and deep\nlearning");
        assert!(skills.contains("Machine Learning"));
        assert!(!skills.contains("Deep Learning"));
    }

    #[test]
    fn test_result_is_subset_of_vocabulary() {
        let catalog = Catalog::default();
        let skills = extractor().extract("Python Java C++ SQL HTML CSS React NLP Rust Go Kubernetes");
        assert!(skills.iter().all(|s| catalog.skills.contains(s)));
        assert!(!skills.contains("Rust"));
    }

    #[test]
    fn test_difference() {
        let ex = extractor();
        let jd = ex.extract("Python, Machine Learning, SQL");
        let resume = ex.extract("Python, SQL, Excel");
        let missing = jd.difference(&resume);

        assert_eq!(missing.to_vec(), vec!["Machine Learning"]);
        assert!(missing.is_subset(&jd));
        assert!(missing.iter().all(|s| !resume.contains(s)));
    }
}
