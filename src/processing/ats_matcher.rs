//! ATS (Applicant Tracking System) keyword overlap scoring

use crate::processing::text_processor::KeywordSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsScore {
    /// Percentage of JD keywords found in the resume, 0 - 100
    pub score: f32,
    pub tier: AtsTier,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub jd_keyword_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AtsTier {
    Excellent,
    Fair,
    Poor,
}

impl AtsTier {
    pub fn from_score(score: f32) -> Self {
        if score > 75.0 {
            AtsTier::Excellent
        } else if score > 50.0 {
            AtsTier::Fair
        } else {
            AtsTier::Poor
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AtsTier::Excellent => "Excellent Keyword Match! Your resume is highly optimized for ATS.",
            AtsTier::Fair => "Fair ATS Match. Consider adding more relevant keywords.",
            AtsTier::Poor => "Poor ATS Match. Try including more job-relevant keywords in your resume.",
        }
    }
}

impl std::fmt::Display for AtsTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtsTier::Excellent => write!(f, "Excellent"),
            AtsTier::Fair => write!(f, "Fair"),
            AtsTier::Poor => write!(f, "Poor"),
        }
    }
}

/// Share of JD keywords that also occur in the resume.
///
/// An empty JD keyword set scores 0 instead of dividing by zero.
pub fn calculate_ats_score(resume_keywords: &KeywordSet, jd_keywords: &KeywordSet) -> AtsScore {
    let (matched, missing): (Vec<&String>, Vec<&String>) = jd_keywords
        .iter()
        .partition(|keyword| resume_keywords.contains(*keyword));

    let score = if jd_keywords.is_empty() {
        0.0
    } else {
        100.0 * matched.len() as f32 / jd_keywords.len() as f32
    };

    AtsScore {
        score,
        tier: AtsTier::from_score(score),
        matched_keywords: matched.into_iter().cloned().collect(),
        missing_keywords: missing.into_iter().cloned().collect(),
        jd_keyword_count: jd_keywords.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(words: &[&str]) -> KeywordSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_empty_jd_scores_zero() {
        let ats = calculate_ats_score(&keywords(&["python"]), &keywords(&[]));
        assert_eq!(ats.score, 0.0);
        assert_eq!(ats.tier, AtsTier::Poor);
        assert!(ats.matched_keywords.is_empty());
    }

    #[test]
    fn test_superset_scores_hundred() {
        let jd = keywords(&["python", "sql"]);
        let resume = keywords(&["python", "sql", "excel"]);
        let ats = calculate_ats_score(&resume, &jd);

        assert_eq!(ats.score, 100.0);
        assert_eq!(ats.tier, AtsTier::Excellent);
        assert!(ats.missing_keywords.is_empty());
    }

    #[test]
    fn test_partial_overlap() {
        let jd = keywords(&["python", "sql", "spark", "airflow"]);
        let resume = keywords(&["python", "airflow", "excel"]);
        let ats = calculate_ats_score(&resume, &jd);

        assert_eq!(ats.score, 50.0);
        // strict thresholds: exactly 50 is not Fair
        assert_eq!(ats.tier, AtsTier::Poor);
        assert_eq!(ats.matched_keywords, vec!["airflow", "python"]);
        assert_eq!(ats.missing_keywords, vec!["spark", "sql"]);
        assert_eq!(ats.jd_keyword_count, 4);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(AtsTier::from_score(75.0), AtsTier::Fair);
        assert_eq!(AtsTier::from_score(75.01), AtsTier::Excellent);
        assert_eq!(AtsTier::from_score(50.01), AtsTier::Fair);
    }
}
