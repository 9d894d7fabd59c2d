//! Derived metrics: grade, hiring probability, suggested jobs and roadmap

use crate::catalog::{Catalog, SalaryInsight};
use crate::processing::ats_matcher::{calculate_ats_score, AtsScore};
use crate::processing::skills::SkillSet;
use crate::processing::text_processor::KeywordSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub similarity: f32,
    pub match_tier: MatchTier,
    pub ats: AtsScore,
    pub grade: Grade,
    /// Clamped into [0, 100]
    pub hiring_probability: f32,
    pub missing_skills: SkillSet,
    pub suggested_jobs: Vec<String>,
    pub roadmap: Vec<RoadmapStep>,
    pub improvement_suggestions: Vec<String>,
    pub career_paths: Vec<String>,
    pub salary_insights: Vec<SalaryInsight>,
    pub job_links: Vec<JobLinks>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

/// Coarse similarity label used for messaging; deliberately uses its own thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTier {
    Excellent,
    Moderate,
    Weak,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub step: usize,
    pub skill: String,
    /// None when the catalog has no learning resource for the skill
    pub resource: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobLinks {
    pub job_title: String,
    pub links: Vec<PlatformLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformLink {
    pub platform: String,
    pub url: String,
}

const WEAK_GRADE_SUGGESTIONS: [&str; 3] = [
    "Add measurable achievements (e.g., 'Improved accuracy by 20%').",
    "Align your skills section with job description keywords.",
    "Consider shortening long paragraphs into bullet points.",
];

const STRONG_GRADE_NOTE: &str = "Your resume structure looks strong. Focus on polishing details.";

impl Grade {
    /// A needs similarity above 0.8 with fewer than two missing skills; all thresholds are strict
    pub fn from_scores(similarity: f32, missing_skill_count: usize) -> Self {
        if similarity > 0.8 && missing_skill_count < 2 {
            Grade::A
        } else if similarity > 0.6 {
            Grade::B
        } else if similarity > 0.4 {
            Grade::C
        } else {
            Grade::D
        }
    }

    pub fn needs_work(&self) -> bool {
        matches!(self, Grade::C | Grade::D)
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        };
        write!(f, "{}", letter)
    }
}

impl MatchTier {
    pub fn from_similarity(similarity: f32) -> Self {
        if similarity > 0.75 {
            MatchTier::Excellent
        } else if similarity > 0.5 {
            MatchTier::Moderate
        } else {
            MatchTier::Weak
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            MatchTier::Excellent => "Excellent Match! Your resume aligns strongly with the job description.",
            MatchTier::Moderate => "Moderate Match. Some improvements needed to stand out.",
            MatchTier::Weak => "Weak Match. Your resume needs more alignment with the job description.",
        }
    }
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchTier::Excellent => write!(f, "Excellent"),
            MatchTier::Moderate => write!(f, "Moderate"),
            MatchTier::Weak => write!(f, "Weak"),
        }
    }
}

/// `similarity * 70 + (100 - missing * 5)`, clamped into [0, 100].
/// A non-finite similarity counts as 0.
pub fn hiring_probability(similarity: f32, missing_skill_count: usize) -> f32 {
    let similarity = if similarity.is_finite() { similarity } else { 0.0 };
    let raw = similarity * 70.0 + (100.0 - missing_skill_count as f32 * 5.0);
    raw.clamp(0.0, 100.0)
}

/// Union of the catalog's job titles for every resume skill, sorted and deduplicated
pub fn suggest_jobs(resume_skills: &SkillSet, catalog: &Catalog) -> Vec<String> {
    resume_skills
        .iter()
        .flat_map(|skill| catalog.jobs_for_skill(skill).iter().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// One step per missing skill, in sorted skill order, numbered from 1
pub fn build_roadmap(missing_skills: &SkillSet, catalog: &Catalog) -> Vec<RoadmapStep> {
    missing_skills
        .iter()
        .enumerate()
        .map(|(i, skill)| RoadmapStep {
            step: i + 1,
            skill: skill.clone(),
            resource: catalog.learning_url(skill).map(str::to_string),
        })
        .collect()
}

pub fn career_paths(resume_skills: &SkillSet, catalog: &Catalog) -> Vec<String> {
    catalog
        .career_paths
        .iter()
        .filter(|rule| rule.requires.iter().all(|skill| resume_skills.contains(skill)))
        .map(|rule| rule.path.clone())
        .collect()
}

pub fn improvement_suggestions(grade: Grade) -> Vec<String> {
    if grade.needs_work() {
        WEAK_GRADE_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
    } else {
        vec![STRONG_GRADE_NOTE.to_string()]
    }
}

/// Salary rows for the suggested jobs, in catalog order
pub fn salary_insights(suggested_jobs: &[String], catalog: &Catalog) -> Vec<SalaryInsight> {
    catalog
        .salary_insights
        .iter()
        .filter(|row| suggested_jobs.contains(&row.job_title))
        .cloned()
        .collect()
}

pub fn job_links(suggested_jobs: &[String], catalog: &Catalog) -> Vec<JobLinks> {
    suggested_jobs
        .iter()
        .map(|job| JobLinks {
            job_title: job.clone(),
            links: catalog
                .job_platforms
                .iter()
                .map(|platform| PlatformLink {
                    platform: platform.name.clone(),
                    url: platform.search_url(job),
                })
                .collect(),
        })
        .collect()
}

/// Combine similarity, skill sets and keyword sets into the derived metrics
pub fn aggregate(
    similarity: f32,
    resume_skills: &SkillSet,
    jd_skills: &SkillSet,
    resume_keywords: &KeywordSet,
    jd_keywords: &KeywordSet,
    catalog: &Catalog,
) -> Metrics {
    let missing_skills = jd_skills.difference(resume_skills);
    let ats = calculate_ats_score(resume_keywords, jd_keywords);
    let grade = Grade::from_scores(similarity, missing_skills.len());
    let hiring_probability = hiring_probability(similarity, missing_skills.len());
    let suggested_jobs = suggest_jobs(resume_skills, catalog);

    Metrics {
        similarity,
        match_tier: MatchTier::from_similarity(similarity),
        ats,
        grade,
        hiring_probability,
        roadmap: build_roadmap(&missing_skills, catalog),
        improvement_suggestions: improvement_suggestions(grade),
        career_paths: career_paths(resume_skills, catalog),
        salary_insights: salary_insights(&suggested_jobs, catalog),
        job_links: job_links(&suggested_jobs, catalog),
        missing_skills,
        suggested_jobs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(names: &[&str]) -> SkillSet {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn keywords(words: &[&str]) -> KeywordSet {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_grade_strict_boundaries() {
        assert_eq!(Grade::from_scores(0.8, 0), Grade::B);
        assert_eq!(Grade::from_scores(0.81, 1), Grade::A);
        assert_eq!(Grade::from_scores(0.95, 2), Grade::B);
        assert_eq!(Grade::from_scores(0.6, 0), Grade::C);
        assert_eq!(Grade::from_scores(0.4, 0), Grade::D);
        assert_eq!(Grade::from_scores(0.41, 10), Grade::C);
    }

    #[test]
    fn test_match_tier_thresholds() {
        assert_eq!(MatchTier::from_similarity(0.76), MatchTier::Excellent);
        assert_eq!(MatchTier::from_similarity(0.75), MatchTier::Moderate);
        assert_eq!(MatchTier::from_similarity(0.5), MatchTier::Weak);
    }

    #[test]
    fn test_hiring_probability_clamped() {
        assert_eq!(hiring_probability(1.0, 0), 100.0);
        assert_eq!(hiring_probability(0.0, 30), 0.0);
        assert!((hiring_probability(0.5, 15) - 60.0).abs() < 1e-4);

        for missing in 0..40 {
            for step in 0..=10 {
                let p = hiring_probability(step as f32 / 10.0, missing);
                assert!((0.0..=100.0).contains(&p));
            }
        }
    }

    #[test]
    fn test_hiring_probability_non_finite_similarity() {
        for similarity in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let p = hiring_probability(similarity, 2);
            assert!((0.0..=100.0).contains(&p));
            assert_eq!(p, 90.0);
        }
    }

    #[test]
    fn test_suggested_jobs_sorted_and_deduplicated() {
        let catalog = Catalog::default();
        let jobs = suggest_jobs(&skills(&["SQL", "Python", "Excel"]), &catalog);

        assert_eq!(jobs, vec![
            "Backend Developer",
            "Business Analyst",
            "Data Analyst",
            "Data Engineer",
            "Database Administrator",
            "Machine Learning Engineer",
        ]);
    }

    #[test]
    fn test_roadmap_numbering_and_fallback() {
        let catalog = Catalog::default();
        let roadmap = build_roadmap(&skills(&["SQL", "Excel"]), &catalog);

        assert_eq!(roadmap.len(), 2);
        assert_eq!(roadmap[0].step, 1);
        assert_eq!(roadmap[0].skill, "Excel");
        assert_eq!(roadmap[0].resource, None);
        assert_eq!(roadmap[1].skill, "SQL");
        assert_eq!(roadmap[1].resource.as_deref(), Some("https://www.sqlbolt.com/"));
    }

    #[test]
    fn test_career_paths() {
        let catalog = Catalog::default();
        let paths = career_paths(&skills(&["Python", "Machine Learning", "Java"]), &catalog);
        assert_eq!(paths.len(), 2);
        assert!(paths[0].starts_with("Data Scientist"));
        assert!(paths[1].starts_with("Java Developer"));

        assert!(career_paths(&SkillSet::new(), &catalog).is_empty());
    }

    #[test]
    fn test_salary_and_links_follow_suggested_jobs() {
        let catalog = Catalog::default();
        let jobs = vec!["Data Analyst".to_string(), "Scrum Master".to_string()];

        let salaries = salary_insights(&jobs, &catalog);
        assert_eq!(salaries.len(), 1);
        assert_eq!(salaries[0].job_title, "Data Analyst");

        let links = job_links(&jobs, &catalog);
        assert_eq!(links.len(), 2);
        assert_eq!(links[1].links[2].url, "https://www.indeed.com/jobs?q=Scrum+Master");
    }

    #[test]
    fn test_aggregate_empty_inputs() {
        let catalog = Catalog::default();
        let empty_skills = SkillSet::new();
        let empty_keywords = KeywordSet::new();

        let metrics = aggregate(0.0, &empty_skills, &empty_skills, &empty_keywords, &empty_keywords, &catalog);

        assert_eq!(metrics.ats.score, 0.0);
        assert_eq!(metrics.grade, Grade::D);
        assert_eq!(metrics.hiring_probability, 100.0);
        assert!(metrics.missing_skills.is_empty());
        assert!(metrics.roadmap.is_empty());
        assert!(metrics.suggested_jobs.is_empty());
        assert_eq!(metrics.improvement_suggestions.len(), 3);
    }

    #[test]
    fn test_aggregate_scenario() {
        let catalog = Catalog::default();
        let resume_skills = skills(&["Python", "SQL", "Excel"]);
        let jd_skills = skills(&["Python", "Machine Learning", "SQL"]);
        let resume_keywords = keywords(&["python", "sql", "excel"]);
        let jd_keywords = keywords(&["python", "machine", "learning", "sql"]);

        let metrics = aggregate(0.65, &resume_skills, &jd_skills, &resume_keywords, &jd_keywords, &catalog);

        assert_eq!(metrics.missing_skills.to_vec(), vec!["Machine Learning"]);
        assert_eq!(metrics.grade, Grade::B);
        assert_eq!(metrics.match_tier, MatchTier::Moderate);
        assert_eq!(metrics.hiring_probability, 100.0);
        assert_eq!(metrics.ats.score, 50.0);
        assert_eq!(metrics.suggested_jobs.len(), 6);
        assert_eq!(metrics.roadmap[0].resource.as_deref(), Some("https://www.coursera.org/learn/machine-learning"));
        assert_eq!(metrics.improvement_suggestions, vec![STRONG_GRADE_NOTE.to_string()]);
    }
}
