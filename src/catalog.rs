//! Fixed reference data consumed by the analysis pipeline
//!
//! The skill vocabulary, learning resources, job suggestions, salary table,
//! job platforms and career paths are plain data. They ship with built-in
//! defaults and can be overridden from the `[catalog]` table of the config file.

use crate::error::{Result, ResumeAnalyzerError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Placeholder substituted with the URL-encoded job title in platform templates
pub const QUERY_PLACEHOLDER: &str = "{query}";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Canonical skill names, matched as whole words
    pub skills: Vec<String>,
    pub learning_resources: Vec<LearningResource>,
    pub job_suggestions: Vec<JobSuggestion>,
    pub salary_insights: Vec<SalaryInsight>,
    pub job_platforms: Vec<JobPlatform>,
    pub career_paths: Vec<CareerPathRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    pub skill: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSuggestion {
    pub skill: String,
    pub jobs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryInsight {
    pub job_title: String,
    pub india: String,
    pub us: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPlatform {
    pub name: String,
    pub url_template: String,
}

/// A career path applies when every required skill was found in the resume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPathRule {
    pub requires: Vec<String>,
    pub path: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            skills: strings(&[
                "Python", "Java", "C++", "SQL", "HTML", "CSS", "JavaScript", "React", "Node.js",
                "Machine Learning", "Deep Learning", "NLP", "Data Science", "TensorFlow", "PyTorch",
                "Excel", "Communication", "Leadership", "Project Management",
            ]),
            learning_resources: vec![
                resource("Python", "https://www.w3schools.com/python/"),
                resource("SQL", "https://www.sqlbolt.com/"),
                resource("Machine Learning", "https://www.coursera.org/learn/machine-learning"),
                resource("Deep Learning", "https://www.deeplearning.ai/"),
                resource("TensorFlow", "https://www.tensorflow.org/tutorials"),
                resource("PyTorch", "https://pytorch.org/tutorials/"),
                resource("React", "https://react.dev/learn"),
                resource("Project Management", "https://www.pmi.org/certifications/capm"),
                resource("Java", "https://www.w3schools.com/java/"),
                resource("C++", "https://www.learncpp.com/"),
                resource("HTML", "https://www.w3schools.com/html/"),
                resource("CSS", "https://www.w3schools.com/css/"),
                resource("JavaScript", "https://www.javascript.com/"),
            ],
            job_suggestions: vec![
                jobs("Python", &["Data Analyst", "Machine Learning Engineer", "Backend Developer"]),
                jobs("Java", &["Software Engineer", "Spring Boot Developer", "Android Developer"]),
                jobs("SQL", &["Database Administrator", "Data Engineer", "Business Analyst"]),
                jobs("React", &["Frontend Developer", "Full Stack Developer", "UI Engineer"]),
                jobs("Machine Learning", &["AI Engineer", "Data Scientist", "ML Researcher"]),
                jobs("Deep Learning", &["Computer Vision Engineer", "AI Scientist", "NLP Engineer"]),
                jobs("Project Management", &["Project Manager", "Scrum Master", "Agile Coach"]),
            ],
            salary_insights: vec![
                salary("Software Developer", "₹5–12 LPA", "$70K–110K"),
                salary("Web Developer", "₹4–10 LPA", "$65K–100K"),
                salary("Mobile App Developer", "₹5–12 LPA", "$70K–115K"),
                salary("Database Administrator", "₹6–14 LPA", "$75K–115K"),
                salary("Cloud Engineer", "₹7–18 LPA", "$95K–140K"),
                salary("Network Engineer", "₹4–9 LPA", "$65K–95K"),
                salary("Cybersecurity Analyst", "₹6–15 LPA", "$80K–120K"),
                salary("AI Engineer", "₹10–22 LPA", "$110K–160K"),
                salary("Machine Learning Engineer", "₹9–20 LPA", "$105K–150K"),
                salary("Data Scientist", "₹8–18 LPA", "$90K–130K"),
                salary("Data Analyst", "₹5–12 LPA", "$65K–95K"),
                salary("DevOps Engineer", "₹7–16 LPA", "$95K–135K"),
                salary("IT Support Specialist", "₹3–8 LPA", "$50K–80K"),
                salary("System Administrator", "₹4–10 LPA", "$60K–90K"),
                salary("ERP Consultant", "₹8–20 LPA", "$95K–140K"),
                salary("CRM Specialist", "₹6–14 LPA", "$80K–120K"),
                salary("Blockchain Developer", "₹8–20 LPA", "$100K–150K"),
                salary("IoT Engineer", "₹6–15 LPA", "$85K–125K"),
                salary("AR/VR Developer", "₹7–16 LPA", "$90K–135K"),
                salary("Project Manager", "₹10–25 LPA", "$95K–140K"),
            ],
            job_platforms: vec![
                platform("LinkedIn", "https://www.linkedin.com/jobs/search/?keywords={query}"),
                platform("Naukri", "https://www.naukri.com/{query}-jobs"),
                platform("Indeed", "https://www.indeed.com/jobs?q={query}"),
                platform("Glassdoor", "https://www.glassdoor.com/Job/jobs.htm?sc.keyword={query}"),
            ],
            career_paths: vec![
                career(&["Python", "Machine Learning"], "Data Scientist → Senior Data Scientist → AI Architect"),
                career(&["JavaScript", "React"], "Frontend Developer → Full Stack Developer → Tech Lead"),
                career(&["Java"], "Java Developer → Backend Specialist → Solution Architect"),
            ],
        }
    }
}

impl Catalog {
    /// Check the catalog for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.skills.is_empty() {
            return Err(ResumeAnalyzerError::Configuration(
                "Skill vocabulary must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for skill in &self.skills {
            if skill.trim().is_empty() {
                return Err(ResumeAnalyzerError::Configuration(
                    "Skill vocabulary contains a blank entry".to_string(),
                ));
            }
            if !seen.insert(skill.to_lowercase()) {
                return Err(ResumeAnalyzerError::Configuration(format!(
                    "Duplicate skill in vocabulary: {}", skill
                )));
            }
        }

        let mapped_skills = self.learning_resources.iter().map(|r| &r.skill)
            .chain(self.job_suggestions.iter().map(|j| &j.skill))
            .chain(self.career_paths.iter().flat_map(|c| c.requires.iter()));
        for skill in mapped_skills {
            if !self.skills.contains(skill) {
                return Err(ResumeAnalyzerError::Configuration(format!(
                    "'{}' is referenced by the catalog but is not in the skill vocabulary", skill
                )));
            }
        }

        for platform in &self.job_platforms {
            if !platform.url_template.contains(QUERY_PLACEHOLDER) {
                return Err(ResumeAnalyzerError::Configuration(format!(
                    "Job platform '{}' template has no {} placeholder", platform.name, QUERY_PLACEHOLDER
                )));
            }
        }

        Ok(())
    }

    pub fn learning_url(&self, skill: &str) -> Option<&str> {
        self.learning_resources
            .iter()
            .find(|r| r.skill == skill)
            .map(|r| r.url.as_str())
    }

    pub fn jobs_for_skill(&self, skill: &str) -> &[String] {
        self.job_suggestions
            .iter()
            .find(|j| j.skill == skill)
            .map(|j| j.jobs.as_slice())
            .unwrap_or(&[])
    }
}

impl JobPlatform {
    /// Build the search URL for a job title ("Data Analyst" -> "Data+Analyst")
    pub fn search_url(&self, job_title: &str) -> String {
        let query = job_title.replace(' ', "+");
        self.url_template.replace(QUERY_PLACEHOLDER, &query)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn resource(skill: &str, url: &str) -> LearningResource {
    LearningResource { skill: skill.to_string(), url: url.to_string() }
}

fn jobs(skill: &str, titles: &[&str]) -> JobSuggestion {
    JobSuggestion { skill: skill.to_string(), jobs: strings(titles) }
}

fn salary(job_title: &str, india: &str, us: &str) -> SalaryInsight {
    SalaryInsight {
        job_title: job_title.to_string(),
        india: india.to_string(),
        us: us.to_string(),
    }
}

fn platform(name: &str, url_template: &str) -> JobPlatform {
    JobPlatform { name: name.to_string(), url_template: url_template.to_string() }
}

fn career(requires: &[&str], path: &str) -> CareerPathRule {
    CareerPathRule { requires: strings(requires), path: path.to_string() }
}
