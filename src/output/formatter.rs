//! Output formatters: console, JSON, Markdown and HTML

use crate::config::OutputFormat;
use crate::catalog::SalaryInsight;
use crate::error::{Result, ResumeAnalyzerError};
use crate::output::report::{as_percentage, ReportEnvelope, ReportMetadata};
use crate::processing::ats_matcher::AtsTier;
use crate::processing::metrics::{Grade, JobLinks, MatchTier};
use askama::Template;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

const NO_RESOURCE: &str = "Search online";

pub trait OutputFormatter {
    fn format_report(&self, report: &ReportEnvelope) -> Result<String>;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter;

/// Report generator that dispatches to the formatter for each output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Analysis Report</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 960px; margin: 0 auto; padding: 24px; color: #222; background: #f7f8fa; }
        .card { background: #fff; border-radius: 8px; padding: 16px 24px; margin-bottom: 16px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
        .scores { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 12px; }
        .score { text-align: center; }
        .score .value { font-size: 2em; font-weight: bold; }
        .tier-excellent { color: #1e8e3e; }
        .tier-fair { color: #e37400; }
        .tier-poor { color: #d93025; }
        .notice { background: #fff4e5; border-left: 4px solid #e37400; padding: 8px 12px; }
        .skill { display: inline-block; background: #e8f0fe; border-radius: 12px; padding: 2px 10px; margin: 2px; }
        .skill.missing { background: #fce8e6; }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 6px 8px; border-bottom: 1px solid #eee; }
        footer { color: #666; font-size: 0.85em; }
    </style>
</head>
<body>
    <h1>Resume Analysis Report</h1>
    {% for notice in notices %}
    <p class="notice">{{ notice }}</p>
    {% endfor %}
    <div class="card scores">
        <div class="score"><div class="value {{ match_class }}">{{ similarity }}%</div><div>Semantic Match</div></div>
        <div class="score"><div class="value {{ ats_class }}">{{ ats_score }}%</div><div>ATS Keyword Match</div></div>
        <div class="score"><div class="value">{{ grade }}</div><div>Resume Grade</div></div>
        <div class="score"><div class="value">{{ hiring_probability }}%</div><div>Hiring Probability</div></div>
    </div>
    <div class="card">
        <p class="{{ match_class }}">{{ match_message }}</p>
        <p class="{{ ats_class }}">{{ ats_message }}</p>
    </div>
    <div class="card">
        <h2>Skills</h2>
        <p><strong>Resume:</strong> {% for skill in resume_skills %}<span class="skill">{{ skill }}</span>{% endfor %}</p>
        <p><strong>Job description:</strong> {% for skill in jd_skills %}<span class="skill">{{ skill }}</span>{% endfor %}</p>
        {% if has_missing_skills %}
        <p><strong>Missing:</strong> {% for skill in missing_skills %}<span class="skill missing">{{ skill }}</span>{% endfor %}</p>
        {% else %}
        <p>No missing skills.</p>
        {% endif %}
    </div>
    {% if has_roadmap %}
    <div class="card">
        <h2>Learning Roadmap</h2>
        <ol>
        {% for step in roadmap %}
            <li>Learn {{ step.skill }}: {% if step.has_resource %}<a href="{{ step.resource }}">{{ step.resource }}</a>{% else %}{{ step.resource }}{% endif %}</li>
        {% endfor %}
        </ol>
    </div>
    {% endif %}
    <div class="card">
        <h2>Improvement Suggestions</h2>
        <ul>
        {% for suggestion in improvement_suggestions %}
            <li>{{ suggestion }}</li>
        {% endfor %}
        </ul>
    </div>
    {% if has_suggested_jobs %}
    <div class="card">
        <h2>Suggested Jobs</h2>
        <table>
            <tr><th>Job</th><th>Search</th></tr>
            {% for job in job_links %}
            <tr><td>{{ job.job_title }}</td><td>{% for link in job.links %}<a href="{{ link.url }}">{{ link.platform }}</a> {% endfor %}</td></tr>
            {% endfor %}
        </table>
    </div>
    {% endif %}
    {% if has_salary_insights %}
    <div class="card">
        <h2>Salary Insights</h2>
        <table>
            <tr><th>Job</th><th>India</th><th>US</th></tr>
            {% for row in salary_insights %}
            <tr><td>{{ row.job_title }}</td><td>{{ row.india }}</td><td>{{ row.us }}</td></tr>
            {% endfor %}
        </table>
    </div>
    {% endif %}
    {% if has_career_paths %}
    <div class="card">
        <h2>Career Paths</h2>
        <ul>
        {% for path in career_paths %}
            <li>{{ path }}</li>
        {% endfor %}
        </ul>
    </div>
    {% endif %}
    <footer>
        <p>Generated {{ generated_at }} in {{ processing_time }}ms by resume-analyzer v{{ version }} using {{ embedding_model }}</p>
        <p>Resume: {{ resume_file }} | Job: {{ job_file }}</p>
    </footer>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    notices: Vec<String>,
    similarity: u8,
    match_class: &'static str,
    match_message: &'static str,
    ats_score: String,
    ats_class: &'static str,
    ats_message: &'static str,
    grade: String,
    hiring_probability: String,
    resume_skills: Vec<String>,
    jd_skills: Vec<String>,
    missing_skills: Vec<String>,
    has_missing_skills: bool,
    roadmap: Vec<HtmlRoadmapStep>,
    has_roadmap: bool,
    improvement_suggestions: Vec<String>,
    job_links: Vec<JobLinks>,
    has_suggested_jobs: bool,
    salary_insights: Vec<SalaryInsight>,
    has_salary_insights: bool,
    career_paths: Vec<String>,
    has_career_paths: bool,
    generated_at: String,
    processing_time: u64,
    version: String,
    embedding_model: String,
    resume_file: String,
    job_file: String,
}

struct HtmlRoadmapStep {
    skill: String,
    resource: String,
    has_resource: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".blue().bold(), title.blue().bold())
        } else {
            format!("\n▓ {}\n", title)
        }
    }

    fn skill_list(skills: &[String]) -> String {
        if skills.is_empty() {
            "none".to_string()
        } else {
            skills.join(", ")
        }
    }
}

fn match_tier_color(tier: MatchTier) -> Color {
    match tier {
        MatchTier::Excellent => Color::Green,
        MatchTier::Moderate => Color::Yellow,
        MatchTier::Weak => Color::Red,
    }
}

fn ats_tier_color(tier: AtsTier) -> Color {
    match tier {
        AtsTier::Excellent => Color::Green,
        AtsTier::Fair => Color::Yellow,
        AtsTier::Poor => Color::Red,
    }
}

fn grade_color(grade: Grade) -> Color {
    match grade {
        Grade::A => Color::Green,
        Grade::B => Color::BrightGreen,
        Grade::C => Color::Yellow,
        Grade::D => Color::Red,
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ReportEnvelope) -> Result<String> {
        let analysis = &report.analysis;
        let metrics = &analysis.metrics;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME ANALYSIS"));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at_display(),
            report.metadata.processing_time_ms
        ));

        for notice in &analysis.notices {
            output.push_str(&format!("{}\n", self.colorize(notice.message(), Color::Yellow)));
        }

        output.push_str(&self.format_header("Scores"));
        output.push_str(&format!("Semantic match:     {}%\n", as_percentage(metrics.similarity)));
        output.push_str(&format!("ATS keyword match:  {:.1}%\n", metrics.ats.score));
        output.push_str(&format!(
            "Resume grade:       {}\n",
            self.colorize(&metrics.grade.to_string(), grade_color(metrics.grade))
        ));
        output.push_str(&format!("Hiring probability: {:.1}%\n\n", metrics.hiring_probability));
        output.push_str(&format!(
            "{}\n",
            self.colorize(metrics.match_tier.message(), match_tier_color(metrics.match_tier))
        ));
        output.push_str(&format!(
            "{}\n",
            self.colorize(metrics.ats.tier.message(), ats_tier_color(metrics.ats.tier))
        ));

        output.push_str(&self.format_header("Skills"));
        output.push_str(&format!("Resume skills:  {}\n", Self::skill_list(&analysis.resume_skills.to_vec())));
        output.push_str(&format!("Job skills:     {}\n", Self::skill_list(&analysis.jd_skills.to_vec())));
        if metrics.missing_skills.is_empty() {
            output.push_str(&format!("{}\n", self.colorize("No missing skills.", Color::Green)));
        } else {
            output.push_str(&format!(
                "Missing skills: {}\n",
                self.colorize(&metrics.missing_skills.to_vec().join(", "), Color::Red)
            ));
        }

        if !metrics.roadmap.is_empty() {
            output.push_str(&self.format_header("Learning Roadmap"));
            for step in &metrics.roadmap {
                output.push_str(&format!(
                    "  Step {}: Learn {} -> {}\n",
                    step.step,
                    step.skill,
                    step.resource.as_deref().unwrap_or(NO_RESOURCE)
                ));
            }
        }

        output.push_str(&self.format_header("Improvement Suggestions"));
        for suggestion in &metrics.improvement_suggestions {
            output.push_str(&format!("  • {}\n", suggestion));
        }

        if !metrics.suggested_jobs.is_empty() {
            output.push_str(&self.format_header("Suggested Jobs"));
            for job in &metrics.suggested_jobs {
                output.push_str(&format!("  • {}\n", self.colorize(job, Color::Cyan)));
            }
        }

        if self.detailed {
            if !metrics.career_paths.is_empty() {
                output.push_str(&self.format_header("Career Paths"));
                for path in &metrics.career_paths {
                    output.push_str(&format!("  • {}\n", path));
                }
            }

            if !metrics.salary_insights.is_empty() {
                output.push_str(&self.format_header("Salary Insights"));
                for row in &metrics.salary_insights {
                    output.push_str(&format!("  {:<28} India: {:<12} US: {}\n", row.job_title, row.india, row.us));
                }
            }

            if !metrics.job_links.is_empty() {
                output.push_str(&self.format_header("Job Search Links"));
                for job in &metrics.job_links {
                    output.push_str(&format!("  {}\n", job.job_title));
                    for link in &job.links {
                        output.push_str(&format!("    {}: {}\n", link.platform, link.url));
                    }
                }
            }

            output.push_str(&self.format_header("Keywords"));
            output.push_str(&format!(
                "Matched ({}/{}): {}\n",
                metrics.ats.matched_keywords.len(),
                metrics.ats.jd_keyword_count,
                Self::skill_list(&metrics.ats.matched_keywords)
            ));
            output.push_str(&format!("Missing: {}\n", Self::skill_list(&metrics.ats.missing_keywords)));

            output.push_str(&format!(
                "\nModel: {} | Embedding dimension: {} | Raw cosine: {:.4}\n",
                report.metadata.embedding_model,
                analysis.similarity.embedding_dim,
                analysis.similarity.raw_score
            ));
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ReportEnvelope) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ReportEnvelope) -> Result<String> {
        let analysis = &report.analysis;
        let metrics = &analysis.metrics;
        let mut output = String::new();

        output.push_str("# Resume Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at_display(),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                ReportMetadata::short_source(&report.metadata.resume_source),
                ReportMetadata::short_source(&report.metadata.job_source)
            ));
        }

        for notice in &analysis.notices {
            output.push_str(&format!("> **Note:** {}\n\n", notice.message()));
        }

        output.push_str("## Scores\n\n");
        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");
        output.push_str(&format!("| Semantic Match | {}% |\n", as_percentage(metrics.similarity)));
        output.push_str(&format!("| ATS Keyword Match | {:.1}% |\n", metrics.ats.score));
        output.push_str(&format!("| Resume Grade | {} |\n", metrics.grade));
        output.push_str(&format!("| Hiring Probability | {:.1}% |\n\n", metrics.hiring_probability));
        output.push_str(&format!("{}\n\n{}\n\n", metrics.match_tier.message(), metrics.ats.tier.message()));

        output.push_str("## Skills\n\n");
        output.push_str(&format!("- **Resume:** {}\n", analysis.resume_skills.to_vec().join(", ")));
        output.push_str(&format!("- **Job description:** {}\n", analysis.jd_skills.to_vec().join(", ")));
        if metrics.missing_skills.is_empty() {
            output.push_str("- **Missing:** No missing skills.\n\n");
        } else {
            output.push_str(&format!("- **Missing:** {}\n\n", metrics.missing_skills.to_vec().join(", ")));
        }

        if !metrics.roadmap.is_empty() {
            output.push_str("## Learning Roadmap\n\n");
            for step in &metrics.roadmap {
                match &step.resource {
                    Some(url) => output.push_str(&format!("{}. Learn **{}**: [{}]({})\n", step.step, step.skill, url, url)),
                    None => output.push_str(&format!("{}. Learn **{}**: {}\n", step.step, step.skill, NO_RESOURCE)),
                }
            }
            output.push('\n');
        }

        output.push_str("## Improvement Suggestions\n\n");
        for suggestion in &metrics.improvement_suggestions {
            output.push_str(&format!("- {}\n", suggestion));
        }
        output.push('\n');

        if !metrics.job_links.is_empty() {
            output.push_str("## Suggested Jobs\n\n");
            for job in &metrics.job_links {
                let links: Vec<String> = job.links
                    .iter()
                    .map(|link| format!("[{}]({})", link.platform, link.url))
                    .collect();
                output.push_str(&format!("- **{}**: {}\n", job.job_title, links.join(" · ")));
            }
            output.push('\n');
        }

        if !metrics.salary_insights.is_empty() {
            output.push_str("## Salary Insights\n\n");
            output.push_str("| Job | India | US |\n");
            output.push_str("|-----|-------|----|\n");
            for row in &metrics.salary_insights {
                output.push_str(&format!("| {} | {} | {} |\n", row.job_title, row.india, row.us));
            }
            output.push('\n');
        }

        if !metrics.career_paths.is_empty() {
            output.push_str("## Career Paths\n\n");
            for path in &metrics.career_paths {
                output.push_str(&format!("- {}\n", path));
            }
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by resume-analyzer v{} using {}*\n",
                report.metadata.tool_version, report.metadata.embedding_model
            ));
        }

        Ok(output)
    }
}

impl HtmlFormatter {
    fn create_template_data(report: &ReportEnvelope) -> HtmlTemplate {
        let analysis = &report.analysis;
        let metrics = &analysis.metrics;

        let match_class = match metrics.match_tier {
            MatchTier::Excellent => "tier-excellent",
            MatchTier::Moderate => "tier-fair",
            MatchTier::Weak => "tier-poor",
        };
        let ats_class = match metrics.ats.tier {
            AtsTier::Excellent => "tier-excellent",
            AtsTier::Fair => "tier-fair",
            AtsTier::Poor => "tier-poor",
        };

        let roadmap: Vec<HtmlRoadmapStep> = metrics.roadmap
            .iter()
            .map(|step| HtmlRoadmapStep {
                skill: step.skill.clone(),
                resource: step.resource.clone().unwrap_or_else(|| NO_RESOURCE.to_string()),
                has_resource: step.resource.is_some(),
            })
            .collect();

        HtmlTemplate {
            notices: analysis.notices.iter().map(|n| n.message().to_string()).collect(),
            similarity: as_percentage(metrics.similarity),
            match_class,
            match_message: metrics.match_tier.message(),
            ats_score: format!("{:.1}", metrics.ats.score),
            ats_class,
            ats_message: metrics.ats.tier.message(),
            grade: metrics.grade.to_string(),
            hiring_probability: format!("{:.1}", metrics.hiring_probability),
            resume_skills: analysis.resume_skills.to_vec(),
            jd_skills: analysis.jd_skills.to_vec(),
            missing_skills: metrics.missing_skills.to_vec(),
            has_missing_skills: !metrics.missing_skills.is_empty(),
            has_roadmap: !roadmap.is_empty(),
            roadmap,
            improvement_suggestions: metrics.improvement_suggestions.clone(),
            job_links: metrics.job_links.clone(),
            has_suggested_jobs: !metrics.job_links.is_empty(),
            salary_insights: metrics.salary_insights.clone(),
            has_salary_insights: !metrics.salary_insights.is_empty(),
            career_paths: metrics.career_paths.clone(),
            has_career_paths: !metrics.career_paths.is_empty(),
            generated_at: report.metadata.generated_at_display(),
            processing_time: report.metadata.processing_time_ms,
            version: report.metadata.tool_version.clone(),
            embedding_model: report.metadata.embedding_model.clone(),
            resume_file: ReportMetadata::short_source(&report.metadata.resume_source),
            job_file: ReportMetadata::short_source(&report.metadata.job_source),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ReportEnvelope) -> Result<String> {
        Self::create_template_data(report)
            .render()
            .map_err(|e| ResumeAnalyzerError::OutputFormatting(e.to_string()))
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter,
        }
    }

    pub fn generate_report(&self, report: &ReportEnvelope, format: OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        };
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// A `--save` target that is an existing directory gets a generated, timestamped file name
pub fn resolve_save_path(path: &Path, format: OutputFormat, resume_name: &str) -> PathBuf {
    if path.is_dir() {
        path.join(suggest_filename(format, resume_name, true))
    } else {
        path.to_path_buf()
    }
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_analysis{}.{}", base_name, timestamp_suffix, extension)
}
