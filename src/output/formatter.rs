//! Output formatters for console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::{JobMatcherError, Result};
use crate::input::upload::format_size;
use crate::output::report::*;
use crate::processing::skill_gap::SkillPriority;
use colored::{Color, Colorize};
use std::fmt::Write;

/// Trait for rendering command reports
pub trait OutputFormatter {
    fn format_report(&self, report: &Report) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

/// Picks the formatter for a requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ReportGenerator {
    pub fn new(use_colors: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter,
        }
    }

    pub fn generate(&self, report: &Report, format: OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        };
        formatter.format_report(report)
    }
}

fn fmt_err(e: std::fmt::Error) -> JobMatcherError {
    JobMatcherError::OutputFormatting(e.to_string())
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().underline().to_string()
        } else {
            text.to_string()
        }
    }

    fn score(&self, score: u8) -> String {
        let color = match score {
            80..=100 => Color::Green,
            60..=79 => Color::Cyan,
            40..=59 => Color::Yellow,
            _ => Color::Red,
        };
        self.paint(&format!("{:>3}% ({})", score, score_label(score)), color)
    }

    fn write_report(&self, out: &mut String, report: &Report) -> std::fmt::Result {
        match report {
            Report::Scores(scores) => {
                writeln!(out, "{}", self.heading("Match Scores"))?;
                for s in scores {
                    writeln!(out, "\n{} {} @ {} [{}]", self.score(s.result.score), s.title, s.company, s.job_id)?;
                    writeln!(out, "  Matched skills: {}", join_or_dash(&s.result.matched_skills))?;
                    writeln!(out, "  Missing skills: {}", join_or_dash(&s.result.missing_skills))?;
                    let b = &s.result.breakdown;
                    writeln!(
                        out,
                        "  Breakdown: skills {:.1}, experience {:.1}, location {:.1}, salary {:.1}, type {:.1}",
                        b.skills, b.experience, b.location, b.salary, b.job_type
                    )?;
                }
            }
            Report::Recommendations(recs) => {
                writeln!(out, "{}", self.heading("Recommended Jobs"))?;
                if recs.is_empty() {
                    writeln!(out, "No jobs matched well enough to recommend.")?;
                }
                for (i, rec) in recs.iter().enumerate() {
                    writeln!(out, "\n{}. {} {} @ {}", i + 1, self.score(rec.match_score), rec.job.title, rec.job.company)?;
                    writeln!(out, "   {}", self.paint(&rec.reason, Color::BrightBlack))?;
                    if !rec.missing_skills.is_empty() {
                        writeln!(out, "   To learn: {}", rec.missing_skills.join(", "))?;
                    }
                }
            }
            Report::SkillGaps(gaps) => {
                writeln!(out, "{}", self.heading("Skill Gap Analysis"))?;
                writeln!(
                    out,
                    "Coverage: {}% ({} of {} demanded skills)",
                    gaps.skill_coverage, gaps.user_skill_count, gaps.total_demanded_skills
                )?;
                if gaps.top_missing_skills.is_empty() {
                    writeln!(out, "No missing skills.")?;
                } else {
                    writeln!(out, "\nTop missing skills:")?;
                    for skill in &gaps.top_missing_skills {
                        let color = match skill.priority {
                            SkillPriority::High => Color::Red,
                            SkillPriority::Medium => Color::Yellow,
                            SkillPriority::Low => Color::White,
                        };
                        let priority = skill.priority.to_string();
                        writeln!(
                            out,
                            "  • {} - {} jobs ({}%), priority {}",
                            skill.skill,
                            skill.demand_count,
                            skill.demand_percentage,
                            self.paint(&priority, color)
                        )?;
                    }
                    if gaps.missing_skills.len() > gaps.top_missing_skills.len() {
                        writeln!(
                            out,
                            "  ... and {} more",
                            gaps.missing_skills.len() - gaps.top_missing_skills.len()
                        )?;
                    }
                }
            }
            Report::Alerts(alerts) => {
                writeln!(out, "{}", self.heading("Job Alerts"))?;
                if alerts.is_empty() {
                    writeln!(out, "No alerts saved.")?;
                }
                for alert in alerts {
                    let status = if alert.active {
                        self.paint("active", Color::Green)
                    } else {
                        self.paint("paused", Color::Yellow)
                    };
                    writeln!(out, "\n{} [{}]", alert.id, status)?;
                    writeln!(out, "  Keywords: {}", join_or_dash(&alert.keywords))?;
                    if !alert.location.is_empty() {
                        writeln!(out, "  Location: {}", alert.location)?;
                    }
                    if !alert.job_type.is_empty() {
                        writeln!(out, "  Type: {}", alert.job_type)?;
                    }
                    if let Some(min) = alert.min_salary {
                        writeln!(out, "  Minimum salary: {}", min)?;
                    }
                    writeln!(out, "  Created: {}", alert.created_at.format("%Y-%m-%d %H:%M"))?;
                }
            }
            Report::AlertMatches(matches) => {
                writeln!(out, "{}", self.heading("Alert Matches"))?;
                writeln!(out, "{} match(es)", matches.len())?;
                for m in matches {
                    writeln!(out, "  • {} @ {} ({}) - alert {}", m.job.title, m.job.company, m.job.location, m.alert.id)?;
                }
            }
            Report::Uploads(report) => {
                writeln!(out, "{}", self.heading(&format!("Upload Check ({})", report.purpose)))?;
                for file in &report.validation.valid {
                    writeln!(out, "  {} {} ({})", self.paint("ok", Color::Green), file.name, format_size(file.size))?;
                }
                for rejection in &report.validation.errors {
                    writeln!(
                        out,
                        "  {} [{}] {}",
                        self.paint("rejected", Color::Red),
                        rejection.error.kind.code(),
                        rejection.error.message
                    )?;
                }
            }
            Report::Meeting(link) => {
                writeln!(out, "{}", self.heading("Meeting Link"))?;
                writeln!(out, "Platform: {}", link.platform)?;
                writeln!(out, "Title: {}", link.title)?;
                writeln!(out, "URL: {}", self.paint(&link.url, Color::Blue))?;
                writeln!(out, "Meeting ID: {}", link.meeting_id)?;
                if let Some(passcode) = &link.passcode {
                    writeln!(out, "Passcode: {}", passcode)?;
                }
            }
        }
        Ok(())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut out = String::new();
        self.write_report(&mut out, report).map_err(fmt_err)?;
        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    fn write_report(&self, out: &mut String, report: &Report) -> std::fmt::Result {
        match report {
            Report::Scores(scores) => {
                writeln!(out, "# Match Scores\n")?;
                writeln!(out, "| Job | Company | Score | Matched | Missing |")?;
                writeln!(out, "|-----|---------|-------|---------|---------|")?;
                for s in scores {
                    writeln!(
                        out,
                        "| {} | {} | {}% | {} | {} |",
                        s.title,
                        s.company,
                        s.result.score,
                        join_or_dash(&s.result.matched_skills),
                        join_or_dash(&s.result.missing_skills)
                    )?;
                }
            }
            Report::Recommendations(recs) => {
                writeln!(out, "# Recommended Jobs\n")?;
                for (i, rec) in recs.iter().enumerate() {
                    writeln!(out, "{}. **{}** at {} - {}%", i + 1, rec.job.title, rec.job.company, rec.match_score)?;
                    writeln!(out, "   - {}", rec.reason)?;
                }
            }
            Report::SkillGaps(gaps) => {
                writeln!(out, "# Skill Gap Analysis\n")?;
                writeln!(out, "**Coverage:** {}%\n", gaps.skill_coverage)?;
                writeln!(out, "| Skill | Jobs | Share | Priority |")?;
                writeln!(out, "|-------|------|-------|----------|")?;
                for skill in &gaps.missing_skills {
                    writeln!(
                        out,
                        "| {} | {} | {}% | {} |",
                        skill.skill, skill.demand_count, skill.demand_percentage, skill.priority
                    )?;
                }
            }
            Report::Alerts(alerts) => {
                writeln!(out, "# Job Alerts\n")?;
                for alert in alerts {
                    writeln!(
                        out,
                        "- `{}` ({}) keywords: {}",
                        alert.id,
                        if alert.active { "active" } else { "paused" },
                        join_or_dash(&alert.keywords)
                    )?;
                }
            }
            Report::AlertMatches(matches) => {
                writeln!(out, "# Alert Matches\n")?;
                for m in matches {
                    writeln!(out, "- **{}** at {} (alert `{}`)", m.job.title, m.job.company, m.alert.id)?;
                }
            }
            Report::Uploads(report) => {
                writeln!(out, "# Upload Check: {}\n", report.purpose)?;
                for file in &report.validation.valid {
                    writeln!(out, "- [x] {}", file.name)?;
                }
                for rejection in &report.validation.errors {
                    writeln!(out, "- [ ] {} ({})", rejection.error.message, rejection.error.kind.code())?;
                }
            }
            Report::Meeting(link) => {
                writeln!(out, "# {}\n", link.title)?;
                writeln!(out, "- Platform: {}", link.platform)?;
                writeln!(out, "- Link: <{}>", link.url)?;
            }
        }
        Ok(())
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut out = String::new();
        self.write_report(&mut out, report).map_err(fmt_err)?;
        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}
