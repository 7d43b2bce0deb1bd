//! CLI interface for the job matcher

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "job-matcher")]
#[command(about = "Match job seekers to job postings")]
#[command(long_about = "Score and rank jobs against a profile, analyze skill gaps, manage saved job alerts and validate uploads")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: console, json, markdown (defaults to the configured format)
    #[arg(short, long, global = true)]
    pub output: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score every job against a profile
    Score {
        /// Profile file (JSON or TOML)
        #[arg(short, long)]
        profile: PathBuf,

        /// Jobs file (JSON or TOML)
        #[arg(short, long)]
        jobs: PathBuf,

        /// Only score the job with this id
        #[arg(long)]
        job_id: Option<String>,
    },

    /// Recommend the best matching jobs
    Recommend {
        #[arg(short, long)]
        profile: PathBuf,

        #[arg(short, long)]
        jobs: PathBuf,

        /// Maximum number of recommendations
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Report skills in demand that the profile lacks
    Gaps {
        #[arg(short, long)]
        profile: PathBuf,

        #[arg(short, long)]
        jobs: PathBuf,
    },

    /// Saved job alert commands
    Alerts {
        #[command(subcommand)]
        action: AlertAction,
    },

    /// Validate files before upload
    Validate {
        /// Upload purpose: resume, attachment, image
        #[arg(short, long, default_value = "resume")]
        purpose: String,

        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Generate a video meeting link for an interview
    Meeting {
        /// Platform: zoom, google-meet, teams
        #[arg(short, long, default_value = "zoom")]
        platform: String,

        /// Meeting title
        #[arg(short, long, default_value = "Interview")]
        title: String,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum AlertAction {
    /// Save a new alert
    Create {
        #[arg(short, long)]
        user: String,

        /// Comma-separated keywords
        #[arg(short, long, value_delimiter = ',')]
        keywords: Vec<String>,

        #[arg(short, long, default_value = "")]
        location: String,

        #[arg(short = 't', long, default_value = "")]
        job_type: String,

        #[arg(short, long)]
        min_salary: Option<u64>,
    },

    /// List a user's alerts
    List {
        #[arg(short, long)]
        user: String,
    },

    /// Delete an alert
    Delete {
        #[arg(short, long)]
        user: String,

        /// Alert id
        id: String,
    },

    /// Pause or resume an alert
    Toggle {
        #[arg(short, long)]
        user: String,

        /// Alert id
        id: String,
    },

    /// Match a user's active alerts against a jobs file
    Check {
        #[arg(short, long)]
        user: String,

        #[arg(short, long)]
        jobs: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &std::path::Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
