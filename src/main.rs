//! Job matcher: score, rank and alert on job postings for a profile

use clap::Parser;
use job_matcher::cli::{self, AlertAction, Cli, Commands, ConfigAction};
use job_matcher::config::{Config, OutputFormat};
use job_matcher::error::{JobMatcherError, Result};
use job_matcher::input::upload::{describe_paths, validate_batch, UploadError, UploadPurpose};
use job_matcher::input::InputManager;
use job_matcher::meeting::{MeetingLinkGenerator, MeetingPlatform, TokioClock};
use job_matcher::output::report::{JobScore, UploadReport};
use job_matcher::output::{Report, ReportGenerator};
use job_matcher::processing::alerts::{AlertCriteria, AlertService};
use job_matcher::processing::match_scorer::MatchScorer;
use job_matcher::processing::recommender::Recommender;
use job_matcher::processing::skill_gap::analyze_skill_gaps;
use job_matcher::storage::JsonFileAlertStore;
use log::{debug, error, info, warn};
use std::path::Path;
use std::process;

const DATA_EXTENSIONS: [&str; 2] = ["json", "toml"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let format = match cli.output.as_deref().map(cli::parse_output_format) {
        Some(Ok(format)) => format,
        Some(Err(e)) => {
            error!("{}", e);
            process::exit(2);
        }
        None => config.output.format,
    };

    if let Err(e) = run_command(cli.command, config, &config_path, format).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path, format: OutputFormat) -> Result<()> {
    let generator = ReportGenerator::new(config.output.color_output);
    let mut input = InputManager::new();

    let report = match command {
        Commands::Score { profile, jobs, job_id } => {
            check_data_file(&profile)?;
            check_data_file(&jobs)?;
            let profile = input.load_profile(&profile).await?;
            let jobs = input.load_jobs(&jobs).await?;

            let scorer = MatchScorer::with_weights(config.scoring.weights);
            let scores: Vec<JobScore> = jobs
                .iter()
                .filter(|job| job_id.as_deref().map_or(true, |id| job.id == id))
                .map(|job| JobScore::new(job, scorer.score(&profile, job)))
                .collect();

            if let Some(id) = job_id {
                if scores.is_empty() {
                    return Err(JobMatcherError::InvalidInput(format!("No job with id {}", id)));
                }
            }

            info!("Scored {} job(s)", scores.len());
            Report::Scores(scores)
        }

        Commands::Recommend { profile, jobs, limit } => {
            check_data_file(&profile)?;
            check_data_file(&jobs)?;
            let profile = input.load_profile(&profile).await?;
            let jobs = input.load_jobs(&jobs).await?;

            let recommender = Recommender::new(MatchScorer::with_weights(config.scoring.weights))
                .with_min_score(config.scoring.min_recommendation_score);
            let limit = limit.unwrap_or(config.scoring.recommendation_limit);
            let recommendations = recommender.recommend(&profile, &jobs, limit);

            info!("{} of {} job(s) recommended", recommendations.len(), jobs.len());
            Report::Recommendations(recommendations)
        }

        Commands::Gaps { profile, jobs } => {
            check_data_file(&profile)?;
            check_data_file(&jobs)?;
            let profile = input.load_profile(&profile).await?;
            let jobs = input.load_jobs(&jobs).await?;
            Report::SkillGaps(analyze_skill_gaps(&profile, &jobs))
        }

        Commands::Alerts { action } => {
            let service = AlertService::new(JsonFileAlertStore::new(&config.storage.alerts_path));
            debug!("Using alert store at {}", config.storage.alerts_path.display());
            run_alert_action(action, &service, &mut input).await?
        }

        Commands::Validate { purpose, files } => {
            let purpose: UploadPurpose = purpose
                .parse()
                .map_err(|e: UploadError| JobMatcherError::InvalidInput(e.message))?;

            let (uploads, unreadable) = describe_paths(&files).await;
            for rejection in &unreadable {
                warn!("{}", rejection.error);
            }

            let mut validation = validate_batch(&uploads, purpose);
            validation.errors = unreadable.into_iter().chain(validation.errors).collect();
            let failed = !validation.is_valid();
            let out = generator.generate(&Report::Uploads(UploadReport { purpose, validation }), format)?;
            println!("{}", out);

            if failed {
                return Err(JobMatcherError::InvalidInput("One or more files failed validation".to_string()));
            }
            return Ok(());
        }

        Commands::Meeting { platform, title } => {
            let platform: MeetingPlatform = platform.parse()?;
            let link = MeetingLinkGenerator::new(TokioClock)
                .with_delay(config.meeting_delay())
                .generate(platform, &title)
                .await;
            Report::Meeting(link)
        }

        Commands::Config { action } => {
            run_config_action(action, &config, config_path)?;
            return Ok(());
        }
    };

    println!("{}", generator.generate(&report, format)?);
    Ok(())
}

async fn run_alert_action(
    action: AlertAction,
    service: &AlertService<JsonFileAlertStore>,
    input: &mut InputManager,
) -> Result<Report> {
    let report = match action {
        AlertAction::Create { user, keywords, location, job_type, min_salary } => {
            let criteria = AlertCriteria {
                keywords: keywords
                    .into_iter()
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty())
                    .collect(),
                location,
                job_type,
                min_salary,
            };
            let alert = service.create_alert(&user, criteria)?;
            if alert.is_unrestricted() {
                info!("Alert {} has no criteria and will match every job", alert.id);
            }
            Report::Alerts(vec![alert])
        }
        AlertAction::List { user } => Report::Alerts(service.list_alerts(&user)?),
        AlertAction::Delete { user, id } => {
            service.delete_alert(&user, &id)?;
            Report::Alerts(service.list_alerts(&user)?)
        }
        AlertAction::Toggle { user, id } => {
            let active = service.toggle_alert(&user, &id)?;
            info!("Alert {} is now {}", id, if active { "active" } else { "paused" });
            Report::Alerts(service.list_alerts(&user)?)
        }
        AlertAction::Check { user, jobs } => {
            check_data_file(&jobs)?;
            let jobs = input.load_jobs(&jobs).await?;
            Report::AlertMatches(service.check_alerts(&user, &jobs)?)
        }
    };
    Ok(report)
}

fn run_config_action(action: Option<ConfigAction>, config: &Config, config_path: &Path) -> Result<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            let w = &config.scoring.weights;
            println!("Configuration: {}\n", config_path.display());
            println!("Alerts file: {}", config.storage.alerts_path.display());
            println!("Output format: {:?}", config.output.format);
            println!("Meeting delay: {}ms", config.meeting.delay_ms);
            println!("\nScoring:");
            println!("  Minimum recommendation score: {}", config.scoring.min_recommendation_score);
            println!("  Recommendation limit: {}", config.scoring.recommendation_limit);
            println!("  Weights: skills {:.0}%, experience {:.0}%, location {:.0}%, salary {:.0}%, type {:.0}%",
                w.skills * 100.0,
                w.experience * 100.0,
                w.location * 100.0,
                w.salary * 100.0,
                w.job_type * 100.0
            );
        }
        Some(ConfigAction::Reset) => {
            Config::reset(config_path)?;
            println!("Configuration reset to defaults: {}", config_path.display());
        }
        Some(ConfigAction::Path) => {
            println!("{}", config_path.display());
        }
    }
    Ok(())
}

fn check_data_file(path: &Path) -> Result<()> {
    cli::validate_file_extension(path, &DATA_EXTENSIONS)
        .map_err(|e| JobMatcherError::InvalidInput(format!("{}: {}", path.display(), e)))
}
