use clap::Parser;
use serde::Serialize;
use serde_json::json;
use skillswap::config::{Command, SourceType};
use skillswap::core::ConfigProvider;
use skillswap::domain::model::ProfileUpdate;
use skillswap::domain::ports::ProfileSource;
use skillswap::utils::error::ErrorSeverity;
use skillswap::utils::logger;
use skillswap::{
    Argon2Hasher, CliConfig, HttpProfileSource, JsonFileStore, LocalStorage, MatchReportPipeline,
    ReportEngine, Result, SkillSwapConfig, SkillSwapError, SkillSwapService,
};
use std::time::Duration;

type FileService = SkillSwapService<JsonFileStore<LocalStorage>, Argon2Hasher>;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // Initialize logging
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting skillswap CLI");

    // Load and validate settings
    let settings = match cli.resolve_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("Settings: {:?}", settings);

    match run(&cli.command, &settings).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // Exit code follows error severity
            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2, // retryable
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3, // system error
            };
            std::process::exit(exit_code);
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn file_store(settings: &SkillSwapConfig) -> JsonFileStore<LocalStorage> {
    let storage = LocalStorage::new(settings.store.data_dir.clone());
    JsonFileStore::with_file_name(storage, settings.store.file_name.clone())
}

fn file_service(settings: &SkillSwapConfig) -> FileService {
    SkillSwapService::new(file_store(settings), Argon2Hasher::new())
        .with_min_password_length(settings.security.min_password_length)
}

async fn run_export(settings: &SkillSwapConfig) -> Result<String> {
    match settings.source.r#type {
        SourceType::File => export(file_store(settings), settings).await,
        SourceType::Http => {
            let endpoint = settings.source.endpoint.clone().ok_or_else(|| {
                SkillSwapError::MissingConfigError {
                    field: "source.endpoint".to_string(),
                }
            })?;
            let source = HttpProfileSource::with_timeout(
                endpoint,
                Duration::from_secs(settings.timeout_seconds()),
            )?;
            export(source, settings).await
        }
    }
}

async fn run(command: &Command, settings: &SkillSwapConfig) -> Result<String> {
    let service = file_service(settings);
    match command {
        Command::Register {
            name,
            email,
            password,
        } => to_json(&service.register(name, email, password).await?),
        Command::Login { email, password } => {
            let user = service.authenticate(email, password).await?;
            to_json(&json!({ "authenticated": true, "user": user }))
        }
        Command::AddOffer {
            email,
            skill,
            level,
        } => to_json(&service.add_offer(email, skill, *level).await?),
        Command::AddRequest {
            email,
            skill,
            description,
        } => to_json(&service.add_request(email, skill, description.clone()).await?),
        Command::RemoveOffer { email, skill } => {
            let removed = service.remove_offer(email, skill).await?;
            to_json(&json!({ "removed": removed }))
        }
        Command::RemoveRequest { email, skill } => {
            let removed = service.remove_request(email, skill).await?;
            to_json(&json!({ "removed": removed }))
        }
        Command::Profile { email } => to_json(&service.profile(email).await?),
        Command::UpdateProfile {
            email,
            name,
            about,
            linkedin,
            github,
            twitter,
        } => {
            let update = ProfileUpdate {
                name: name.clone(),
                about: about.clone(),
                linkedin_url: linkedin.clone(),
                github_url: github.clone(),
                twitter_url: twitter.clone(),
            };
            to_json(&service.update_profile(email, update).await?)
        }
        Command::Users => to_json(&service.users().await?),
        Command::Offers => to_json(&service.offers().await?),
        Command::Requests => to_json(&service.requests().await?),
        Command::Matches { email } => to_json(&service.matches_for(email).await?),
        Command::AllMatches => to_json(&service.all_matches().await?),
        Command::Export { .. } => run_export(settings).await,
    }
}

async fn export<P: ProfileSource>(source: P, settings: &SkillSwapConfig) -> Result<String> {
    let storage = LocalStorage::new(settings.export.output_path().to_string());
    let pipeline = MatchReportPipeline::new(source, storage, settings.export.clone());
    let engine = ReportEngine::new(pipeline);

    let output_path = engine.run().await?;
    tracing::info!("✅ Export completed successfully!");
    to_json(&json!({ "output_path": output_path }))
}
