use crate::config::toml_config::{SkillSwapConfig, SourceType};
use crate::domain::skill::SkillLevel;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "skillswap")]
#[command(about = "Peer-to-peer skill exchange: register, list skills and find matches")]
pub struct CliConfig {
    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory holding the profile document (overrides store.data_dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    File,
    Http,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "SKILLSWAP_PASSWORD")]
        password: String,
    },
    /// Check an email/password pair
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SKILLSWAP_PASSWORD")]
        password: String,
    },
    /// Offer to teach a skill
    AddOffer {
        #[arg(long)]
        email: String,
        #[arg(long)]
        skill: String,
        #[arg(long, default_value = "intermediate")]
        level: SkillLevel,
    },
    /// Ask to learn a skill
    AddRequest {
        #[arg(long)]
        email: String,
        #[arg(long)]
        skill: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Stop offering a skill
    RemoveOffer {
        #[arg(long)]
        email: String,
        #[arg(long)]
        skill: String,
    },
    /// Withdraw a learning request
    RemoveRequest {
        #[arg(long)]
        email: String,
        #[arg(long)]
        skill: String,
    },
    /// Show one user's profile
    Profile { email: String },
    /// Update name, about text and social links
    UpdateProfile {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        about: Option<String>,
        #[arg(long)]
        linkedin: Option<String>,
        #[arg(long)]
        github: Option<String>,
        #[arg(long)]
        twitter: Option<String>,
    },
    /// List all users
    Users,
    /// List every skill offer
    Offers,
    /// List every skill request
    Requests,
    /// Matches for one user
    Matches { email: String },
    /// Every teacher/learner/skill match in the store
    AllMatches,
    /// Write a ZIP report of all matches
    Export {
        /// Where to read profiles from (overrides source.type)
        #[arg(long, value_enum)]
        source: Option<SourceArg>,
        /// Remote profile export URL (overrides source.endpoint)
        #[arg(long)]
        endpoint: Option<String>,
        /// Output directory (overrides export.output_path)
        #[arg(long)]
        output_path: Option<String>,
        /// Comma-separated subset of csv,tsv,json
        #[arg(long, value_delimiter = ',')]
        formats: Vec<String>,
    },
}

impl CliConfig {
    /// Loads the settings file if one was given, applies flag overrides and
    /// validates the result.
    pub fn resolve_settings(&self) -> Result<SkillSwapConfig> {
        let mut settings = match &self.config {
            Some(path) => SkillSwapConfig::from_file(path)?,
            None => SkillSwapConfig::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            settings.store.data_dir = data_dir.clone();
        }

        if let Command::Export {
            source,
            endpoint,
            output_path,
            formats,
        } = &self.command
        {
            if let Some(source) = source {
                settings.source.r#type = match source {
                    SourceArg::File => SourceType::File,
                    SourceArg::Http => SourceType::Http,
                };
            }
            if let Some(endpoint) = endpoint {
                settings.source.endpoint = Some(endpoint.clone());
            }
            if let Some(output_path) = output_path {
                settings.export.output_path = output_path.clone();
            }
            if !formats.is_empty() {
                settings.export.formats = formats.clone();
            }
        }

        settings.validate()?;
        Ok(settings)
    }
}
