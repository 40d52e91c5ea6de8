pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::SkillSwapConfig;

pub use adapters::{
    file_store::JsonFileStore, http_source::HttpProfileSource,
    memory_store::InMemoryProfileStore, password::Argon2Hasher, storage::LocalStorage,
};
pub use app::pipelines::match_report::MatchReportPipeline;
pub use core::{report::ReportEngine, service::SkillSwapService};
pub use domain::model::{Match, MatchReport, ProfileSnapshot, UserMatch, UserProfile};
pub use domain::skill::{SkillLevel, SkillName};
pub use utils::error::{Result, SkillSwapError};
