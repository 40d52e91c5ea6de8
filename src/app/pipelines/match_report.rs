use crate::core::matcher;
use crate::core::{ConfigProvider, Pipeline, ProfileSnapshot, Storage, TransformResult};
use crate::domain::model::{MatchRow, ReportSummary};
use crate::domain::ports::ProfileSource;
use crate::utils::error::{Result, SkillSwapError};
use chrono::Utc;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const DEFAULT_ARCHIVE_NAME: &str = "skillswap_matches.zip";

/// Snapshot → all matches → CSV/TSV/JSON files bundled in one ZIP archive.
pub struct MatchReportPipeline<P: ProfileSource, S: Storage, C: ConfigProvider> {
    pub(crate) source: P,
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<P: ProfileSource, S: Storage, C: ConfigProvider> MatchReportPipeline<P, S, C> {
    pub fn new(source: P, storage: S, config: C) -> Self {
        Self {
            source,
            storage,
            config,
        }
    }
}

fn render_delimited(rows: &[MatchRow], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| SkillSwapError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[async_trait::async_trait]
impl<P: ProfileSource, S: Storage, C: ConfigProvider> Pipeline for MatchReportPipeline<P, S, C> {
    async fn extract(&self) -> Result<ProfileSnapshot> {
        self.source.snapshot().await
    }

    async fn transform(&self, snapshot: ProfileSnapshot) -> Result<TransformResult> {
        let matches = matcher::find_matches(&snapshot.users);

        let mut rows = Vec::with_capacity(matches.len());
        for m in &matches {
            let (Some(teacher), Some(learner)) = (snapshot.get(m.teacher), snapshot.get(m.learner))
            else {
                continue;
            };
            let level = teacher
                .offer(&m.skill)
                .map(|offer| offer.level)
                .unwrap_or_default();
            rows.push(MatchRow {
                teacher_id: teacher.id,
                teacher_email: teacher.email.clone(),
                learner_id: learner.id,
                learner_email: learner.email.clone(),
                skill: m.skill.to_string(),
                level,
            });
        }

        // header row is only written once a record exists
        let csv_output = if rows.is_empty() {
            "teacher_id,teacher_email,learner_id,learner_email,skill,level\n".to_string()
        } else {
            render_delimited(&rows, b',')?
        };
        let tsv_output = if rows.is_empty() {
            "teacher_id\tteacher_email\tlearner_id\tlearner_email\tskill\tlevel\n".to_string()
        } else {
            render_delimited(&rows, b'\t')?
        };
        let json_output = serde_json::to_string_pretty(&rows)?;

        let summary = ReportSummary {
            user_count: snapshot.users.len(),
            match_count: rows.len(),
            generated_at: Utc::now(),
        };

        Ok(TransformResult {
            rows,
            csv_output,
            tsv_output,
            json_output,
            summary,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let archive_name = self.config.archive_name();
        let output_path = format!("{}/{}", self.config.output_path(), archive_name);

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            for format in self.config.output_formats() {
                let (file_name, content) = match format.as_str() {
                    "csv" => ("matches.csv", &result.csv_output),
                    "tsv" => ("matches.tsv", &result.tsv_output),
                    "json" => ("matches.json", &result.json_output),
                    other => {
                        tracing::warn!("Skipping unsupported export format: {}", other);
                        continue;
                    }
                };
                zip.start_file(file_name, SimpleFileOptions::default())?;
                zip.write_all(content.as_bytes())?;
            }

            zip.start_file("summary.json", SimpleFileOptions::default())?;
            zip.write_all(serde_json::to_string_pretty(&result.summary)?.as_bytes())?;

            zip.finish()?.into_inner()
        };

        tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
        self.storage.write_file(archive_name, &zip_data).await?;

        Ok(output_path)
    }
}
