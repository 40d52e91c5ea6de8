use anyhow::Result;
use httpmock::prelude::*;
use skillswap::config::ExportConfig;
use skillswap::domain::model::{ProfileDocument, ReportSummary};
use skillswap::domain::ports::ProfileSource;
use skillswap::{
    HttpProfileSource, InMemoryProfileStore, LocalStorage, MatchReportPipeline, ReportEngine,
    SkillSwapError,
};
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

fn profiles_json() -> serde_json::Value {
    serde_json::json!([
        {
            "id": 1,
            "name": "Ada",
            "email": "ada@example.com",
            "teach": [{"skill": "Python", "level": "expert"}],
            "learn": [{"skill": "Guitar"}]
        },
        {
            "id": 2,
            "name": "Bo",
            "email": "bo@example.com",
            "teach": [{"skill": "guitar"}],
            "learn": [{"skill": "python", "description": "scripting"}]
        },
        {
            "id": 3,
            "name": "Cy",
            "email": "cy@example.com",
            "teach": null,
            "learn": [{"skill": "PYTHON"}]
        }
    ])
}

fn export_config(output_path: &str, formats: &[&str]) -> ExportConfig {
    ExportConfig {
        output_path: output_path.to_string(),
        formats: formats.iter().map(|f| f.to_string()).collect(),
        archive_name: "skillswap_matches.zip".to_string(),
    }
}

fn read_entry(archive_path: &Path, name: &str) -> Result<String> {
    let data = std::fs::read(archive_path)?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data))?;
    let mut file = archive.by_name(name)?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(content)
}

fn entry_names(archive_path: &Path) -> Result<Vec<String>> {
    let data = std::fs::read(archive_path)?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data))?;
    let mut names = Vec::new();
    for i in 0..archive.len() {
        names.push(archive.by_index(i)?.name().to_string());
    }
    Ok(names)
}

#[tokio::test]
async fn test_export_from_http_source() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/profiles");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(profiles_json());
        })
        .await;

    let source = HttpProfileSource::new(server.url("/profiles"))?;
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = MatchReportPipeline::new(source, storage, export_config(&output_path, &["csv", "tsv", "json"]));
    let engine = ReportEngine::new(pipeline);

    let result = engine.run().await?;
    api_mock.assert_async().await;
    assert!(result.ends_with("skillswap_matches.zip"));

    let archive_path = temp_dir.path().join("skillswap_matches.zip");
    assert!(archive_path.exists());

    let names = entry_names(&archive_path)?;
    for expected in ["matches.csv", "matches.tsv", "matches.json", "summary.json"] {
        assert!(names.contains(&expected.to_string()), "missing {}", expected);
    }

    let csv_content = read_entry(&archive_path, "matches.csv")?;
    let lines: Vec<&str> = csv_content.lines().collect();
    assert_eq!(
        lines[0],
        "teacher_id,teacher_email,learner_id,learner_email,skill,level"
    );
    assert_eq!(lines.len(), 4);
    assert!(csv_content.contains("1,ada@example.com,2,bo@example.com,Python,expert"));
    assert!(csv_content.contains("1,ada@example.com,3,cy@example.com,Python,expert"));
    assert!(csv_content.contains("2,bo@example.com,1,ada@example.com,guitar,intermediate"));

    let tsv_content = read_entry(&archive_path, "matches.tsv")?;
    assert!(tsv_content.starts_with("teacher_id\tteacher_email"));

    let summary: ReportSummary = serde_json::from_str(&read_entry(&archive_path, "summary.json")?)?;
    assert_eq!(summary.user_count, 3);
    assert_eq!(summary.match_count, 3);
    Ok(())
}

#[tokio::test]
async fn test_export_respects_format_selection() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let document = ProfileDocument::from_json_slice(profiles_json().to_string().as_bytes())?;
    let store = InMemoryProfileStore::from_document(document);
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = MatchReportPipeline::new(store, storage, export_config(&output_path, &["json"]));

    ReportEngine::new(pipeline).run().await?;

    let archive_path = temp_dir.path().join("skillswap_matches.zip");
    let mut names = entry_names(&archive_path)?;
    names.sort();
    assert_eq!(names, vec!["matches.json", "summary.json"]);

    let rows: Vec<serde_json::Value> =
        serde_json::from_str(&read_entry(&archive_path, "matches.json")?)?;
    assert_eq!(rows.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_export_with_no_matches_still_writes_headers() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let pipeline = MatchReportPipeline::new(
        InMemoryProfileStore::new(),
        LocalStorage::new(output_path.clone()),
        export_config(&output_path, &["csv"]),
    );
    ReportEngine::new(pipeline).run().await?;

    let csv_content = read_entry(&temp_dir.path().join("skillswap_matches.zip"), "matches.csv")?;
    assert_eq!(
        csv_content.trim_end(),
        "teacher_id,teacher_email,learner_id,learner_email,skill,level"
    );
    Ok(())
}

#[tokio::test]
async fn test_http_source_failure_status() -> Result<()> {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/failed");
            then.status(500);
        })
        .await;

    let source = HttpProfileSource::new(server.url("/failed"))?;
    let err = source.snapshot().await.unwrap_err();
    api_mock.assert_async().await;

    assert!(matches!(err, SkillSwapError::SourceError { .. }));
    Ok(())
}

#[tokio::test]
async fn test_http_source_accepts_full_document() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/document");
            then.status(200).json_body(serde_json::json!({
                "next_id": 7,
                "users": profiles_json()
            }));
        })
        .await;

    let source = HttpProfileSource::new(server.url("/document"))?;
    let snapshot = source.snapshot().await?;
    assert_eq!(snapshot.users.len(), 3);
    assert!(snapshot.get(3).unwrap().teach.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_http_source_with_max_user_id_still_exports() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/profiles");
            then.status(200).json_body(serde_json::json!([
                {"id": u64::MAX, "name": "Max", "email": "max@example.com",
                 "teach": [{"skill": "Go"}]},
                {"id": 1, "name": "Ada", "email": "ada@example.com",
                 "learn": [{"skill": "go"}]}
            ]));
        })
        .await;

    let source = HttpProfileSource::new(server.url("/profiles"))?;
    let pipeline = MatchReportPipeline::new(
        source,
        LocalStorage::new(output_path.clone()),
        export_config(&output_path, &["csv"]),
    );
    ReportEngine::new(pipeline).run().await?;

    let csv_content = read_entry(&temp_dir.path().join("skillswap_matches.zip"), "matches.csv")?;
    assert!(csv_content.contains(&format!("{},max@example.com,1,ada@example.com,Go", u64::MAX)));
    Ok(())
}
