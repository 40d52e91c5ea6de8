use anyhow::Result;
use skillswap::domain::model::ProfileUpdate;
use skillswap::domain::ports::ProfileSource;
use skillswap::{
    Argon2Hasher, JsonFileStore, LocalStorage, SkillLevel, SkillSwapError, SkillSwapService,
    UserMatch,
};
use tempfile::TempDir;

fn service_at(dir: &TempDir) -> SkillSwapService<JsonFileStore<LocalStorage>, Argon2Hasher> {
    let storage = LocalStorage::new(dir.path());
    SkillSwapService::new(JsonFileStore::new(storage), Argon2Hasher::new())
}

#[tokio::test]
async fn test_registration_survives_restart() -> Result<()> {
    let temp_dir = TempDir::new()?;

    {
        let service = service_at(&temp_dir);
        service.register("Ada", "ada@example.com", "analytical").await?;
        service
            .add_offer("ada@example.com", "Python", SkillLevel::Expert)
            .await?;
    }

    assert!(temp_dir.path().join("profiles.json").exists());

    let service = service_at(&temp_dir);
    let profile = service.authenticate("ADA@example.com", "analytical").await?;
    assert_eq!(profile.id, 1);
    assert_eq!(profile.teach.len(), 1);
    assert_eq!(profile.teach[0].level, SkillLevel::Expert);

    // ids keep increasing after a reload
    let bo = service.register("Bo", "bo@example.com", "bo-password").await?;
    assert_eq!(bo.id, 2);
    Ok(())
}

#[tokio::test]
async fn test_password_hash_is_stored_not_plaintext() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let service = service_at(&temp_dir);
    service.register("Ada", "ada@example.com", "analytical").await?;

    let raw = std::fs::read_to_string(temp_dir.path().join("profiles.json"))?;
    assert!(!raw.contains("analytical"));
    assert!(raw.contains("$argon2id$"));

    let err = service
        .authenticate("ada@example.com", "not-the-password")
        .await
        .unwrap_err();
    assert!(matches!(err, SkillSwapError::InvalidCredentials));
    Ok(())
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let service = service_at(&temp_dir);
    service.register("Ada", "ada@example.com", "analytical").await?;

    let err = service
        .register("Imposter", "Ada@Example.com", "whatever123")
        .await
        .unwrap_err();
    assert!(matches!(err, SkillSwapError::DuplicateEmail { .. }));
    assert_eq!(service.users().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_matches_across_users() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let service = service_at(&temp_dir);

    service.register("Ada", "ada@example.com", "analytical").await?;
    service.register("Bo", "bo@example.com", "bo-password").await?;
    service.register("Cy", "cy@example.com", "cy-password").await?;

    service
        .add_offer("ada@example.com", "Python", SkillLevel::Expert)
        .await?;
    service
        .add_request("ada@example.com", "Guitar", None)
        .await?;
    service
        .add_offer("bo@example.com", "guitar", SkillLevel::Beginner)
        .await?;
    service
        .add_request("bo@example.com", "python", Some("scripting".to_string()))
        .await?;
    service
        .add_request("cy@example.com", "Knitting", None)
        .await?;

    let report = service.matches_for("ada@example.com").await?;
    assert_eq!(report.user_email, "ada@example.com");
    assert_eq!(report.matches_found, 2);
    assert!(matches!(report.matches[0], UserMatch::YouCanTeach { .. }));
    assert!(matches!(report.matches[1], UserMatch::YouCanLearn { .. }));
    assert_eq!(report.matches[1].matched_user().email, "bo@example.com");

    let cy = service.matches_for("cy@example.com").await?;
    assert_eq!(cy.matches_found, 0);

    let all = service.all_matches().await?;
    assert_eq!(all.len(), 2);

    assert_eq!(service.offers().await?.len(), 2);
    assert_eq!(service.requests().await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_unknown_user_operations_fail() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let service = service_at(&temp_dir);

    assert!(matches!(
        service.matches_for("ghost@example.com").await,
        Err(SkillSwapError::UserNotFound { .. })
    ));
    assert!(matches!(
        service
            .add_offer("ghost@example.com", "Python", SkillLevel::Beginner)
            .await,
        Err(SkillSwapError::UserNotFound { .. })
    ));
    assert!(matches!(
        service
            .update_profile(
                "ghost@example.com",
                ProfileUpdate {
                    name: "Ghost".to_string(),
                    ..ProfileUpdate::default()
                }
            )
            .await,
        Err(SkillSwapError::UserNotFound { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_interleaved_offers_are_not_lost() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let service = service_at(&temp_dir);
    service.register("Ada", "ada@example.com", "analytical").await?;

    let email = "ada@example.com";
    let (a, b, c, d) = tokio::join!(
        service.add_offer(email, "Python", SkillLevel::Expert),
        service.add_offer(email, "Rust", SkillLevel::Intermediate),
        service.add_request(email, "Welsh", None),
        service.add_request(email, "Piano", Some("jazz chords".to_string())),
    );
    a?;
    b?;
    c?;
    d?;

    let snapshot = service.store().snapshot().await?;
    assert_eq!(snapshot.users[0].teach.len(), 2);
    assert_eq!(snapshot.users[0].learn.len(), 2);
    Ok(())
}
