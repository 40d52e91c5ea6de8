use crate::core::matcher;
use crate::domain::model::{
    Match, MatchReport, NewUser, OfferListing, ProfileUpdate, PublicProfile, RequestListing,
    UserProfile,
};
use crate::domain::ports::{PasswordHasher, ProfileStore};
use crate::domain::skill::{SkillLevel, SkillName};
use crate::utils::error::{Result, SkillSwapError};
use crate::utils::validation::{validate_email, validate_password, validate_text};

pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// Registration, skill management and match lookup on top of a profile store.
pub struct SkillSwapService<S: ProfileStore, H: PasswordHasher> {
    store: S,
    hasher: H,
    min_password_length: usize,
}

fn parse_skill(raw: &str) -> Result<SkillName> {
    let skill = SkillName::new(raw);
    if skill.is_blank() {
        return Err(SkillSwapError::ValidationError {
            message: "skill name cannot be empty".to_string(),
        });
    }
    Ok(skill)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl<S: ProfileStore, H: PasswordHasher> SkillSwapService<S, H> {
    pub fn new(store: S, hasher: H) -> Self {
        Self {
            store,
            hasher,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }

    pub fn with_min_password_length(mut self, min_password_length: usize) -> Self {
        self.min_password_length = min_password_length;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<PublicProfile> {
        validate_text("name", name)?;
        validate_email(email)?;
        validate_password(password, self.min_password_length)?;

        if self.store.find_by_email(email).await?.is_some() {
            return Err(SkillSwapError::DuplicateEmail {
                email: email.trim().to_string(),
            });
        }

        let password_hash = self.hasher.hash(password)?;
        let user = self
            .store
            .insert_user(NewUser {
                name: name.trim().to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, "Registered user {}", user.email);
        Ok(user.public())
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<PublicProfile> {
        let user = self.require_user(email).await?;
        if !self.hasher.verify(password, &user.password_hash)? {
            tracing::warn!(user_id = user.id, "Rejected login attempt");
            return Err(SkillSwapError::InvalidCredentials);
        }
        Ok(user.public())
    }

    pub async fn add_offer(&self, email: &str, skill: &str, level: SkillLevel) -> Result<PublicProfile> {
        let skill = parse_skill(skill)?;
        let user = self
            .store
            .modify_user(email, &mut |user: &mut UserProfile| {
                user.upsert_offer(skill.clone(), level);
                Ok(())
            })
            .await?;
        tracing::debug!(user_id = user.id, "Offer saved: {} ({})", skill, level);
        Ok(user.public())
    }

    pub async fn add_request(
        &self,
        email: &str,
        skill: &str,
        description: Option<String>,
    ) -> Result<PublicProfile> {
        let skill = parse_skill(skill)?;
        let description = non_blank(description);
        let user = self
            .store
            .modify_user(email, &mut |user: &mut UserProfile| {
                user.upsert_request(skill.clone(), description.clone());
                Ok(())
            })
            .await?;
        tracing::debug!(user_id = user.id, "Request saved: {}", skill);
        Ok(user.public())
    }

    pub async fn remove_offer(&self, email: &str, skill: &str) -> Result<bool> {
        let skill = SkillName::new(skill);
        let mut removed = false;
        self.store
            .modify_user(email, &mut |user: &mut UserProfile| {
                removed = user.remove_offer(&skill);
                Ok(())
            })
            .await?;
        Ok(removed)
    }

    pub async fn remove_request(&self, email: &str, skill: &str) -> Result<bool> {
        let skill = SkillName::new(skill);
        let mut removed = false;
        self.store
            .modify_user(email, &mut |user: &mut UserProfile| {
                removed = user.remove_request(&skill);
                Ok(())
            })
            .await?;
        Ok(removed)
    }

    pub async fn profile(&self, email: &str) -> Result<PublicProfile> {
        Ok(self.require_user(email).await?.public())
    }

    pub async fn update_profile(&self, email: &str, update: ProfileUpdate) -> Result<PublicProfile> {
        validate_text("name", &update.name)?;
        let user = self
            .store
            .modify_user(email, &mut |user: &mut UserProfile| {
                user.name = update.name.trim().to_string();
                user.about = non_blank(update.about.clone());
                user.linkedin_url = non_blank(update.linkedin_url.clone());
                user.github_url = non_blank(update.github_url.clone());
                user.twitter_url = non_blank(update.twitter_url.clone());
                Ok(())
            })
            .await?;
        Ok(user.public())
    }

    pub async fn users(&self) -> Result<Vec<PublicProfile>> {
        let snapshot = self.store.snapshot().await?;
        Ok(snapshot.users.iter().map(UserProfile::public).collect())
    }

    pub async fn offers(&self) -> Result<Vec<OfferListing>> {
        let snapshot = self.store.snapshot().await?;
        Ok(snapshot
            .users
            .iter()
            .flat_map(|user| {
                user.teach.iter().map(move |offer| OfferListing {
                    user_id: user.id,
                    user_email: user.email.clone(),
                    skill: offer.skill.clone(),
                    level: offer.level,
                })
            })
            .collect())
    }

    pub async fn requests(&self) -> Result<Vec<RequestListing>> {
        let snapshot = self.store.snapshot().await?;
        Ok(snapshot
            .users
            .iter()
            .flat_map(|user| {
                user.learn.iter().map(move |request| RequestListing {
                    user_id: user.id,
                    user_email: user.email.clone(),
                    skill: request.skill.clone(),
                    description: request.description.clone(),
                })
            })
            .collect())
    }

    pub async fn matches_for(&self, email: &str) -> Result<MatchReport> {
        let snapshot = self.store.snapshot().await?;
        let user = snapshot
            .find_by_email(email)
            .ok_or_else(|| SkillSwapError::UserNotFound {
                email: email.trim().to_string(),
            })?;

        let matches = matcher::matches_for(user.id, &snapshot.users);
        tracing::debug!(user_id = user.id, "Found {} matches", matches.len());

        Ok(MatchReport {
            user_email: user.email.clone(),
            user_name: user.name.clone(),
            matches_found: matches.len(),
            matches,
        })
    }

    pub async fn all_matches(&self) -> Result<Vec<Match>> {
        let snapshot = self.store.snapshot().await?;
        Ok(matcher::find_matches(&snapshot.users))
    }

    async fn require_user(&self, email: &str) -> Result<UserProfile> {
        self.store
            .find_by_email(email)
            .await?
            .ok_or_else(|| SkillSwapError::UserNotFound {
                email: email.trim().to_string(),
            })
    }
}
