use crate::domain::skill::{SkillLevel, SkillName};
use crate::utils::error::{Result, SkillSwapError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub type UserId = u64;

/// Emails are unique per store and compared after trimming and lowercasing.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillOffer {
    pub skill: SkillName,
    #[serde(default)]
    pub level: SkillLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequest {
    pub skill: SkillName,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password_hash: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub teach: Vec<SkillOffer>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub learn: Vec<SkillRequest>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub twitter_url: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn offer(&self, skill: &SkillName) -> Option<&SkillOffer> {
        self.teach.iter().find(|o| &o.skill == skill)
    }

    pub fn request(&self, skill: &SkillName) -> Option<&SkillRequest> {
        self.learn.iter().find(|r| &r.skill == skill)
    }

    /// Adds an offer, or replaces the level of an existing offer for the same skill.
    pub fn upsert_offer(&mut self, skill: SkillName, level: SkillLevel) {
        match self.teach.iter_mut().find(|o| o.skill == skill) {
            Some(existing) => existing.level = level,
            None => self.teach.push(SkillOffer { skill, level }),
        }
    }

    /// Adds a request, or replaces the description of an existing request.
    pub fn upsert_request(&mut self, skill: SkillName, description: Option<String>) {
        match self.learn.iter_mut().find(|r| r.skill == skill) {
            Some(existing) => existing.description = description,
            None => self.learn.push(SkillRequest { skill, description }),
        }
    }

    pub fn remove_offer(&mut self, skill: &SkillName) -> bool {
        let before = self.teach.len();
        self.teach.retain(|o| &o.skill != skill);
        self.teach.len() != before
    }

    pub fn remove_request(&mut self, skill: &SkillName) -> bool {
        let before = self.learn.len();
        self.learn.retain(|r| &r.skill != skill);
        self.learn.len() != before
    }

    pub fn public(&self) -> PublicProfile {
        PublicProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            teach: self.teach.clone(),
            learn: self.learn.clone(),
            about: self.about.clone(),
            linkedin_url: self.linkedin_url.clone(),
            github_url: self.github_url.clone(),
            twitter_url: self.twitter_url.clone(),
            created_at: self.created_at,
        }
    }
}

/// A profile without credentials, safe to print or return to other users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub teach: Vec<SkillOffer>,
    pub learn: Vec<SkillRequest>,
    pub about: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub twitter_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: String,
    pub about: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub twitter_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDocument {
    #[serde(default)]
    pub next_id: UserId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub users: Vec<UserProfile>,
}

impl Default for ProfileDocument {
    fn default() -> Self {
        Self {
            next_id: 1,
            users: Vec::new(),
        }
    }
}

impl ProfileDocument {
    /// Parses either a full document or a bare array of users.
    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        let first = data.iter().find(|b| !b.is_ascii_whitespace());
        let mut document = if first == Some(&b'[') {
            let users: Vec<UserProfile> = serde_json::from_slice(data)?;
            ProfileDocument { next_id: 0, users }
        } else {
            serde_json::from_slice::<ProfileDocument>(data)?
        };
        document.repair_next_id();
        Ok(document)
    }

    // Saturates at u64::MAX; push_user refuses to hand out an id already in use.
    fn repair_next_id(&mut self) {
        let floor = self
            .users
            .iter()
            .map(|u| u.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        self.next_id = self.next_id.max(floor);
    }

    pub fn find_by_email(&self, email: &str) -> Option<&UserProfile> {
        let email = normalize_email(email);
        self.users.iter().find(|u| normalize_email(&u.email) == email)
    }

    pub fn find_by_email_mut(&mut self, email: &str) -> Option<&mut UserProfile> {
        let email = normalize_email(email);
        self.users
            .iter_mut()
            .find(|u| normalize_email(&u.email) == email)
    }

    /// Assigns the next id. The caller has already checked email uniqueness.
    pub fn push_user(&mut self, new_user: NewUser) -> Result<UserProfile> {
        let id = self.next_id;
        if self.users.iter().any(|u| u.id == id) {
            return Err(SkillSwapError::ValidationError {
                message: format!("user id {} is already assigned, no ids left", id),
            });
        }
        let user = UserProfile {
            id,
            name: new_user.name,
            email: normalize_email(&new_user.email),
            password_hash: new_user.password_hash,
            teach: Vec::new(),
            learn: Vec::new(),
            about: None,
            linkedin_url: None,
            github_url: None,
            twitter_url: None,
            created_at: Utc::now(),
        };
        self.next_id = id.saturating_add(1);
        self.users.push(user.clone());
        Ok(user)
    }

    pub fn insert_unique(&mut self, new_user: NewUser) -> Result<UserProfile> {
        if self.find_by_email(&new_user.email).is_some() {
            return Err(SkillSwapError::DuplicateEmail {
                email: normalize_email(&new_user.email),
            });
        }
        self.push_user(new_user)
    }

    /// Runs `edit` on a copy and only commits it when the edit succeeds.
    pub fn apply_edit<F>(&mut self, email: &str, edit: F) -> Result<UserProfile>
    where
        F: FnOnce(&mut UserProfile) -> Result<()>,
    {
        let user = self
            .find_by_email_mut(email)
            .ok_or_else(|| SkillSwapError::UserNotFound {
                email: email.trim().to_string(),
            })?;
        let mut updated = user.clone();
        edit(&mut updated)?;
        updated.id = user.id;
        *user = updated.clone();
        Ok(updated)
    }

    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot::new(self.users.clone())
    }
}

/// Read-only view of the profile store at one point in time.
#[derive(Debug, Clone)]
pub struct ProfileSnapshot {
    pub users: Vec<UserProfile>,
    pub taken_at: DateTime<Utc>,
}

impl ProfileSnapshot {
    pub fn new(mut users: Vec<UserProfile>) -> Self {
        users.sort_by_key(|u| u.id);
        Self {
            users,
            taken_at: Utc::now(),
        }
    }

    pub fn get(&self, id: UserId) -> Option<&UserProfile> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&UserProfile> {
        let email = normalize_email(email);
        self.users.iter().find(|u| normalize_email(&u.email) == email)
    }
}

/// `teacher` offers `skill` and `learner` requests it. Ordered by teacher,
/// learner, then skill key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Match {
    pub teacher: UserId,
    pub learner: UserId,
    pub skill: SkillName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedUser {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

impl From<&UserProfile> for MatchedUser {
    fn from(user: &UserProfile) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// A match seen from one user's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match_type", rename_all = "snake_case")]
pub enum UserMatch {
    YouCanTeach {
        your_skill: SkillName,
        your_skill_level: SkillLevel,
        matched_user: MatchedUser,
        their_request: Option<String>,
    },
    YouCanLearn {
        skill_you_need: SkillName,
        their_skill_level: SkillLevel,
        matched_user: MatchedUser,
        their_offer: String,
    },
}

impl UserMatch {
    pub fn matched_user(&self) -> &MatchedUser {
        match self {
            UserMatch::YouCanTeach { matched_user, .. } | UserMatch::YouCanLearn { matched_user, .. } => {
                matched_user
            }
        }
    }

    pub fn skill(&self) -> &SkillName {
        match self {
            UserMatch::YouCanTeach { your_skill, .. } => your_skill,
            UserMatch::YouCanLearn { skill_you_need, .. } => skill_you_need,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub user_email: String,
    pub user_name: String,
    pub matches_found: usize,
    pub matches: Vec<UserMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferListing {
    pub user_id: UserId,
    pub user_email: String,
    pub skill: SkillName,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestListing {
    pub user_id: UserId,
    pub user_email: String,
    pub skill: SkillName,
    pub description: Option<String>,
}

/// One exported match line, flattened for CSV/TSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRow {
    pub teacher_id: UserId,
    pub teacher_email: String,
    pub learner_id: UserId,
    pub learner_email: String,
    pub skill: String,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub user_count: usize,
    pub match_count: usize,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub rows: Vec<MatchRow>,
    pub csv_output: String,
    pub tsv_output: String,
    pub json_output: String,
    pub summary: ReportSummary,
}
