use crate::domain::model::{NewUser, ProfileDocument, ProfileSnapshot, UserProfile};
use crate::domain::ports::{ProfileSource, ProfileStore, Storage, UserEdit};
use crate::utils::error::{Result, SkillSwapError};
use async_trait::async_trait;
use tokio::sync::Mutex;

pub const DEFAULT_PROFILE_FILE: &str = "profiles.json";

/// Profile store persisted as one JSON document through a [`Storage`] backend.
///
/// Every operation re-reads the document, so separate store instances over the
/// same directory see each other's writes. Mutations within one instance are
/// serialized by an internal lock; there is no cross-process locking.
pub struct JsonFileStore<S: Storage> {
    storage: S,
    file_name: String,
    lock: Mutex<()>,
}

impl<S: Storage> JsonFileStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_file_name(storage, DEFAULT_PROFILE_FILE)
    }

    pub fn with_file_name(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<ProfileDocument> {
        match self.storage.read_file(&self.file_name).await {
            Ok(data) => {
                let document = ProfileDocument::from_json_slice(&data)?;
                tracing::debug!(
                    "Loaded {} profiles from {}",
                    document.users.len(),
                    self.file_name
                );
                Ok(document)
            }
            Err(SkillSwapError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("{} does not exist yet, starting empty", self.file_name);
                Ok(ProfileDocument::default())
            }
            Err(e) => Err(e),
        }
    }

    async fn save(&self, document: &ProfileDocument) -> Result<()> {
        let data = serde_json::to_vec_pretty(document)?;
        self.storage.write_file(&self.file_name, &data).await
    }
}

#[async_trait]
impl<S: Storage> ProfileSource for JsonFileStore<S> {
    async fn snapshot(&self) -> Result<ProfileSnapshot> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.snapshot())
    }
}

#[async_trait]
impl<S: Storage> ProfileStore for JsonFileStore<S> {
    async fn insert_user(&self, user: NewUser) -> Result<UserProfile> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        let user = document.insert_unique(user)?;
        self.save(&document).await?;
        Ok(user)
    }

    async fn modify_user(&self, email: &str, edit: UserEdit<'_>) -> Result<UserProfile> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        let user = document.apply_edit(email, |user| edit(user))?;
        self.save(&document).await?;
        Ok(user)
    }
}
