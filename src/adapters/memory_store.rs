use crate::domain::model::{NewUser, ProfileDocument, ProfileSnapshot, UserProfile};
use crate::domain::ports::{ProfileSource, ProfileStore, UserEdit};
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Process-local profile store.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    document: RwLock<ProfileDocument>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(document: ProfileDocument) -> Self {
        Self {
            document: RwLock::new(document),
        }
    }

    pub async fn document(&self) -> ProfileDocument {
        self.document.read().await.clone()
    }
}

#[async_trait]
impl ProfileSource for InMemoryProfileStore {
    async fn snapshot(&self) -> Result<ProfileSnapshot> {
        Ok(self.document.read().await.snapshot())
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn insert_user(&self, user: NewUser) -> Result<UserProfile> {
        self.document.write().await.insert_unique(user)
    }

    async fn modify_user(&self, email: &str, edit: UserEdit<'_>) -> Result<UserProfile> {
        self.document
            .write()
            .await
            .apply_edit(email, |user| edit(user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>> {
        Ok(self.document.read().await.find_by_email(email).cloned())
    }
}
