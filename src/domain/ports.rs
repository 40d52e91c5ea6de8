use crate::domain::model::{NewUser, ProfileSnapshot, TransformResult, UserProfile};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn archive_name(&self) -> &str;
}

/// Anything that can hand out a consistent read snapshot of all profiles.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn snapshot(&self) -> Result<ProfileSnapshot>;
}

pub type UserEdit<'a> = &'a mut (dyn FnMut(&mut UserProfile) -> Result<()> + Send);

#[async_trait]
pub trait ProfileStore: ProfileSource {
    /// Fails with `DuplicateEmail` when the normalized email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<UserProfile>;

    /// Applies `edit` to the user with `email` and persists the result
    /// atomically. Fails with `UserNotFound` when no such user exists.
    async fn modify_user(&self, email: &str, edit: UserEdit<'_>) -> Result<UserProfile>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>> {
        Ok(self.snapshot().await?.find_by_email(email).cloned())
    }
}

pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;

    /// `Ok(false)` on mismatch; `Err` only when `hash` cannot be parsed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ProfileSnapshot>;
    async fn transform(&self, snapshot: ProfileSnapshot) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
