use crate::errors::Result;
use crate::users::users_model::{Credentials, NewUser, User, UserCredentials};
use async_trait::async_trait;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str) -> Result<Option<User>>;
    fn find_credentials_by_name(&self, name: &str) -> Result<Option<UserCredentials>>;
    fn list(&self) -> Result<Vec<User>>;
    async fn create(&self, new_user: NewUser) -> Result<User>;
}

/// One-way password hashing, implemented by the server with Argon2.
pub trait PasswordHasherTrait: Send + Sync {
    fn hash_password(&self, password: &str) -> Result<String>;
    fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, credentials: Credentials) -> Result<User>;
    async fn login(&self, credentials: Credentials) -> Result<User>;
    fn get_user(&self, user_id: &str) -> Result<User>;
    fn list_users(&self) -> Result<Vec<User>>;
}
