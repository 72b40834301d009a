use async_trait::async_trait;
use log::{debug, info};
use rand::Rng;
use std::sync::Arc;

use super::users_model::{avatar_for, Credentials, NewUser, User};
use super::users_traits::{PasswordHasherTrait, UserRepositoryTrait, UserServiceTrait};
use crate::constants::{
    AVATAR_COLORS, PASSWORD_MIN_CHARS, USER_ID_PREFIX, USER_ID_RANDOM_LEN, USER_NAME_MAX_CHARS,
    USER_NAME_MIN_CHARS,
};
use crate::errors::{DatabaseError, Error, Result, ValidationError};

const USER_ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Service for registering and authenticating users
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    hasher: Arc<dyn PasswordHasherTrait>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepositoryTrait>,
        hasher: Arc<dyn PasswordHasherTrait>,
    ) -> Self {
        Self { repository, hasher }
    }

    fn validate_registration(name: &str, password: &str) -> Result<()> {
        if name.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingField("name and password".to_string()).into());
        }
        let name_chars = name.chars().count();
        if !(USER_NAME_MIN_CHARS..=USER_NAME_MAX_CHARS).contains(&name_chars) {
            return Err(Error::invalid_input(format!(
                "Name must be between {} and {} characters",
                USER_NAME_MIN_CHARS, USER_NAME_MAX_CHARS
            )));
        }
        if password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(Error::invalid_input(format!(
                "Password must be at least {} characters",
                PASSWORD_MIN_CHARS
            )));
        }
        Ok(())
    }
}

/// `u_` followed by random lowercase alphanumerics.
pub(crate) fn generate_user_id<R: Rng>(rng: &mut R) -> String {
    let suffix: String = (0..USER_ID_RANDOM_LEN)
        .map(|_| USER_ID_CHARSET[rng.gen_range(0..USER_ID_CHARSET.len())] as char)
        .collect();
    format!("{}{}", USER_ID_PREFIX, suffix)
}

pub(crate) fn pick_color<R: Rng>(rng: &mut R) -> String {
    AVATAR_COLORS[rng.gen_range(0..AVATAR_COLORS.len())].to_string()
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, credentials: Credentials) -> Result<User> {
        let name = credentials.name.trim().to_string();
        Self::validate_registration(&name, &credentials.password)?;

        if self.repository.find_credentials_by_name(&name)?.is_some() {
            return Err(Error::Conflict("Name is already taken".to_string()));
        }

        let password_hash = self.hasher.hash_password(&credentials.password)?;
        let (id, color) = {
            let mut rng = rand::thread_rng();
            (generate_user_id(&mut rng), pick_color(&mut rng))
        };

        let new_user = NewUser {
            id,
            avatar: avatar_for(&name),
            name,
            color,
            password_hash,
        };

        match self.repository.create(new_user).await {
            Ok(user) => {
                info!("Registered user {} ({})", user.name, user.id);
                Ok(user)
            }
            // Lost a race with a concurrent registration of the same name.
            Err(Error::Database(DatabaseError::UniqueViolation(_))) => {
                Err(Error::Conflict("Name is already taken".to_string()))
            }
            Err(e) => Err(e),
        }
    }

    async fn login(&self, credentials: Credentials) -> Result<User> {
        let name = credentials.name.trim();
        if name.is_empty() || credentials.password.is_empty() {
            return Err(ValidationError::MissingField("name and password".to_string()).into());
        }

        let stored = self
            .repository
            .find_credentials_by_name(name)?
            .ok_or_else(|| Error::Unauthorized("User not found".to_string()))?;

        if !self
            .hasher
            .verify_password(&credentials.password, &stored.password_hash)?
        {
            debug!("Rejected login for {}", name);
            return Err(Error::Unauthorized("Wrong password".to_string()));
        }

        Ok(stored.user)
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository
            .get_by_id(user_id)?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))
    }

    fn list_users(&self) -> Result<Vec<User>> {
        self.repository.list()
    }
}
