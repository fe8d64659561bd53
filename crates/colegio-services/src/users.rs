//! Admin user lifecycle
//!
//! Passwords are bcrypt-hashed here; the repository only ever sees hashes.

use colegio_core::models::{User, UserDraft};
use colegio_core::AppError;
use colegio_db::UserRepository;
use validator::Validate;

const BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
}

impl UserService {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    fn hash_password(password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, BCRYPT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
    }

    pub async fn create(&self, draft: UserDraft) -> Result<User, AppError> {
        draft.validate()?;

        if self.users.find_by_email(&draft.email).await?.is_some() {
            return Err(AppError::InvalidInput(format!(
                "Email {} is already registered",
                draft.email
            )));
        }

        let hash = Self::hash_password(&draft.password)?;
        self.users
            .create(&draft.name, &draft.email, &hash, draft.role)
            .await
    }

    /// Update profile fields; the password only changes when a new one is
    /// supplied.
    pub async fn update(
        &self,
        id: i64,
        draft: UserDraft,
        new_password: bool,
    ) -> Result<User, AppError> {
        draft.validate()?;

        if let Some(existing) = self.users.find_by_email(&draft.email).await? {
            if existing.id != id {
                return Err(AppError::InvalidInput(format!(
                    "Email {} is already registered",
                    draft.email
                )));
            }
        }

        let hash = if new_password {
            Some(Self::hash_password(&draft.password)?)
        } else {
            None
        };

        self.users
            .update(id, &draft.name, &draft.email, hash.as_deref(), draft.role)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    pub async fn get(&self, id: i64) -> Result<User, AppError> {
        self.users
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }

    pub async fn toggle_active(&self, id: i64) -> Result<User, AppError> {
        self.users
            .toggle_active(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    pub async fn verify_password(&self, email: &str, password: &str) -> Result<Option<User>, AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Ok(None);
        };
        if !user.is_active {
            return Ok(None);
        }
        let matches = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
        Ok(matches.then_some(user))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.users.delete_row(id).await? {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }
}
