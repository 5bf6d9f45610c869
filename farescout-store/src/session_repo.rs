use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::kv::{FileKvStore, StoreError};

pub const USERS_KEY: &str = "@users";
pub const TOKEN_KEY: &str = "userToken";
pub const CURRENT_USER_KEY: &str = "currentUser";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub email: String,
    /// Salted SHA-256, stored as `hex(salt)$hex(digest)`. Never the raw
    /// password.
    pub password_digest: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("a user with this email already exists")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("email must contain @")]
    InvalidEmail,
    #[error("password must be at least 6 characters")]
    WeakPassword,
    #[error("full name is required")]
    MissingName,
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Local account and session bookkeeping over the key-value store. One
/// session at a time: login and signup overwrite the token and cached user,
/// logout removes both.
pub struct SessionStore {
    kv: FileKvStore,
}

impl SessionStore {
    pub fn new(kv: FileKvStore) -> Self {
        Self { kv }
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<(UserAccount, String), AuthError> {
        if !email.contains('@') {
            return Err(AuthError::InvalidEmail);
        }
        if password.len() < 6 {
            return Err(AuthError::WeakPassword);
        }
        if full_name.trim().is_empty() {
            return Err(AuthError::MissingName);
        }

        let mut users = self.load_users().await?;
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::EmailTaken);
        }

        let user = UserAccount {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_digest: digest_password(password),
            full_name: full_name.trim().to_string(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        self.kv
            .set(
                USERS_KEY,
                &serde_json::to_string(&users).map_err(StoreError::from)?,
            )
            .await?;
        tracing::info!(email = user.email.as_str(), "user account created");

        let token = self.open_session(&user).await?;
        Ok((user, token))
    }

    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(UserAccount, String), AuthError> {
        let users = self.load_users().await?;
        let user = users
            .into_iter()
            .find(|u| u.email == email && verify_password(password, &u.password_digest))
            .ok_or(AuthError::InvalidCredentials)?;

        let token = self.open_session(&user).await?;
        tracing::info!(email = user.email.as_str(), "user logged in");
        Ok((user, token))
    }

    pub async fn logout(&self) -> Result<(), AuthError> {
        self.kv.remove(TOKEN_KEY).await?;
        self.kv.remove(CURRENT_USER_KEY).await?;
        Ok(())
    }

    /// Cached current-user record, or None. Read failures degrade to None.
    pub async fn current_user(&self) -> Option<UserAccount> {
        let json = self.kv.get(CURRENT_USER_KEY).await.ok().flatten()?;
        serde_json::from_str(&json).ok()
    }

    pub async fn token(&self) -> Option<String> {
        self.kv.get(TOKEN_KEY).await.ok().flatten()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.token().await.is_some()
    }

    async fn load_users(&self) -> Result<Vec<UserAccount>, AuthError> {
        match self.kv.get(USERS_KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json).map_err(StoreError::from)?),
            None => Ok(Vec::new()),
        }
    }

    // The session is two keys: the opaque bearer token and the cached user
    // record. Both writes are awaited, so callers can read them back
    // immediately after this returns.
    async fn open_session(&self, user: &UserAccount) -> Result<String, AuthError> {
        let token = format!(
            "token_{}_{}",
            user.id.simple(),
            Utc::now().timestamp_millis()
        );
        self.kv.set(TOKEN_KEY, &token).await?;
        self.kv
            .set(
                CURRENT_USER_KEY,
                &serde_json::to_string(user).map_err(StoreError::from)?,
            )
            .await?;
        Ok(token)
    }
}

fn digest_password(password: &str) -> String {
    let salt: [u8; 16] = rand::thread_rng().gen();
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    format!("{}${}", hex::encode(salt), hex::encode(hasher.finalize()))
}

fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let mut hasher = Sha256::new();
    hasher.update(&salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize()) == digest_hex
}
