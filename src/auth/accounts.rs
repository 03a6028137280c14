// src/auth/accounts.rs
//! Local accounts: signup, login, logout and session validation.
//!
//! Records are JSON documents in a `KeyValueStore`:
//! `account:<email>` holds an `Account`, `session:<token>` holds a `Session`.

use super::{CallerIdentity, CredentialValidator, KeyValueStore};
use crate::constants::MIN_PASSWORD_LENGTH;
use crate::error::AppError;
use crate::types::{UserEmail, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

const ACCOUNT_PREFIX: &str = "account:";
const SESSION_PREFIX: &str = "session:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub email: UserEmail,
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn identity(&self) -> CallerIdentity {
        CallerIdentity {
            id: self.id.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub email: UserEmail,
    pub created_at: DateTime<Utc>,
}

/// Account operations over an injected store.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn KeyValueStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Registers a new account. Emails are unique after normalization.
    pub fn signup(&self, email: &str, password: &str) -> Result<Account, AppError> {
        let email = UserEmail::parse(email)?;
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            }
            .into());
        }

        let key = account_key(&email);
        if self.store.get(&key).is_some() {
            return Err(AppError::AccountExists(email.to_string()));
        }

        let id = Uuid::new_v4().to_string();
        let account = Account {
            password_digest: password_digest(&id, password),
            id,
            email,
            created_at: Utc::now(),
        };
        self.store.set(&key, serde_json::to_string(&account)?);
        log::info!("Created account {} for {}", account.id, account.email);
        Ok(account)
    }

    /// Checks credentials and opens a new session.
    pub fn login(&self, email: &str, password: &str) -> Result<(Account, Session), AppError> {
        let email = UserEmail::parse(email)?;
        let account = self
            .find_account(&email)?
            .ok_or_else(|| AppError::AccountNotFound(email.to_string()))?;

        if account.password_digest != password_digest(&account.id, password) {
            log::warn!("Rejected login for {}", email);
            return Err(AppError::IncorrectPassword);
        }

        let session = Session {
            token: Uuid::new_v4().simple().to_string(),
            user_id: account.id.clone(),
            email: account.email.clone(),
            created_at: Utc::now(),
        };
        self.store
            .set(&session_key(&session.token), serde_json::to_string(&session)?);
        log::info!("Opened session for {}", account.email);
        Ok((account, session))
    }

    /// Ends the session. Unknown tokens are rejected as unauthorized.
    pub fn logout(&self, token: &str) -> Result<(), AppError> {
        match self.store.remove(&session_key(token)) {
            Some(_) => Ok(()),
            None => Err(AppError::unauthorized("logout with unknown session token")),
        }
    }

    pub fn find_account(&self, email: &UserEmail) -> Result<Option<Account>, AppError> {
        self.store
            .get(&account_key(email))
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(AppError::from)
    }

    /// All registered accounts, ordered by email.
    pub fn accounts(&self) -> Result<Vec<Account>, AppError> {
        self.store
            .list(ACCOUNT_PREFIX)
            .into_iter()
            .map(|(_, raw)| serde_json::from_str(&raw).map_err(AppError::from))
            .collect()
    }

    fn find_session(&self, token: &str) -> Option<Session> {
        let raw = self.store.get(&session_key(token))?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                log::error!("Discarding unreadable session record: {}", e);
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl CredentialValidator for AccountService {
    async fn validate(&self, token: &str) -> Result<CallerIdentity, AppError> {
        let session = self
            .find_session(token)
            .ok_or_else(|| AppError::unauthorized("unknown session token"))?;
        Ok(CallerIdentity {
            id: session.user_id,
            email: session.email,
        })
    }
}

fn account_key(email: &UserEmail) -> String {
    format!("{}{}", ACCOUNT_PREFIX, email)
}

fn session_key(token: &str) -> String {
    format!("{}{}", SESSION_PREFIX, token)
}

/// Salted with the account id so equal passwords never share a digest.
fn password_digest(account_id: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(account_id.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
