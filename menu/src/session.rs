//! # Session
//!
//! Device-preference mirror for the onboarding and profile screens:
//! registered profile fields plus the logged-in flag. Persisted as one JSON
//! file with the same temp-file-rename commit as the menu snapshot, and
//! passed explicitly to whoever needs it instead of living in ambient
//! global state.

use std::{
    path::PathBuf,
    sync::RwLock,
};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{
    error::PersistenceError,
    store::{commit, read_snapshot},
};

const EMAIL_PATTERN: &str = r"^[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionData {
    #[serde(default)]
    logged_in: bool,
    #[serde(default)]
    profile: Profile,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("all profile fields are required")]
    MissingField,

    #[error("{0:?} is not a valid email address")]
    InvalidEmail(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub struct Session {
    path: PathBuf,
    data: RwLock<SessionData>,
}

impl Session {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let data: SessionData = read_snapshot(&path)?.unwrap_or_default();

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Validates and stores the profile, turning the logged-in flag on.
    pub fn register(&self, profile: Profile) -> Result<(), SessionError> {
        if profile.first_name.is_empty() || profile.last_name.is_empty() || profile.email.is_empty()
        {
            return Err(SessionError::MissingField);
        }
        if !is_valid_email(&profile.email) {
            return Err(SessionError::InvalidEmail(profile.email));
        }

        let next = SessionData {
            logged_in: true,
            profile,
        };
        commit(&self.path, &next)?;
        *self.data.write().expect("session lock poisoned") = next;

        info!("profile registered");
        Ok(())
    }

    /// Clears the logged-in flag, keeping the profile fields around the way
    /// the device preferences did.
    pub fn logout(&self) -> Result<(), PersistenceError> {
        let mut data = self.data.write().expect("session lock poisoned");

        let next = SessionData {
            logged_in: false,
            profile: data.profile.clone(),
        };
        commit(&self.path, &next)?;
        *data = next;

        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.data.read().expect("session lock poisoned").logged_in
    }

    /// The registered profile, present only while logged in.
    pub fn profile(&self) -> Option<Profile> {
        let data = self.data.read().expect("session lock poisoned");

        data.logged_in.then(|| data.profile.clone())
    }
}

pub fn is_valid_email(email: &str) -> bool {
    Regex::new(EMAIL_PATTERN).unwrap().is_match(email)
}
