//! Durable credential store backed by a plain-text file
//!
//! One record per line: `username<SP>password`. The file is rewritten in
//! full after every accepted sign-up; malformed lines are skipped on load
//! and reported back to the caller.

use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::auth::policy::{self, PolicyRule};

/// A stored username/password pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

/// Outcome of a sign-up attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddUserOutcome {
    /// The user was added and the file rewritten
    Added,
    /// The username is already taken; the stored password is unchanged
    DuplicateUser,
    /// The username is empty or contains whitespace
    InvalidUsername,
    /// The password violates the listed policy rules
    PolicyFailed(Vec<PolicyRule>),
}

/// Credential store errors
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("failed to save credentials to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What happened while loading the credentials file
#[derive(Debug, Default)]
pub struct CredentialLoadReport {
    /// Records loaded successfully
    pub loaded: usize,
    /// 1-based numbers of lines skipped as malformed
    pub skipped_lines: Vec<usize>,
    /// Set when the file existed but could not be read; the store starts empty
    pub io_error: Option<String>,
}

/// Durable map from username to password
pub struct CredentialStore {
    path: PathBuf,
    users: HashMap<String, Credential>,
}

impl CredentialStore {
    /// Load the store from disk. A missing file yields an empty store;
    /// a read failure is reported in the returned report and the store
    /// starts empty.
    pub fn load(path: impl Into<PathBuf>) -> (Self, CredentialLoadReport) {
        let path = path.into();
        let mut store = Self {
            path,
            users: HashMap::new(),
        };
        let mut report = CredentialLoadReport::default();

        if !store.path.exists() {
            return (store, report);
        }

        let content = match std::fs::read_to_string(&store.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Error loading credentials from {}: {}", store.path.display(), e);
                report.io_error = Some(e.to_string());
                return (store, report);
            }
        };

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            let mut tokens = line.split(' ').filter(|t| !t.is_empty());
            match (tokens.next(), tokens.next()) {
                (Some(username), Some(password)) => {
                    store.users.insert(
                        username.to_string(),
                        Credential {
                            username: username.to_string(),
                            password: password.to_string(),
                        },
                    );
                    report.loaded += 1;
                }
                _ => {
                    warn!(
                        "Invalid record in {} at line {}: {:?}. Skipping.",
                        store.path.display(),
                        line_no,
                        line
                    );
                    report.skipped_lines.push(line_no);
                }
            }
        }

        info!(
            "Loaded {} credentials from {}",
            report.loaded,
            store.path.display()
        );
        (store, report)
    }

    /// True iff the username exists and the stored password matches exactly
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .map(|c| c.password == password)
            .unwrap_or(false)
    }

    /// Look up a stored credential
    pub fn get_user(&self, username: &str) -> Option<&Credential> {
        self.users.get(username)
    }

    /// Register a new user. On `Added` the file has been rewritten; on an
    /// `Err` the user is kept in memory but the write failed.
    pub fn add_user(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<AddUserOutcome, CredentialError> {
        if username.is_empty() || username.chars().any(char::is_whitespace) {
            return Ok(AddUserOutcome::InvalidUsername);
        }
        if self.users.contains_key(username) {
            return Ok(AddUserOutcome::DuplicateUser);
        }
        let violated = policy::violations(password);
        if !violated.is_empty() {
            return Ok(AddUserOutcome::PolicyFailed(violated));
        }

        self.users.insert(
            username.to_string(),
            Credential {
                username: username.to_string(),
                password: password.to_string(),
            },
        );
        self.save()?;
        info!("Registered user {}", username);
        Ok(AddUserOutcome::Added)
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Rewrite the whole file from in-memory state
    fn save(&self) -> Result<(), CredentialError> {
        let mut content = String::new();
        for credential in self.users.values() {
            content.push_str(&credential.username);
            content.push(' ');
            content.push_str(&credential.password);
            content.push('\n');
        }
        std::fs::write(&self.path, content).map_err(|source| CredentialError::Save {
            path: self.path.clone(),
            source,
        })
    }
}
