//! Configuration for the updater
//!
//! Settings are read from a JSON file and then overridden by command-line
//! arguments. The merged value is built once at startup, validated, and
//! threaded explicitly through every call. There is no ambient global state
//! and the working directory is never changed.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Default service used to look up the value to publish
pub const DEFAULT_UPDATE_VALUE_URL: &str = "https://ipinfo.io/ip";

/// Merged runtime settings
///
/// All fields are optional in the settings file; a missing file yields the
/// defaults. `username` and `password` must be present (from file or command
/// line) before any network call is made; see [`Settings::credentials`].
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Control panel username
    #[serde(default)]
    pub username: Option<String>,

    /// Control panel password
    /// Never logged; the Debug implementation redacts it.
    #[serde(default)]
    pub password: Option<String>,

    /// Record names to reconcile, in order. Duplicates are allowed.
    #[serde(default)]
    pub names: Vec<String>,

    /// Value to publish; when absent it is fetched from `update_value_url`
    #[serde(default)]
    pub update_value: Option<String>,

    /// Lookup service for the update value
    #[serde(default = "default_update_value_url")]
    pub update_value_url: String,

    /// Submit updates even when the scraped value already matches
    #[serde(default)]
    pub force_update: bool,

    /// User-agent header sent with every request.
    /// An empty string is a valid, literal value to send.
    #[serde(default)]
    pub user_agent: String,
}

impl Settings {
    /// Create settings with all defaults
    pub fn new() -> Self {
        Self {
            username: None,
            password: None,
            names: Vec::new(),
            update_value: None,
            update_value_url: default_update_value_url(),
            force_update: false,
            user_agent: String::new(),
        }
    }

    /// Load settings from a JSON file
    ///
    /// A missing file is not an error; it yields the defaults so that the
    /// command line can supply everything. An unreadable or malformed file is
    /// a fatal configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            Error::config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Apply command-line overrides on top of the file settings
    ///
    /// Scalar overrides replace the configured value when present. Names
    /// given on the command line replace the configured list wholesale, never
    /// append to it. The force flag can only be switched on, not off.
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(username) = overrides.username {
            self.username = Some(username);
        }
        if let Some(password) = overrides.password {
            self.password = Some(password);
        }
        if !overrides.names.is_empty() {
            self.names = overrides.names;
        }
        if let Some(update_value) = overrides.update_value {
            self.update_value = Some(update_value);
        }
        if let Some(user_agent) = overrides.user_agent {
            self.user_agent = user_agent;
        }
        if overrides.force_update {
            self.force_update = true;
        }
    }

    /// Validate that credentials are present and return them
    ///
    /// Both `username` and `password` must be present and non-empty before
    /// any network call; an empty string counts as missing.
    pub fn credentials(&self) -> Result<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password))
                if !username.is_empty() && !password.is_empty() =>
            {
                Ok(Credentials {
                    username: username.clone(),
                    password: password.clone(),
                })
            }
            _ => Err(Error::config("missing credentials")),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

// Custom Debug implementation that hides the password
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("names", &self.names)
            .field("update_value", &self.update_value)
            .field("update_value_url", &self.update_value_url)
            .field("force_update", &self.force_update)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Command-line overrides applied on top of the settings file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub username: Option<String>,
    pub password: Option<String>,
    pub names: Vec<String>,
    pub update_value: Option<String>,
    pub user_agent: Option<String>,
    pub force_update: bool,
}

/// Validated control panel credentials
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Custom Debug implementation that hides the password
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn default_update_value_url() -> String {
    DEFAULT_UPDATE_VALUE_URL.to_string()
}
