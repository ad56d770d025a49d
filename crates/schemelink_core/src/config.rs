//! Handshake scheme configuration.
//!
//! # Responsibility
//! - Name the caller and callee schemes a process pair uses.
//! - Overlay environment overrides onto the built-in defaults.
//!
//! # Invariants
//! - A config returned by `from_env` or `validate` holds only valid schemes.

use crate::model::target::is_valid_scheme;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default scheme of the process that starts the handshake.
pub const DEFAULT_CALLER_SCHEME: &str = "app1";
/// Default scheme of the process that receives the identifier.
pub const DEFAULT_CALLEE_SCHEME: &str = "app2";

pub const CALLER_SCHEME_ENV: &str = "SCHEMELINK_CALLER_SCHEME";
pub const CALLEE_SCHEME_ENV: &str = "SCHEMELINK_CALLEE_SCHEME";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandshakeConfig {
    /// Scheme the callee dispatches to when returning control.
    pub caller_scheme: String,
    /// Scheme the caller checks and invokes.
    pub callee_scheme: String,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            caller_scheme: DEFAULT_CALLER_SCHEME.to_string(),
            callee_scheme: DEFAULT_CALLEE_SCHEME.to_string(),
        }
    }
}

impl HandshakeConfig {
    /// Builds a config from process environment variables.
    ///
    /// Blank or unset variables fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an explicit variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = non_blank(lookup(CALLER_SCHEME_ENV)) {
            config.caller_scheme = value;
        }
        if let Some(value) = non_blank(lookup(CALLEE_SCHEME_ENV)) {
            config.callee_scheme = value;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_scheme(&self.caller_scheme) {
            return Err(ConfigError::InvalidScheme {
                field: "caller_scheme",
                value: self.caller_scheme.clone(),
            });
        }
        if !is_valid_scheme(&self.callee_scheme) {
            return Err(ConfigError::InvalidScheme {
                field: "callee_scheme",
                value: self.callee_scheme.clone(),
            });
        }
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    let trimmed = value?.trim().to_string();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidScheme { field: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidScheme { field, value } => {
                write!(f, "{field} is not a valid scheme: `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}
