//! # Monitored Target Model
//!
//! A target is an opaque host identifier, either a hostname or an IP literal.
//! Nothing here resolves or validates the host beyond its shape: resolution
//! failures are a normal probe outcome, not a configuration error.

use std::fmt;
use std::str::FromStr;

/// A host to be monitored.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Target(String);

impl Target {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Target {
    type Err = String;

    /// Parses a single host token.
    ///
    /// Leading and trailing whitespace is trimmed. Empty input and input
    /// containing inner whitespace are rejected, since the probe tools take
    /// the host as exactly one argument.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();

        if trimmed.is_empty() {
            return Err("empty target".to_string());
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(format!("invalid target: {trimmed}"));
        }

        Ok(Target(trimmed.to_string()))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
