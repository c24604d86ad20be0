//! Persisted session preferences

use serde::{Deserialize, Serialize};

/// Name shown when the user hasn't entered one yet
pub const FALLBACK_NAME: &str = "Friend";

/// The three persisted session scalars
///
/// Every field has a safe default, so a partially written store still
/// decodes into something usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub user_name: Option<String>,
    pub dark_mode: bool,
    pub onboarding_done: bool,
}

impl Preferences {
    /// Name for greetings and entry authorship
    pub fn display_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or(FALLBACK_NAME)
    }
}

/// Normalize a user-entered name; blank input yields `None`
pub fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.user_name, None);
        assert!(!prefs.dark_mode);
        assert!(!prefs.onboarding_done);
        assert_eq!(prefs.display_name(), "Friend");
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  \t\n"), None);
        assert_eq!(normalize_name(" Ava "), Some("Ava".to_string()));
    }
}
