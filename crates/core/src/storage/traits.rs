//! Storage repository traits
//!
//! The controller talks to preferences through this trait so it can run
//! against SQLite in the app and against an in-memory database in tests.

use crate::error::Result;
use crate::models::Preferences;

use super::parse::{decode_bool, encode_bool};

/// Keys held by the preference store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKey {
    UserName,
    DarkMode,
    OnboardingDone,
}

impl PreferenceKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::UserName => "username",
            PreferenceKey::DarkMode => "darkMode",
            PreferenceKey::OnboardingDone => "onboardingDone",
        }
    }
}

/// Key/value preference persistence
pub trait PreferenceRepository {
    /// Read a raw value
    fn get_preference(&self, key: PreferenceKey) -> Result<Option<String>>;

    /// Write a raw value
    fn set_preference(&self, key: PreferenceKey, value: &str) -> Result<()>;

    /// Remove every stored key
    fn clear_preferences(&self) -> Result<()>;

    /// Read all three scalars, defaulting whatever is absent
    fn load_preferences(&self) -> Result<Preferences> {
        let user_name = self
            .get_preference(PreferenceKey::UserName)?
            .filter(|n| !n.trim().is_empty());
        let dark_mode = decode_bool(self.get_preference(PreferenceKey::DarkMode)?.as_deref());
        let onboarding_done =
            decode_bool(self.get_preference(PreferenceKey::OnboardingDone)?.as_deref());

        Ok(Preferences {
            user_name,
            dark_mode,
            onboarding_done,
        })
    }

    fn save_user_name(&self, name: &str) -> Result<()> {
        self.set_preference(PreferenceKey::UserName, name)
    }

    fn save_dark_mode(&self, enabled: bool) -> Result<()> {
        self.set_preference(PreferenceKey::DarkMode, encode_bool(enabled))
    }

    fn save_onboarding_done(&self, done: bool) -> Result<()> {
        self.set_preference(PreferenceKey::OnboardingDone, encode_bool(done))
    }
}
