use std::fs;
use std::path::PathBuf;

use super::models::Preferences;
use crate::error::StorageError;

const PREFERENCES_FILE: &str = "preferences.json";

/// JSON-file preference store
#[derive(Clone)]
pub struct PreferenceStore {
    base_path: PathBuf,
}

impl PreferenceStore {
    /// Create a store in the default directory ("./wallet-data")
    pub fn new() -> Self {
        Self {
            base_path: PathBuf::from(crate::config::DEFAULT_DATA_DIR),
        }
    }

    /// Create a store in a custom directory (for testing)
    pub fn new_with_base_dir(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_path
    }

    fn preferences_path(&self) -> PathBuf {
        self.base_path.join(PREFERENCES_FILE)
    }

    /// Load preferences, or defaults if nothing has been saved yet
    pub fn load(&self) -> Result<Preferences, StorageError> {
        let path = self.preferences_path();
        if !path.exists() {
            return Ok(Preferences::default());
        }
        let contents = fs::read_to_string(path)?;
        let prefs = serde_json::from_str(&contents)?;
        Ok(prefs)
    }

    /// Save preferences to disk
    pub fn save(&self, prefs: &Preferences) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path)?;
        let json = serde_json::to_string_pretty(prefs)?;
        fs::write(self.preferences_path(), json)?;
        Ok(())
    }
}

impl Default for PreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}
