use super::KeyValueStore;
use crate::core::{
    presentation::PresentationSettings,
    ReaderError,
};

pub const API_KEY_KEY: &str = "gemini_api_key";
pub const DARK_MODE_KEY: &str = "dark_mode";
pub const PRESENTATION_KEY: &str = "presentation";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preferences {
    pub api_key: Option<String>,
    pub presentation: PresentationSettings,
}

/// Reads and writes user preferences under fixed storage keys.
pub struct PreferencesRepository {
    store: KeyValueStore,
}

impl PreferencesRepository {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Preferences {
        let api_key = self.store.get(API_KEY_KEY).map(str::to_string);

        let mut presentation = match self.store.get(PRESENTATION_KEY) {
            Some(json) => serde_json::from_str::<PresentationSettings>(json).unwrap_or_else(|e| {
                tracing::warn!("Stored presentation settings unreadable: {}. Using defaults.", e);
                PresentationSettings::default()
            }),
            None => PresentationSettings::default(),
        };

        // The flag wins over whatever colors were stored.
        if self.store.get(DARK_MODE_KEY) == Some("true") {
            presentation.set_dark_mode(true);
        } else {
            presentation.dark_mode = false;
        }

        Preferences { api_key, presentation }
    }

    pub fn save_api_key(&mut self, key: &str) -> Result<(), ReaderError> {
        if key.trim().is_empty() {
            return Err(ReaderError::EmptyInput("API Key cannot be empty!".to_string()));
        }
        self.store.set(API_KEY_KEY, key)
    }

    pub fn save_dark_mode(&mut self, enabled: bool) -> Result<(), ReaderError> {
        self.store.set(DARK_MODE_KEY, enabled.to_string())
    }

    pub fn save_presentation(&mut self, settings: &PresentationSettings) -> Result<(), ReaderError> {
        let json = serde_json::to_string(settings)?;
        self.store.set(PRESENTATION_KEY, json)?;
        self.save_dark_mode(settings.dark_mode)
    }
}
