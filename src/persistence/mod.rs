mod preferences;

use std::{
    collections::BTreeMap,
    fs,
    path::PathBuf,
};

pub use preferences::{
    Preferences,
    PreferencesRepository,
};
use serde::Deserialize;

use crate::core::ReaderError;

const APP_NAME: &str = "dyslexia-reader";
pub const STORAGE_FILE: &str = "storage.json";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> Result<T, ReaderError> {
    let file_path = get_data_file_path(filename);

    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(&file_path)?;
    let data: T = serde_json::from_str(&json)?;
    tracing::debug!("Data loaded from: {}", file_path.display());
    Ok(data)
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> T {
    match load_json::<T>(filename) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Failed to load {}: {}. Using defaults.", filename, e);
            T::default()
        }
    }
}

/// Flat string-keyed storage written through to a single JSON file.
#[derive(Debug)]
pub struct KeyValueStore {
    file_path: PathBuf,
    values: BTreeMap<String, String>,
}

impl KeyValueStore {
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self, ReaderError> {
        let file_path = file_path.into();
        let values = if file_path.exists() {
            let content = fs::read_to_string(&file_path)?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };

        Ok(Self { file_path, values })
    }

    /// Like [`KeyValueStore::open`], but an unreadable file starts an empty store that replaces
    /// it on the next write.
    pub fn open_or_empty(file_path: impl Into<PathBuf>) -> Self {
        let file_path = file_path.into();
        match Self::open(file_path.clone()) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}. Starting empty.", file_path.display(), e);
                Self { file_path, values: BTreeMap::new() }
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), ReaderError> {
        self.values.insert(key.to_string(), value.into());
        self.save()
    }

    pub fn remove(&mut self, key: &str) -> Result<bool, ReaderError> {
        if self.values.remove(key).is_some() {
            self.save()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn save(&self) -> Result<(), ReaderError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.file_path, content)?;
        Ok(())
    }
}
