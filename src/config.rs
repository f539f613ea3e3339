//! Startup configuration: where the content service lives, how long each call may take, and
//! which parts of the screen are enabled.

use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};

use crate::persistence::load_json_or_default;

pub const CONFIG_FILE: &str = "config.json";
pub const BACKEND_URL_ENV: &str = "DYSLEXIA_READER_BACKEND_URL";
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    pub pdf_upload_secs: u64,
    pub image_upload_secs: u64,
    pub text_processing_secs: u64,
    pub quiz_secs: u64,
    pub audio_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            pdf_upload_secs: 600,
            image_upload_secs: 300,
            text_processing_secs: 300,
            quiz_secs: 300,
            audio_secs: 60,
        }
    }
}

impl Timeouts {
    pub fn pdf_upload(&self) -> Duration {
        Duration::from_secs(self.pdf_upload_secs)
    }

    pub fn image_upload(&self) -> Duration {
        Duration::from_secs(self.image_upload_secs)
    }

    pub fn text_processing(&self) -> Duration {
        Duration::from_secs(self.text_processing_secs)
    }

    pub fn quiz(&self) -> Duration {
        Duration::from_secs(self.quiz_secs)
    }

    pub fn audio(&self) -> Duration {
        Duration::from_secs(self.audio_secs)
    }
}

/// Optional parts of the reading screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenFeatures {
    pub image_capture: bool,
    pub document_export: bool,
    pub dark_mode: bool,
    pub settings_panel: bool,
}

impl ScreenFeatures {
    pub fn full() -> Self {
        Self { image_capture: true, document_export: true, dark_mode: true, settings_panel: true }
    }

    /// PDF upload, view modes, listening and quizzes only.
    pub fn minimal() -> Self {
        Self {
            image_capture: false,
            document_export: false,
            dark_mode: false,
            settings_panel: false,
        }
    }
}

impl Default for ScreenFeatures {
    fn default() -> Self {
        Self::full()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub timeouts: Timeouts,
    pub features: ScreenFeatures,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            timeouts: Timeouts::default(),
            features: ScreenFeatures::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        let config = load_json_or_default::<AppConfig>(CONFIG_FILE);
        config.with_backend_override(std::env::var(BACKEND_URL_ENV).ok())
    }

    pub fn with_backend_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.backend_url = url.trim().to_string();
        }
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.backend_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"features": {"image_capture": false}}"#).unwrap();
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.timeouts.pdf_upload(), Duration::from_secs(600));
        assert!(!config.features.image_capture);
        assert!(config.features.document_export);
    }

    #[test]
    fn override_replaces_url() {
        let config =
            AppConfig::default().with_backend_override(Some(" http://10.0.0.2:9000 ".into()));
        assert_eq!(config.backend_url, "http://10.0.0.2:9000");

        let config = AppConfig::default().with_backend_override(Some("  ".into()));
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = AppConfig { backend_url: "http://host:8000/".into(), ..Default::default() };
        assert_eq!(config.endpoint("/get_audio"), "http://host:8000/get_audio");
    }
}
