use std::path::{
    Path,
    PathBuf,
};

use crate::{
    core::KanaError,
    persistence::{
        get_app_data_dir,
        get_data_file_path,
        load_json_or_default,
        save_json_at,
    },
    recognition::MODEL_RELATIVE_PATH,
};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Classifier artifact; defaults to the bundled location in the data directory.
    pub model_path: Option<PathBuf>,
    pub store_file: String,
    pub recent_limit: usize,
    pub daily_window: usize,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_path: None,
            store_file: "progress.json".to_string(),
            recent_limit: 20,
            daily_window: 7,
            log_filter: "kana_master=info".to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(&get_data_file_path(SETTINGS_FILE))
    }

    /// A missing file is created with the defaults so there is something to edit.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            return load_json_or_default::<Settings>(path);
        }

        let settings = Self::default();
        match settings.save_to(path) {
            Ok(()) => tracing::info!(path = %path.display(), "wrote default settings"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "could not write default settings"),
        }
        settings
    }

    pub fn save_to(&self, path: &Path) -> Result<(), KanaError> {
        save_json_at(self, path)
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_path_in(&get_app_data_dir())
    }

    pub fn store_path(&self) -> PathBuf {
        get_app_data_dir().join(&self.store_file)
    }

    fn model_path_in(&self, data_dir: &Path) -> PathBuf {
        match &self.model_path {
            Some(path) => path.clone(),
            None => data_dir.join(MODEL_RELATIVE_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "daily_window": 14 }"#).unwrap();
        assert_eq!(settings.daily_window, 14);
        assert_eq!(settings.recent_limit, 20);
        assert_eq!(settings.store_file, "progress.json");
        assert_eq!(settings.model_path, None);
    }

    #[test]
    fn test_model_path_override() {
        let data_dir = Path::new("/data/kana-master");
        let mut settings = Settings::default();
        assert_eq!(settings.model_path_in(data_dir), data_dir.join("model/kana-model/model.json"));

        settings.model_path = Some(PathBuf::from("/opt/models/kana.json"));
        assert_eq!(settings.model_path_in(data_dir), PathBuf::from("/opt/models/kana.json"));
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = std::env::temp_dir().join(format!("kana-settings-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(SETTINGS_FILE);

        assert_eq!(Settings::load_from(&path), Settings::default());
        assert!(path.exists());

        let mut edited = Settings::default();
        edited.recent_limit = 5;
        edited.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), edited);

        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unwritable_location_still_loads_defaults() {
        let path = std::env::temp_dir()
            .join(format!("kana-settings-{}", uuid::Uuid::new_v4()))
            .join("missing-dir")
            .join(SETTINGS_FILE);
        assert_eq!(Settings::load_from(&path), Settings::default());
        assert!(!path.exists());
    }
}
