use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::snake::Difficulty;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{CanvasConfig, Theme};

const CONFIG_FILE_NAME: &str = "snake_desktop_config.yaml";

pub type DesktopConfigManager =
    ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Config stored next to the executable unless `path` overrides it.
pub fn get_config_manager(path: Option<PathBuf>) -> DesktopConfigManager {
    ConfigManager::from_yaml_file(path.unwrap_or_else(get_config_path))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub canvas: CanvasConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.canvas.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_snake_desktop_config_{}.yaml", random_number))
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let serialized_string = serializer.serialize(&default_config).unwrap();
        let deserialized_config: Config = serializer.deserialize(&serialized_string).unwrap();
        assert_eq!(default_config, deserialized_config);
    }

    #[test]
    fn test_config_can_be_saved_and_loaded_through_manager() {
        let config = Config {
            theme: Some(Theme::Dark),
            difficulty: Difficulty::Hard,
            ..Config::default()
        };
        let file_path = get_temp_file_path();
        let manager = get_config_manager(Some(file_path.clone()));

        assert!(manager.set_config(&config).is_ok());
        assert_eq!(manager.get_config().unwrap(), config);

        let fresh_manager = get_config_manager(Some(file_path.clone()));
        assert_eq!(fresh_manager.get_config().unwrap(), config);

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let manager = get_config_manager(Some(PathBuf::from("this_file_does_not_exist.yaml")));
        assert_eq!(manager.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let file_path = get_temp_file_path();
        FileContentConfigProvider::new(file_path.clone())
            .set_config_content("difficulty: Easy\n")
            .unwrap();

        let config = get_config_manager(Some(file_path.clone())).get_config().unwrap();
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.theme, None);
        assert_eq!(config.canvas, CanvasConfig::default());

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let invalid_config_content = r#"
            difficulty: Normal
            canvas:
              width_px: 400
              height_px: 400
              cell_size_px: 0
        "#;

        let file_path = get_temp_file_path();
        FileContentConfigProvider::new(file_path.clone())
            .set_config_content(invalid_config_content)
            .unwrap();

        let manager = get_config_manager(Some(file_path.clone()));
        assert!(manager.get_config().is_err());

        let _ = std::fs::remove_file(file_path);
    }
}
