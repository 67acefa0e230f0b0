use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads, validates and caches a config value. A missing backing store yields
/// `TConfig::default()`; invalid content is an error rather than a silent default.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl AsRef<Path>) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path.as_ref()),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&config_data)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;
        *current = Some(config.clone());
        Ok(())
    }

    /// Read-modify-write of the stored config.
    pub fn update_config(&self, update: impl FnOnce(&mut TConfig)) -> Result<TConfig, String> {
        let mut config = self.get_config()?;
        update(&mut config);
        self.set_config(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryContentConfigProvider;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        volume: u32,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self { volume: 5 }
        }
    }

    impl Validate for TestConfig {
        fn validate(&self) -> Result<(), String> {
            if self.volume > 10 {
                return Err("volume must not exceed 10".to_string());
            }
            Ok(())
        }
    }

    fn memory_manager(
        provider: MemoryContentConfigProvider,
    ) -> ConfigManager<MemoryContentConfigProvider, TestConfig> {
        ConfigManager::new(provider, YamlConfigSerializer::new())
    }

    #[test]
    fn test_empty_store_returns_default() {
        let manager = memory_manager(MemoryContentConfigProvider::new());
        assert_eq!(manager.get_config(), Ok(TestConfig::default()));
    }

    #[test]
    fn test_set_config_persists_and_caches() {
        let provider = MemoryContentConfigProvider::new();
        let manager = memory_manager(provider.clone());
        manager.set_config(&TestConfig { volume: 7 }).unwrap();

        let fresh = memory_manager(provider);
        assert_eq!(fresh.get_config(), Ok(TestConfig { volume: 7 }));
        assert_eq!(manager.get_config(), Ok(TestConfig { volume: 7 }));
    }

    #[test]
    fn test_invalid_content_is_rejected() {
        let manager = memory_manager(MemoryContentConfigProvider::with_content("volume: 11\n"));
        assert!(manager.get_config().is_err());
    }

    #[test]
    fn test_invalid_config_is_not_saved() {
        let provider = MemoryContentConfigProvider::new();
        let manager = memory_manager(provider.clone());
        assert!(manager.set_config(&TestConfig { volume: 99 }).is_err());
        assert_eq!(provider.get_config_content(), Ok(None));
    }

    #[test]
    fn test_update_config_applies_change() {
        let manager = memory_manager(MemoryContentConfigProvider::new());
        let updated = manager.update_config(|c| c.volume = 3).unwrap();
        assert_eq!(updated, TestConfig { volume: 3 });
        assert_eq!(manager.get_config(), Ok(TestConfig { volume: 3 }));
    }
}
