use common::config::{ConfigContentProvider, ConfigManager, YamlConfigSerializer};
use common::log;
use serde::{Deserialize, Serialize};

use super::Config;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Light,
    Dark,
}

/// Cosmetic key-value preferences. Nothing here affects gameplay.
pub trait PreferenceStore {
    fn get_theme(&self) -> Option<Theme>;

    fn set_theme(&self, theme: Theme) -> Result<(), String>;
}

pub struct ConfigPreferenceStore<P: ConfigContentProvider> {
    config_manager: ConfigManager<P, Config, YamlConfigSerializer>,
}

impl<P: ConfigContentProvider> ConfigPreferenceStore<P> {
    pub fn new(config_manager: ConfigManager<P, Config, YamlConfigSerializer>) -> Self {
        Self { config_manager }
    }
}

impl<P: ConfigContentProvider> PreferenceStore for ConfigPreferenceStore<P> {
    fn get_theme(&self) -> Option<Theme> {
        match self.config_manager.get_config() {
            Ok(config) => config.theme,
            Err(e) => {
                log!("Failed to read theme preference: {}", e);
                None
            }
        }
    }

    fn set_theme(&self, theme: Theme) -> Result<(), String> {
        self.config_manager
            .update_config(|config| config.theme = Some(theme))
            .map(|_| ())
    }
}
