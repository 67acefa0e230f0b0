mod canvas_config;
mod main_config;
mod theme;

pub use canvas_config::CanvasConfig;
pub use main_config::{get_config_manager, Config};
pub use theme::{ConfigPreferenceStore, PreferenceStore, Theme};
