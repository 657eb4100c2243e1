use crate::presentation::config::Settings;

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub level: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub fn from_settings(settings: &Settings, environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            level: settings.logging.level.clone(),
            json_format: settings.logging.enable_json,
        }
    }

    pub fn default_directives(&self) -> String {
        format!("{},logidoc=debug,tower_http=debug", self.level)
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: "local".to_string(),
            level: "info".to_string(),
            json_format: false,
        }
    }
}
