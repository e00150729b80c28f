//! Application settings

use serde::{Deserialize, Serialize};

/// Environment variable overriding the generator endpoint
pub const GENERATOR_URL_ENV: &str = "MAK3D_GENERATOR_URL";

/// Display flags handed to the render collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFlags {
    /// Show ground grid
    pub show_grid: bool,
    /// Contact shadows under objects
    pub show_shadows: bool,
    /// Slow auto-orbit camera, UI chrome hidden
    pub cinematic_mode: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_shadows: true,
            cinematic_mode: false,
        }
    }
}

/// Generation service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Base URL of the generation server
    pub endpoint: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3001".to_string(),
        }
    }
}

/// Autosave settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutosaveSettings {
    pub enabled: bool,
}

impl Default for AutosaveSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub display: DisplayFlags,
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub autosave: AutosaveSettings,
}

impl AppSettings {
    /// Load settings from file, or return default if not found.
    /// The generator endpoint can be overridden from the environment.
    pub fn load() -> Self {
        let mut settings = Self::load_file().unwrap_or_default();
        if let Ok(url) = std::env::var(GENERATOR_URL_ENV) {
            settings.apply_endpoint_override(&url);
        }
        settings
    }

    fn load_file() -> Option<Self> {
        let dirs = directories::ProjectDirs::from("com", "mak3d", "mak3d")?;
        let config_path = dirs.config_dir().join("settings.json");
        let json = std::fs::read_to_string(&config_path).ok()?;
        match serde_json::from_str(&json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!("Ignoring malformed {}: {e}", config_path.display());
                None
            }
        }
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = directories::ProjectDirs::from("com", "mak3d", "mak3d") {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    let _ = std::fs::write(config_path, json);
                }
            }
        }
    }

    fn apply_endpoint_override(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.generator.endpoint = url.trim_end_matches('/').to_string();
        }
    }
}
