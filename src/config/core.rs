use anyhow::{Context, Result, bail};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};
use std::path::Path;

use super::{GuardSettings, SettingsOverrides};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Repository config files, merged in this order
const REPO_CONFIG_FILES: [&str; 4] = [
    "incguard.toml",
    "incguard.json",
    "incguard.yaml",
    "incguard.yml",
];

pub const ENV_PREFIX: &str = "INCGUARD_";

/// Layered configuration: embedded defaults, config file, environment, CLI
pub struct GuardConfig {
    figment: Figment,
}

impl GuardConfig {
    pub fn load() -> Result<Self> {
        Self::load_with(None, None)
    }

    /// Load configuration, optionally from a custom file and with CLI overrides
    ///
    /// A custom file replaces the repository config files; its format is taken
    /// from the extension and TOML is assumed when there is none.
    pub fn load_with(
        custom_config: Option<&str>,
        overrides: Option<&SettingsOverrides>,
    ) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(custom_path) = custom_config {
            let path = Path::new(custom_path);
            if !path.is_file() {
                bail!("Config file not found: {}", path.display());
            }
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => figment.merge(Json::file(path)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
                _ => figment.merge(Toml::file(path)),
            };
        } else {
            for name in REPO_CONFIG_FILES {
                figment = match name.rsplit('.').next() {
                    Some("json") => figment.merge(Json::file(name)),
                    Some("yaml") | Some("yml") => figment.merge(Yaml::file(name)),
                    _ => figment.merge(Toml::file(name)),
                };
            }
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        if let Some(overrides) = overrides {
            figment = figment.merge(Serialized::defaults(overrides));
        }

        Ok(GuardConfig { figment })
    }

    /// Extract and validate the typed settings
    pub fn settings(&self) -> Result<GuardSettings> {
        let settings: GuardSettings = self
            .figment
            .extract()
            .context("Failed to parse incguard configuration")?;
        settings.validate()?;
        Ok(settings)
    }
}
