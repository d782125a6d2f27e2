//! Startup configuration (`<config dir>/config.toml`).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::shell::mesh::{MeshVariant, ThetaDomain};
use crate::shell::morphospace::MorphTunables;
use crate::shell::scene::SceneConfig;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mesh: MeshConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub morphospace: MorphTunables,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    #[serde(default)]
    pub variant: MeshVariant,
    #[serde(default)]
    pub theta_domain: ThetaDomain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub pitch_deg: f32,
    #[serde(default = "default_roll")]
    pub roll_deg: f32,
    #[serde(default = "default_opacity")]
    pub shell_opacity: f32,
    #[serde(default = "default_true")]
    pub vsync: bool,
}

fn default_roll() -> f32 { 135.0 }
fn default_opacity() -> f32 { 1.0 }
fn default_true() -> bool { true }

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            pitch_deg: 0.0,
            roll_deg: default_roll(),
            shell_opacity: default_opacity(),
            vsync: true,
        }
    }
}

impl ViewConfig {
    pub fn scene(&self) -> SceneConfig {
        SceneConfig {
            pitch_deg: self.pitch_deg,
            roll_deg: self.roll_deg,
            shell_opacity: self.shell_opacity,
            ..SceneConfig::default()
        }
    }
}

pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "shellmorph", "shellmorph")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}

pub fn load() -> Config {
    let Some(path) = config_dir().map(|dir| dir.join(CONFIG_FILE)) else {
        return Config::default();
    };
    let Ok(content) = std::fs::read_to_string(&path) else {
        tracing::info!("no config at {}, using defaults", path.display());
        return Config::default();
    };
    match parse(&content) {
        Ok(config) => {
            tracing::info!("loaded config from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("ignoring malformed {}: {}", path.display(), e);
            Config::default()
        }
    }
}

pub fn save(config: &Config) -> std::io::Result<()> {
    if let Some(dir) = config_dir() {
        std::fs::create_dir_all(&dir)?;
        let content = toml::to_string_pretty(config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(dir.join(CONFIG_FILE), content)?;
    }
    Ok(())
}
