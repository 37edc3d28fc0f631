// config.rs
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR_NAME: &str = "dnglab-gui";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Settings read from `config.toml`. Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub converter: String,
    pub terminal: String,
    pub terminal_args: Vec<String>,
    pub shell: String,
    pub keep_terminal_open: bool,
    pub default_destination: Option<PathBuf>,
    pub options: ConversionOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            converter: String::from("dnglab"),
            terminal: String::from("gnome-terminal"),
            terminal_args: vec![String::from("--")],
            shell: String::from("bash"),
            keep_terminal_open: true,
            default_destination: None,
            options: ConversionOptions::default(),
        }
    }
}

impl Settings {
    /// Destination used until the user picks one.
    pub fn initial_destination(&self) -> PathBuf {
        self.default_destination
            .clone()
            .unwrap_or_else(pictures_directory)
    }
}

/// Options forwarded to `dnglab convert`. Defaults match dnglab's own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    pub compression: Compression,
    pub embed_raw: bool,
    pub dng_preview: bool,
    pub dng_thumbnail: bool,
    pub crop: CropMode,
    pub artist: String,
    pub override_existing: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            compression: Compression::Lossless,
            embed_raw: true,
            dng_preview: true,
            dng_thumbnail: true,
            crop: CropMode::Best,
            artist: String::new(),
            override_existing: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    Lossless,
    Uncompressed,
}

impl Compression {
    pub const ALL: [Compression; 2] = [Compression::Lossless, Compression::Uncompressed];

    pub fn as_arg(self) -> &'static str {
        match self {
            Compression::Lossless => "lossless",
            Compression::Uncompressed => "uncompressed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropMode {
    Best,
    ActiveArea,
    None,
}

impl CropMode {
    pub const ALL: [CropMode; 3] = [CropMode::Best, CropMode::ActiveArea, CropMode::None];

    pub fn as_arg(self) -> &'static str {
        match self {
            CropMode::Best => "best",
            CropMode::ActiveArea => "activearea",
            CropMode::None => "none",
        }
    }
}

/// Outcome of [`load_settings`]; problems are reported as warnings, not errors.
#[derive(Debug)]
pub struct SettingsLoad {
    pub settings: Settings,
    pub warnings: Vec<String>,
}

pub fn config_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

pub fn config_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// The user's pictures folder, falling back to `~/Pictures`.
pub fn pictures_directory() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn load_settings() -> SettingsLoad {
    load_settings_from(&config_path())
}

pub fn load_settings_from(path: &Path) -> SettingsLoad {
    if !path.exists() {
        return SettingsLoad {
            settings: Settings::default(),
            warnings: Vec::new(),
        };
    }

    match read_settings(path) {
        Ok(settings) => SettingsLoad {
            settings,
            warnings: Vec::new(),
        },
        Err(err) => SettingsLoad {
            settings: Settings::default(),
            warnings: vec![format!("{}. Falling back to defaults.", err)],
        },
    }
}

fn read_settings(path: &Path) -> Result<Settings, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_settings(settings: &Settings) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_settings_to(settings, &path)?;
    Ok(path)
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let serialized = toml::to_string_pretty(settings)?;
    fs::write(path, serialized).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
