use crate::error::{EchosnipError, Result as EchosnipResult};
use crate::profile::LanguageProfile;
use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File names probed in the working directory, in order.
const LOCAL_CONFIG_FILES: &[&str] = &["echosnip.yaml", "echosnip.toml", "config.yaml"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub folder_path: PathBuf,
    pub ignore_folders: Vec<String>,
    pub debug: bool,
    pub debug_log_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    pub languages: IndexMap<String, LanguageProfile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            folder_path: PathBuf::from("."),
            ignore_folders: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "target".to_string(),
                "__pycache__".to_string(),
            ],
            debug: false,
            debug_log_path: PathBuf::from("debug.log"),
            output_path: None,
            languages: IndexMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// TOML for `.toml` files, YAML otherwise.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

impl Config {
    /// Loads `explicit` if given, otherwise the first config found on the search path.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        match Self::find_config_path() {
            Some(path) => Self::from_path(&path),
            None => bail!(
                "No config file found. Looked for {} in the current directory, \
                 <config dir>/echosnip/config.{{yaml,toml}} and ~/.echosnip.toml",
                LOCAL_CONFIG_FILES.join(", ")
            ),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        log::debug!("Attempting to load config file from '{}'", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&content, ConfigFormat::from_path(path))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::debug!("Config file loaded successfully.");
        Ok(config)
    }

    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        let config: Self = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        Ok(config)
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Some(found) = LOCAL_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
        {
            return Some(found);
        }

        if let Some(config_dir) = dirs::config_dir() {
            for name in ["config.yaml", "config.toml"] {
                let path = config_dir.join("echosnip").join(name);
                if path.exists() {
                    return Some(path);
                }
            }
        }

        if let Some(home) = dirs::home_dir() {
            let home_path = home.join(".echosnip.toml");
            if home_path.exists() {
                return Some(home_path);
            }
        }

        None
    }

    /// Configured language names in file order.
    pub fn language_names(&self) -> Vec<String> {
        self.languages.keys().cloned().collect()
    }

    /// Looks a language up by exact name, then ignoring case.
    pub fn language(&self, name: &str) -> EchosnipResult<(&str, &LanguageProfile)> {
        self.languages
            .get_key_value(name)
            .or_else(|| {
                self.languages
                    .iter()
                    .find(|(key, _)| key.to_lowercase() == name.to_lowercase())
            })
            .map(|(key, profile)| (key.as_str(), profile))
            .ok_or_else(|| EchosnipError::UnknownLanguage {
                name: name.to_string(),
                available: self.language_names(),
            })
    }
}
