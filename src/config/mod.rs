mod api;
mod defaults;
mod validation;

use crate::cli::Args;
use crate::error::{ChatError, Result};
use crate::models::UserId;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub use api::BackendConfig;
pub use defaults::{default_backend_url, default_data_dir, default_request_timeout};
pub use validation::{expand_env_var_in_string, parse_flag, validate_backend_url};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub user: UserConfig,
    #[serde(default)]
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub request_timeout: u64,
    pub data_dir: PathBuf,
    pub user: Option<UserId>,
    pub verbose: bool,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self> {
        let file_config = match FileConfig::load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: ignoring config file: {:#}", e);
                FileConfig::default()
            }
        };

        Self::resolve(args, &file_config, |name| env::var(name).ok())
    }

    /// Merge sources with precedence: CLI args > env vars > config file > defaults.
    pub fn resolve<F>(args: &Args, file: &FileConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = args
            .backend_url
            .clone()
            .or_else(|| env("PDFCHAT_BACKEND_URL"))
            .or_else(|| file.backend.url.as_deref().map(expand_env_var_in_string))
            .unwrap_or_else(default_backend_url);
        let backend_url = validate_backend_url(&backend_url)?;

        let request_timeout = env("PDFCHAT_REQUEST_TIMEOUT")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .or(file.backend.request_timeout)
            .filter(|secs| *secs > 0)
            .unwrap_or_else(default_request_timeout);

        let data_dir = args
            .data_dir
            .clone()
            .or_else(|| env("PDFCHAT_DATA_DIR").map(PathBuf::from))
            .or_else(|| {
                file.storage
                    .data_dir
                    .as_deref()
                    .map(|dir| PathBuf::from(expand_env_var_in_string(dir)))
            })
            .or_else(default_data_dir)
            .ok_or_else(|| {
                ChatError::ConfigError(
                    "could not determine a data directory; set PDFCHAT_DATA_DIR".to_string(),
                )
            })?;

        let user = args
            .user
            .clone()
            .or_else(|| env("PDFCHAT_USER"))
            .or_else(|| file.user.email.clone())
            .and_then(|raw| UserId::parse(&raw));

        let verbose = args.verbose
            || env("PDFCHAT_VERBOSE")
                .map(|v| parse_flag(&v))
                .or(file.verbose)
                .unwrap_or(false);

        Ok(Config {
            backend_url,
            request_timeout,
            data_dir,
            user,
            verbose,
        })
    }
}

impl FileConfig {
    pub fn load() -> anyhow::Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(FileConfig::default())
    }

    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );
        let config = if is_yaml {
            serde_yaml::from_str(&contents).with_context(|| {
                format!("Failed to parse YAML config file: {}", path.display())
            })?
        } else {
            serde_json::from_str(&contents).with_context(|| {
                format!("Failed to parse JSON config file: {}", path.display())
            })?
        };

        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".pdfchat.yaml"),
            PathBuf::from(".pdfchat.yml"),
            PathBuf::from(".pdfchat.json"),
        ];

        if let Some(config_dir) = Self::global_config_dir() {
            paths.push(config_dir.join("pdfchat.yaml"));
            paths.push(config_dir.join("pdfchat.yml"));
            paths.push(config_dir.join("pdfchat.json"));
        }

        paths
    }

    fn global_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pdfchat"))
    }

    /// Write an example config to the global config directory.
    pub fn init_default() -> anyhow::Result<PathBuf> {
        let config_dir = Self::global_config_dir()
            .context("Could not determine the user config directory")?;
        let path = config_dir.join("pdfchat.yaml");
        if path.exists() {
            anyhow::bail!("Config file already exists: {}", path.display());
        }

        fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create {}", config_dir.display()))?;
        fs::write(&path, defaults::example_config_yaml())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
