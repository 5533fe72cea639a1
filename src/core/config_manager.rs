// src/core/config_manager.rs
//! Application configuration: optional `config.yaml` sections overridden by
//! environment variables. Secrets are read from the environment only.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_AI_LANGUAGE: &str = "Romanian";
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub ai: AiConfig,
    pub mail: MailConfig,
    pub firebase_project_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub language: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Recipients used when a contact request names none
    pub default_recipients: Vec<String>,
}

impl MailConfig {
    pub fn is_configured(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: FileSection,
    #[serde(default)]
    production: FileSection,
}

#[derive(Debug, Default, Deserialize)]
struct FileSection {
    port: Option<u16>,
    database_path: Option<PathBuf>,
    firebase_project_id: Option<String>,
    #[serde(default)]
    ai: AiSection,
    #[serde(default)]
    mail: MailSection,
}

#[derive(Debug, Default, Deserialize)]
struct AiSection {
    model: Option<String>,
    base_url: Option<String>,
    language: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct MailSection {
    smtp_host: Option<String>,
    smtp_port: Option<u16>,
}

impl ConfigManager {
    /// Load from `config.yaml` in the working directory (if present) and the process environment
    pub fn load() -> Result<Self> {
        let config_path = Path::new("config.yaml");
        let yaml = if config_path.exists() {
            Some(std::fs::read_to_string(config_path).context("Failed to read config.yaml")?)
        } else {
            warn!("config.yaml not found, using defaults and environment");
            None
        };

        let config = Self::from_sources(yaml.as_deref(), |key| std::env::var(key).ok())?;
        info!(
            "Loaded configuration for environment: {} (port {})",
            config.environment, config.port
        );
        Ok(config)
    }

    pub fn from_sources<F>(yaml: Option<&str>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let environment = var("INTERNSTUD_ENV")
            .or_else(|| var("ENVIRONMENT"))
            .unwrap_or_else(|| "local".to_string());

        let file: ConfigFile = match yaml {
            Some(content) => serde_yaml::from_str(content).context("Failed to parse config.yaml")?,
            None => ConfigFile::default(),
        };
        let section = match environment.as_str() {
            "production" => file.production,
            _ => file.local,
        };

        let port = match var("ROCKET_PORT").or_else(|| var("PORT")) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid port: {}", raw))?,
            None => section.port.unwrap_or(DEFAULT_PORT),
        };

        let database_path = var("DATABASE_PATH")
            .map(PathBuf::from)
            .or(section.database_path)
            .unwrap_or_else(|| PathBuf::from("internstud.db"));

        let ai = AiConfig {
            api_key: var("GEMINI_API_KEY"),
            model: var("GEMINI_MODEL")
                .or(section.ai.model)
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: var("GEMINI_API_URL")
                .or(section.ai.base_url)
                .unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string()),
            language: var("AI_LANGUAGE")
                .or(section.ai.language)
                .unwrap_or_else(|| DEFAULT_AI_LANGUAGE.to_string()),
            timeout_seconds: section.ai.timeout_seconds.unwrap_or(120),
        };

        let smtp_port = match var("SMTP_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid SMTP port: {}", raw))?,
            None => section.mail.smtp_port.unwrap_or(DEFAULT_SMTP_PORT),
        };
        let username = var("EMAIL_USER");
        let default_recipients = username
            .iter()
            .cloned()
            .chain(var("EMAIL_USER1"))
            .collect();
        let mail = MailConfig {
            smtp_host: var("SMTP_HOST")
                .or(section.mail.smtp_host)
                .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port,
            username,
            password: var("EMAIL_PASSWORD"),
            default_recipients,
        };

        Ok(Self {
            environment,
            port,
            database_path,
            ai,
            mail,
            firebase_project_id: var("FIREBASE_PROJECT_ID").or(section.firebase_project_id),
        })
    }

    /// Ensure the database parent directory exists
    pub async fn ensure_directories(&self) -> Result<()> {
        if let Some(parent) = self
            .database_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        Ok(())
    }
}
