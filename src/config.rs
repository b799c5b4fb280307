use crate::models::Language;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend API, without a trailing slash
    pub api_base_url: String,
    /// File backing local storage (holds the access token)
    pub storage_path: PathBuf,
    /// Image file the console camera returns as its snapshot
    pub camera_snapshot_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub default_language: Language,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_BASE_URL")
            .unwrap_or_else(|| "http://localhost:5000/api".to_string())
            .trim_end_matches('/')
            .to_string();

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "API_BASE_URL must be an http(s) URL, got '{}'",
                api_base_url
            ));
        }

        let storage_path = match lookup("STORAGE_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_storage_path(),
        };

        let default_language = match lookup("DEFAULT_LANGUAGE") {
            Some(lang) => lang
                .parse()
                .map_err(|e: String| anyhow::anyhow!("DEFAULT_LANGUAGE: {}", e))?,
            None => Language::default(),
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Config {
            api_base_url,
            storage_path,
            camera_snapshot_path: lookup("CAMERA_SNAPSHOT_PATH").map(PathBuf::from),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            default_language,
            log_format,
        })
    }
}

fn default_storage_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("moodlist"))
        .unwrap_or_else(|| PathBuf::from("./moodlist_data"))
        .join("local_storage.json")
}
