use crate::error::Result;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;

/// String key/value storage persisted as one JSON object on disk.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let map = self.load().await?;
        Ok(map.get(key).and_then(|v| v.as_str()).map(str::to_string))
    }

    pub async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load().await?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.store(&map).await
    }

    pub async fn remove_item(&self, key: &str) -> Result<()> {
        let mut map = self.load().await?;
        if map.remove(key).is_some() {
            self.store(&map).await?;
        }
        Ok(())
    }

    async fn load(&self) -> Result<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => {
                tracing::warn!(
                    "Local storage at {} is not a JSON object ({}), starting fresh",
                    self.path.display(),
                    other
                );
                Ok(Map::new())
            }
            Err(e) => {
                tracing::warn!(
                    "Local storage at {} is unreadable ({}), starting fresh",
                    self.path.display(),
                    e
                );
                Ok(Map::new())
            }
        }
    }

    async fn store(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        // Write then rename so a crash never leaves a torn file behind.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(map)?).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
