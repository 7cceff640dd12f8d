//! Client configuration from the environment.

use std::path::PathBuf;

use anyhow::Context;

use crate::storage::FileStorage;

const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Runtime configuration for the session layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the identity/API service.
    pub api_url: String,
    /// Location of the persisted session fields.
    pub storage_path: PathBuf,
}

impl ClientConfig {
    /// Read `COMPLIANCEHUB_API_URL` and `COMPLIANCEHUB_STORAGE_PATH`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (blank values count as unset).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = var("COMPLIANCEHUB_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let storage_path = match var("COMPLIANCEHUB_STORAGE_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_storage_path()
                .context("failed to determine session storage path - set COMPLIANCEHUB_STORAGE_PATH")?,
        };

        Ok(Self {
            api_url,
            storage_path,
        })
    }

    pub fn open_storage(&self) -> FileStorage {
        FileStorage::new(self.storage_path.clone())
    }
}

fn default_storage_path() -> Option<PathBuf> {
    Some(dirs::data_dir()?.join("compliancehub").join("session.json"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn explicit_values_win() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("COMPLIANCEHUB_API_URL", "https://api.compliancehub.ng/"),
            ("COMPLIANCEHUB_STORAGE_PATH", "/tmp/ch/session.json"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://api.compliancehub.ng");
        assert_eq!(config.storage_path, PathBuf::from("/tmp/ch/session.json"));
        assert_eq!(config.open_storage().path(), config.storage_path.as_path());
    }

    #[test]
    fn blank_api_url_falls_back_to_default() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("COMPLIANCEHUB_API_URL", "  "),
            ("COMPLIANCEHUB_STORAGE_PATH", "/tmp/ch/session.json"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }
}
