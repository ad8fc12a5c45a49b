use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use clap::ValueEnum;
use serde::Deserialize;
use tracing::{error, info};

use crate::pagination::DEFAULT_PAGE_SIZE;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_STORAGE_DIR: &str = ".boba";
pub const REVIEW_NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Which path the server exposes the full menu under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MenuEndpoint {
    #[default]
    Menu,
    Products,
}

impl MenuEndpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Products => "products",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub menu_endpoint: MenuEndpoint,
    pub page_size: usize,
    pub storage_dir: PathBuf,
    pub notice_duration: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            menu_endpoint: MenuEndpoint::default(),
            page_size: DEFAULT_PAGE_SIZE,
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            notice_duration: REVIEW_NOTICE_DURATION,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    api_base_url: Option<String>,
    menu_endpoint: Option<MenuEndpoint>,
    page_size: Option<usize>,
}

impl ClientConfig {
    /// Defaults overridden by an optional `config.json`. An unreadable file is
    /// logged and the defaults stay.
    pub fn load(path: Option<&Path>) -> Self {
        let mut config = Self::default();

        let Some(path) = path else {
            return config;
        };

        match menu::read_json::<ConfigFile>(path) {
            Ok(file) => {
                if let Some(url) = file.api_base_url {
                    config.api_base_url = url;
                }
                if let Some(endpoint) = file.menu_endpoint {
                    config.menu_endpoint = endpoint;
                }
                if let Some(page_size) = file.page_size {
                    config.page_size = page_size;
                }
                info!("Loaded config from {}", path.display());
            }
            Err(e) => error!("Failed to load config: {e}"),
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = ClientConfig::load(None);

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.page_size, 6);
        assert_eq!(config.notice_duration, Duration::from_secs(3));
    }

    #[test]
    fn test_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"apiBaseUrl": "http://tea.local:9000", "menuEndpoint": "products"}"#,
        )
        .unwrap();

        let config = ClientConfig::load(Some(&path));

        assert_eq!(config.api_base_url, "http://tea.local:9000");
        assert_eq!(config.menu_endpoint, MenuEndpoint::Products);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_broken_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "apiBaseUrl=").unwrap();

        let config = ClientConfig::load(Some(&path));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }
}
