use std::{
    env,
    fmt::Display,
    path::{Path, PathBuf},
    str::FromStr,
};

use tracing::{info, warn};

use crate::error::AppError;

pub const MENU_FILE: &str = "menu.json";
pub const CUSTOMIZATIONS_FILE: &str = "customizations.json";
pub const REVIEWS_FILE: &str = "reviews.json";
pub const ORDERS_FILE: &str = "orders.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Ok(Self {
            port: try_load("RUST_PORT", "8000")?,
            data_dir: try_load("DATA_DIR", "data")?,
            public_dir: try_load("PUBLIC_DIR", "public")?,
        })
    }

    /// Config rooted at one directory, used when embedding the server.
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();

        Self {
            port: 0,
            public_dir: data_dir.join("public"),
            data_dir,
        }
    }

    pub fn menu_path(&self) -> PathBuf {
        self.data_dir.join(MENU_FILE)
    }

    pub fn customizations_path(&self) -> PathBuf {
        self.data_dir.join(CUSTOMIZATIONS_FILE)
    }

    pub fn reviews_path(&self) -> PathBuf {
        self.data_dir.join(REVIEWS_FILE)
    }

    pub fn orders_path(&self) -> PathBuf {
        self.data_dir.join(ORDERS_FILE)
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, AppError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            AppError::Config(format!("{key}: {e}"))
        })
}
