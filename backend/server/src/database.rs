//! # Flat Files
//!
//! Reviews and orders are appended to JSON arrays on disk.
//!
//! ## Implementation
//!
//! - Read the whole array, push, write the whole array back
//! - One async mutex serializes every write so two requests never interleave
//!   a read-modify-write on the same file
//! - A missing file is an empty array
//! - A file that no longer parses is left alone and the write fails, rather
//!   than overwriting whatever is there
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use menu::{LineItem, Price, Review};
use serde::Serialize;
use serde_json::Value;
use tokio::{fs, sync::Mutex};

use crate::error::AppError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReview {
    #[serde(flatten)]
    pub review: Review,
    pub received_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredOrder {
    pub items: Vec<LineItem>,
    pub total: Price,
    pub received_at: DateTime<Utc>,
}

pub struct FlatFiles {
    reviews_path: PathBuf,
    orders_path: PathBuf,
    write_lock: Mutex<()>,
}

impl FlatFiles {
    pub fn new(reviews_path: PathBuf, orders_path: PathBuf) -> Self {
        Self {
            reviews_path,
            orders_path,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn append_review(&self, review: Review) -> Result<usize, AppError> {
        let record = StoredReview {
            review,
            received_at: Utc::now(),
        };

        self.append(&self.reviews_path, &record).await
    }

    pub async fn append_order(&self, items: Vec<LineItem>) -> Result<usize, AppError> {
        let record = StoredOrder {
            total: menu::order_total(&items),
            items,
            received_at: Utc::now(),
        };

        self.append(&self.orders_path, &record).await
    }

    /// Returns how many records the file holds afterwards.
    async fn append<T: Serialize>(&self, path: &Path, record: &T) -> Result<usize, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut records = read_records(path).await?;
        records.push(serde_json::to_value(record).map_err(json_error(path))?);

        let data = serde_json::to_vec_pretty(&records).map_err(json_error(path))?;
        fs::write(path, data).await?;

        Ok(records.len())
    }
}

pub async fn read_records(path: &Path) -> Result<Vec<Value>, AppError> {
    match fs::read(path).await {
        Ok(data) => serde_json::from_slice(&data).map_err(json_error(path)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

fn json_error(path: &Path) -> impl FnOnce(serde_json::Error) -> AppError + '_ {
    move |source| {
        AppError::Data(menu::DataError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}
