//! # Boba Menu
//!
//! Shared data model for the shop: what the server reads from its flat JSON
//! files and what the client fetches, customizes and keeps in its cart.
//!
//! ## Flat Files
//!
//! - `menu.json`: categories to ordered item lists (see [`listing`])
//! - `customizations.json`: ice levels, sugar levels, toppings with prices
//! - `reviews.json`, `orders.json`: append-only arrays written by the server
//!
//! ## Prices
//!
//! Decimal dollars on the wire, whole cents in memory. A line item's final price
//! is its base price plus the toppings it captured when it was customized.
use std::{fs, path::Path};

use serde::{Serialize, de::DeserializeOwned};

pub mod error;
pub mod listing;
pub mod models;
pub mod utils;

pub use error::{DataError, ValidationError};
pub use listing::{Menu, UNCATEGORIZED};
pub use models::{
    CustomizationCatalog, CustomizationSelection, LineItem, MenuItem, Price, Rating, Review, Size,
    ToppingOption, order_total,
};

pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, DataError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&data).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<(), DataError> {
    let path = path.as_ref();
    let data = serde_json::to_vec_pretty(value).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, data).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn get_menu(path: impl AsRef<Path>) -> Result<Menu, DataError> {
    read_json(path)
}

pub fn get_catalog(path: impl AsRef<Path>) -> Result<CustomizationCatalog, DataError> {
    read_json(path)
}
