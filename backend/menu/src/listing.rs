//! # Menu Listing
//!
//! The menu arrives in one of two shapes depending on which front end the data
//! was written for:
//!
//! - an object keyed by category, each value an ordered list of items
//! - a plain array of items, each carrying its own `category`
//!
//! Both collapse into one flattened [`Menu`] that keeps category order, then
//! item order within a category. With `serde_json`'s `preserve_order` the
//! object keys come back in file order. A flat list that interleaves
//! categories is gathered under each category's first appearance, and items
//! without a category go under [`UNCATEGORIZED`].
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::Error as _,
    ser::SerializeMap,
};
use serde_json::{Map, Value};

use crate::{models::MenuItem, utils::same_category};

pub const UNCATEGORIZED: &str = "Other";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        let mut groups: Vec<(String, Vec<MenuItem>)> = Vec::new();

        for mut item in items {
            if item.category.is_empty() {
                item.category = UNCATEGORIZED.to_string();
            }

            match groups.iter_mut().find(|(category, _)| *category == item.category) {
                Some((_, group)) => group.push(item),
                None => groups.push((item.category.clone(), vec![item])),
            }
        }

        Self::from_categories(groups)
    }

    pub fn from_categories<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<MenuItem>)>,
    {
        let items = categories
            .into_iter()
            .flat_map(|(category, items)| {
                items.into_iter().map(move |mut item| {
                    item.category = category.clone();
                    item
                })
            })
            .collect();

        Self { items }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Category names in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for item in &self.items {
            if !names.contains(&item.category.as_str()) {
                names.push(&item.category);
            }
        }

        names
    }

    /// `None` when no category matches, as opposed to a known but empty one.
    pub fn category(&self, name: &str) -> Option<Vec<&MenuItem>> {
        let known = self
            .categories()
            .into_iter()
            .any(|category| same_category(category, name));

        if !known {
            return None;
        }

        Some(
            self.items
                .iter()
                .filter(|item| same_category(&item.category, name))
                .collect(),
        )
    }

    pub fn find(&self, key: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.answers_to(key))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MenuDocument {
    Flat(Vec<MenuItem>),
    Grouped(Map<String, Value>),
}

impl<'de> Deserialize<'de> for Menu {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match MenuDocument::deserialize(deserializer)? {
            MenuDocument::Flat(items) => Ok(Self::new(items)),
            MenuDocument::Grouped(map) => {
                let mut categories = Vec::with_capacity(map.len());
                for (category, value) in map {
                    let items: Vec<MenuItem> = serde_json::from_value(value).map_err(|e| {
                        D::Error::custom(format!("category {category:?}: {e}"))
                    })?;
                    categories.push((category, items));
                }

                Ok(Self::from_categories(categories))
            }
        }
    }
}

impl Serialize for Menu {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let categories = self.categories();
        let mut map = serializer.serialize_map(Some(categories.len()))?;

        for category in categories {
            let items: Vec<&MenuItem> = self
                .items
                .iter()
                .filter(|item| item.category == category)
                .collect();
            map.serialize_entry(category, &items)?;
        }

        map.end()
    }
}
