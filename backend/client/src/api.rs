//! # Loader
//!
//! One entry point for everything the shop reads from or sends to the server.
//! Whether the server calls the menu `/menu` or `/products`, and whether it
//! answers with categories or a flat list, stops here: callers always get a
//! flattened [`Menu`].
use menu::{CustomizationCatalog, LineItem, Menu, MenuItem, Review};
use reqwest::{Client, Response, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::{config::MenuEndpoint, error::ClientError};

#[derive(Debug, Clone)]
pub struct Api {
    client: Client,
    base: Url,
    menu_endpoint: MenuEndpoint,
}

impl Api {
    pub fn new(base_url: &str, menu_endpoint: MenuEndpoint) -> Result<Self, ClientError> {
        let base = Url::parse(base_url).map_err(|_| ClientError::InvalidUrl(base_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            client: Client::new(),
            base,
            menu_endpoint,
        })
    }

    pub const fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        url
    }

    pub async fn fetch_menu(&self) -> Result<Menu, ClientError> {
        self.get_json(&[self.menu_endpoint.path()], "menu").await
    }

    pub async fn fetch_category(&self, category: &str) -> Result<Vec<MenuItem>, ClientError> {
        self.get_json(&[self.menu_endpoint.path(), category], "category")
            .await
    }

    pub async fn fetch_catalog(&self) -> Result<CustomizationCatalog, ClientError> {
        self.get_json(&["customizations"], "customizations").await
    }

    pub async fn post_review(&self, review: &Review) -> Result<(), ClientError> {
        self.post_json(&["reviews"], review, "review").await
    }

    pub async fn post_order(&self, items: &[LineItem]) -> Result<(), ClientError> {
        self.post_json(&["cart"], items, "order").await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        what: &'static str,
    ) -> Result<T, ClientError> {
        let load_error = |reason: String| ClientError::Load { what, reason };

        let response = self
            .client
            .get(self.url(segments))
            .send()
            .await
            .map_err(|e| load_error(e.to_string()))?;
        let response = ensure_success(response).await.map_err(load_error)?;

        response.json().await.map_err(|e| load_error(e.to_string()))
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &T,
        what: &'static str,
    ) -> Result<(), ClientError> {
        let submission_error = |reason: String| ClientError::Submission { what, reason };

        let response = self
            .client
            .post(self.url(segments))
            .json(body)
            .send()
            .await
            .map_err(|e| submission_error(e.to_string()))?;
        ensure_success(response).await.map_err(submission_error)?;

        Ok(())
    }
}

/// Non-2xx replies become an error carrying the status and the plain-text body.
async fn ensure_success(response: Response) -> Result<Response, String> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(format!("HTTP {status}: {body}"))
}
