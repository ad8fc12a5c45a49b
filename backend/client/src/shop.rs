//! # Shop
//!
//! Application state for one shopper, passed explicitly instead of living in
//! module globals.
//!
//! ## Ownership
//! - [`Paginator`] owns the page cursor
//! - [`Cart`] owns the line items and their persistence
//! - [`CustomizationSession`] owns the item being configured
//! - [`Submitter`] owns the per-target request state
//!
//! ## Flow
//! - Bind the view, load menu and catalog together, restore the cart
//! - Render the cart and the first page of the menu
//! - Scroll to the bottom renders the next page
//! - Pick an item, choose options, submit: the priced line item lands in the cart
//! - Checkout posts the cart and only then clears what was sent
//! - A review is posted without holding the shop, then resets the form and
//!   shows a notice that [`Shop::tick`] hides again
use menu::{CustomizationCatalog, LineItem, Menu, Review, Size, ValidationError};
use tokio::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::{
    api::Api,
    cart::Cart,
    config::ClientConfig,
    error::ClientError,
    pagination::{Paginator, ScrollGuard, ScrollPosition},
    session::CustomizationSession,
    storage::Storage,
    submission::{PendingOrder, PendingReview, Submitter},
    view::{self, View},
};

pub struct Shop<S, V> {
    menu: Menu,
    catalog: Option<CustomizationCatalog>,
    paginator: Paginator,
    scroll: ScrollGuard,
    session: CustomizationSession,
    cart: Cart<S>,
    submitter: Submitter,
    notice_duration: Duration,
    notice_until: Option<Instant>,
    view: V,
}

impl<S: Storage, V: View> Shop<S, V> {
    /// Load failures degrade to an empty menu or a missing catalog; only an
    /// unbound view or an unusable base URL stop initialization.
    pub async fn init(config: &ClientConfig, storage: S, view: V) -> Result<Self, ClientError> {
        view::bind(&view)?;

        let api = Api::new(&config.api_base_url, config.menu_endpoint)?;
        info!("Loading shop from {}", api.base());

        let (menu, catalog) = tokio::join!(api.fetch_menu(), api.fetch_catalog());

        let menu = menu.unwrap_or_else(|e| {
            error!("{e}");
            Menu::default()
        });
        let catalog = catalog
            .map_err(|e| error!("{e}"))
            .ok();

        let mut shop = Self {
            menu,
            catalog,
            paginator: Paginator::new(config.page_size),
            scroll: ScrollGuard::default(),
            session: CustomizationSession::default(),
            cart: Cart::load_persisted(storage),
            submitter: Submitter::new(api),
            notice_duration: config.notice_duration,
            notice_until: None,
            view,
        };

        shop.view.render_cart(shop.cart.items());
        shop.render_next_page();

        Ok(shop)
    }

    pub const fn menu(&self) -> &Menu {
        &self.menu
    }

    pub const fn catalog(&self) -> Option<&CustomizationCatalog> {
        self.catalog.as_ref()
    }

    pub const fn cart(&self) -> &Cart<S> {
        &self.cart
    }

    pub const fn session(&self) -> &CustomizationSession {
        &self.session
    }

    pub const fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub const fn submitter(&self) -> &Submitter {
        &self.submitter
    }

    pub const fn view(&self) -> &V {
        &self.view
    }

    pub const fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Appends one more page to the view; returns how many items it held.
    pub fn render_next_page(&mut self) -> usize {
        let page = self.paginator.next_page(self.menu.items());
        debug!("Page {} holds {} items", self.paginator.cursor() - 1, page.len());

        if !page.is_empty() {
            self.view.append_menu_items(page);
        }

        page.len()
    }

    pub fn on_scroll(&mut self, position: ScrollPosition) -> usize {
        if self.scroll.should_fire(position) {
            self.render_next_page()
        } else {
            0
        }
    }

    /// Opens the customization surface for the item named `key`. Logs and
    /// returns `false` when the item is unknown or options have not loaded.
    pub fn open_customization(&mut self, key: &str) -> bool {
        let Some(item) = self.menu.find(key).cloned() else {
            warn!("No menu item named {key:?}");
            return false;
        };

        if self.session.open(item, self.catalog.as_ref()).is_err() {
            return false;
        }

        if let (Some(item), Some(catalog)) = (self.session.subject(), self.catalog.as_ref()) {
            self.view.show_customization(item, catalog);
        }

        true
    }

    pub fn close_customization(&mut self) {
        self.session.close();
        self.view.hide_customization();
    }

    /// Validates the choices against the catalog, prices the subject and adds
    /// it to the cart. On a bad choice the session stays open for another try.
    pub fn submit_customization<T: AsRef<str>>(
        &mut self,
        ice_level: &str,
        sugar_level: &str,
        toppings: &[T],
        size: Option<Size>,
    ) -> Result<LineItem, ClientError> {
        if !self.session.is_open() {
            error!("No item selected for customization.");
            return Err(ValidationError::NoSubject.into());
        }

        let catalog = self
            .catalog
            .as_ref()
            .ok_or(ValidationError::CatalogUnavailable)?;
        let selection = catalog
            .select(ice_level, sugar_level, toppings, size)
            .inspect_err(|e| warn!("{e}"))?;

        let line = self.session.submit(selection)?;
        info!("Added {line} to cart");

        self.cart.add(line.clone());
        self.view.hide_customization();
        self.view.render_cart(self.cart.items());

        Ok(line)
    }

    pub fn remove_from_cart(&mut self, index: usize) -> Result<LineItem, ClientError> {
        let removed = self
            .cart
            .remove_at(index)
            .inspect_err(|e| warn!("{e}"))?;

        self.view.render_cart(self.cart.items());
        Ok(removed)
    }

    /// Snapshots the cart into an order that does not borrow the shop, so
    /// scrolling and customizing keep working while it is in flight. Hand the
    /// result of [`PendingOrder::send`] to [`Shop::finish_checkout`].
    pub fn begin_checkout(&self) -> PendingOrder {
        PendingOrder::new(self.submitter.clone(), self.cart.items().to_vec())
    }

    /// Clears the submitted items only once the server has acknowledged them.
    pub fn finish_checkout(
        &mut self,
        outcome: Result<Vec<LineItem>, ClientError>,
    ) -> Result<(), ClientError> {
        let submitted = outcome.inspect_err(|e| error!("{e}"))?;

        if self.cart.items() == submitted.as_slice() {
            self.cart.clear();
        } else {
            self.cart.discard(&submitted);
        }

        self.view.render_cart(self.cart.items());
        Ok(())
    }

    pub async fn checkout(&mut self) -> Result<(), ClientError> {
        let outcome = self.begin_checkout().send().await;
        self.finish_checkout(outcome)
    }

    /// Like [`Shop::begin_checkout`], the returned review does not borrow the
    /// shop. Hand the result of [`PendingReview::send`] to [`Shop::finish_review`].
    pub fn begin_review(&self, review: Review) -> PendingReview {
        PendingReview::new(self.submitter.clone(), review)
    }

    /// Resets the form and shows the notice once the server has the review.
    pub fn finish_review(&mut self, outcome: Result<(), ClientError>) -> Result<(), ClientError> {
        outcome.inspect_err(|e| error!("Failed to post review: {e}"))?;

        self.view.reset_review_form();
        self.view.set_review_notice(true);
        self.notice_until = Some(Instant::now() + self.notice_duration);

        Ok(())
    }

    pub async fn submit_review(&mut self, review: &Review) -> Result<(), ClientError> {
        let outcome = self.begin_review(review.clone()).send().await;
        self.finish_review(outcome)
    }

    pub const fn review_notice_visible(&self) -> bool {
        self.notice_until.is_some()
    }

    /// Hides the review notice once its time is up. Call from the event loop.
    pub fn tick(&mut self) {
        let Some(deadline) = self.notice_until else {
            return;
        };

        if Instant::now() >= deadline {
            self.notice_until = None;
            self.view.set_review_notice(false);
        }
    }
}
