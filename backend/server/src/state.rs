use std::sync::Arc;

use menu::{CustomizationCatalog, DataError, Menu, get_catalog, get_menu};
use tracing::{error, info};

use super::{config::Config, database::FlatFiles};

pub struct AppState {
    pub config: Config,
    pub menu: Menu,
    pub catalog: CustomizationCatalog,
    pub files: FlatFiles,
}

impl AppState {
    /// Missing or malformed data files leave the matching document empty so the
    /// rest of the shop keeps serving.
    pub fn new(config: Config) -> Arc<Self> {
        let menu = load_or_default(get_menu(config.menu_path()), "menu");
        let catalog = load_or_default(get_catalog(config.customizations_path()), "customizations");

        info!(
            "Loaded {} menu items across {} categories, {} toppings",
            menu.len(),
            menu.categories().len(),
            catalog.toppings.len()
        );

        let files = FlatFiles::new(config.reviews_path(), config.orders_path());

        Arc::new(Self {
            config,
            menu,
            catalog,
            files,
        })
    }
}

fn load_or_default<T: Default>(result: Result<T, DataError>, what: &str) -> T {
    result.unwrap_or_else(|e| {
        error!("Failed to load {what}: {e}");
        T::default()
    })
}
