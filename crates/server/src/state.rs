use std::sync::Arc;

use bookshelf_core::{Catalog, Config};

/// Shared application state
///
/// The catalog is built once at startup and handed in here; handlers never
/// construct their own.
pub struct AppState {
    config: Config,
    catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(config: Config, catalog: Arc<Catalog>) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog.as_ref()
    }
}
