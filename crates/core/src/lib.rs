pub mod book;
pub mod catalog;
pub mod config;
pub mod persistence;
pub mod testing;

pub use book::{Book, BookStatus, NewBook};
pub use catalog::{
    Catalog, CatalogError, CatalogStats, ReadingProgress, SortKey, StatsBreakdown,
    DEFAULT_LIBRARY_NAME,
};
pub use config::{
    load_config, load_config_from_str, load_env_config, validate_config, Config, ConfigError,
    LibraryConfig, ServerConfig,
};
pub use persistence::{
    library_file_name, CatalogStore, JsonFileStore, LibraryDocument, MemoryStore,
    PersistenceError,
};
