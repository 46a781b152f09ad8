/// Application settings loaded from `stock-keeper.toml`
pub mod app;

/// Initial stock listed in the configuration file
pub mod products;

pub use app::{
    AppConfig, DEFAULT_LOG_LEVEL, DisplayConfig, load_app_configuration, load_config,
};
pub use products::{ProductSeed, seed_inventory};
