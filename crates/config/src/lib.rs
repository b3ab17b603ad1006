pub mod error;
pub mod loader;
pub mod schema;
pub mod sink;

pub use {
    error::{Error, Result},
    loader::{config_dir, find_config_file, load_config, save_config},
    schema::{PluginConfig, RoverConfig},
    sink::FileTokenSink,
};
