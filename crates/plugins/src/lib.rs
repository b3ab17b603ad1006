pub mod contract;
pub mod identity;
pub mod update;

pub use {
    contract::Plugin,
    identity::PluginIdentity,
    update::{UpdateRequest, UpdateScheduler},
};
