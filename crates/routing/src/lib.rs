pub mod ban;
pub mod dispatcher;
pub mod router;
pub mod runner;

pub use {
    ban::{BanCommandProcessor, BanOutcome},
    dispatcher::MessageDispatcher,
    router::{ContentClass, classify, dispatch},
    runner::PluginRunner,
};
