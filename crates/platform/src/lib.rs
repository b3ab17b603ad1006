pub mod client;
pub mod error;
pub mod types;

pub use {
    client::{PlatformClient, SessionFactory},
    error::{Error, Result},
    types::{ContentItem, InboundMessage, TokenGrant, TokenRefresh},
};
