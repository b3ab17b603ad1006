pub mod error;
pub mod retry;

pub use {error::FromMessage, retry::RetryPolicy};
