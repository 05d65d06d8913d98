pub mod auth;
pub mod context;
pub mod error;
pub mod events;
pub mod http;
pub mod provider;

pub use context::Context;
pub use error::PlatformError;
pub use error::Result;
pub use provider::PlatformProvider;
