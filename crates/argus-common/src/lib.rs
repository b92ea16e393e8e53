//! Types shared by every Argus crate: the error hierarchy and identifiers.

pub mod errors;
pub mod id;

pub use errors::{ArgusError, ConfigError};
pub use id::SessionId;

pub type Result<T> = std::result::Result<T, ArgusError>;
