//! Configuration schema types for Argus.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod ai;
mod system;

pub use ai::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Argus.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgusConfig {
    pub ai: AiSection,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}
