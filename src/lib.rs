pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::CompassConfig;

pub use crate::adapters::{FileStore, GeminiProvider, MemoryStore};
pub use crate::core::compass::Compass;
pub use crate::core::coordinator::SelectionCoordinator;
pub use crate::core::layout::RadialLayout;
pub use crate::core::{Outcome, Phase};
pub use crate::utils::error::{CompassError, Result};
