//! Configuration loading for the settlement engine.
//!
//! Legislation values that change over time, such as the national minimum
//! wage, are kept out of the code and loaded from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use settlement_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/clt").unwrap();
//! println!("Loaded legislation: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{LegislationConfig, LegislationMetadata, MinimumWage};
