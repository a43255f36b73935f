//! Configuration types
//!
//! Tuning parameters, motor hardware configuration and (with the `serde`
//! feature) postcard persistence of the drive configuration.

pub mod error;
pub mod hardware;
#[cfg(feature = "serde")]
pub mod store;
pub mod types;

pub use error::ConfigError;
pub use hardware::*;
#[cfg(feature = "serde")]
pub use store::*;
pub use types::*;
