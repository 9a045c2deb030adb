// Public modules
pub mod config;
pub mod convert;
pub mod error;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
