//! Generic utility primitives with zero domain knowledge.
//!
//! - `io` - File I/O with consistent error handling
//! - `paths` - Command-line path expansion

pub mod io;
pub mod paths;
