//! Namespace conversion: move a flat PHP library under one namespace.
//!
//! Files are tokenized to find the class-like or the functions they declare.
//! Every declared name becomes a set of boundary-framed substitutions, and
//! those substitutions are applied to every copied file. Functions become
//! static members of one container class per source file.

pub mod builtins;
pub mod extract;
pub mod lexer;
pub mod manifest;
mod namespace;
pub mod pipeline;
pub mod rewrite;
pub mod substitution;

pub use extract::{extract, ClassLike, ClassLikeKind, Classification, Extraction};
pub use manifest::{FunctionManifest, FunctionManifestEntry};
pub use namespace::Namespace;
pub use pipeline::{convert, ConversionReport, ProgressEvent};
pub use substitution::{SubstitutionMap, SubstitutionMapBuilder};
