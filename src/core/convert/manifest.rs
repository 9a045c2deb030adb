//! Function manifest: where every former free function now lives.

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::utils::io;

const LEADER: &str = " ....................... ";

/// One extracted function and its rewritten reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionManifestEntry {
    pub function: String,
    /// Base name of the file that declared it, which is also its container.
    pub file: String,
    pub qualified: String,
}

impl FunctionManifestEntry {
    pub fn to_line(&self) -> String {
        format!("{}(){}{}", self.function, LEADER, self.qualified)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FunctionManifest {
    entries: Vec<FunctionManifestEntry>,
}

impl FunctionManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = FunctionManifestEntry>) {
        self.entries.extend(entries);
    }

    pub fn entries(&self) -> &[FunctionManifestEntry] {
        &self.entries
    }

    /// One line per function, each newline-terminated.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}\n", e.to_line()))
            .collect()
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        io::write_file(path, &self.render(), &format!("write {}", path.display()))
    }
}
