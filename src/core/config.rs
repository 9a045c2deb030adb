//! Conversion settings, optionally loaded from a JSON file.
//!
//! Every key has a default, so an empty object (or no file at all) converts
//! a libphutil checkout into `Facebook\Libphutil`.

use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;

use crate::convert::Namespace;
use crate::error::{Error, Result};
use crate::utils::io;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Namespace root, backslash separated, e.g. `Facebook\Libphutil`.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Sub-namespace holding one container class per function file.
    #[serde(default = "default_functions_segment")]
    pub functions_segment: String,

    /// Directory names skipped at any depth.
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Glob matched against file names.
    #[serde(default = "default_include")]
    pub include: String,

    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,

    /// Names appended to the built-in class table.
    #[serde(default)]
    pub extra_builtins: Vec<String>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            functions_segment: default_functions_segment(),
            exclude_dirs: default_exclude_dirs(),
            include: default_include(),
            manifest_file: default_manifest_file(),
            extra_builtins: Vec::new(),
        }
    }
}

fn default_namespace() -> String {
    "Facebook\\Libphutil".to_string()
}

fn default_functions_segment() -> String {
    "Functions".to_string()
}

fn default_exclude_dirs() -> Vec<String> {
    vec!["__tests__".to_string()]
}

fn default_include() -> String {
    "*.php".to_string()
}

fn default_manifest_file() -> String {
    "function_mapping.txt".to_string()
}

const IDENTIFIER: &str = r"[A-Za-z_][A-Za-z0-9_]*";

impl ConvertConfig {
    /// Accepts `\Foo\Bar\` style input and stores `Foo\Bar`.
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.trim_matches('\\').to_string();
        self
    }

    pub fn validate(&self) -> Result<()> {
        let namespace_re = Regex::new(&format!(r"^{id}(\\{id})*$", id = IDENTIFIER))
            .map_err(|e| Error::internal_unexpected(e.to_string()))?;
        if !namespace_re.is_match(&self.namespace) {
            return Err(Error::config_invalid_value(
                "namespace",
                Some(self.namespace.clone()),
                "Expected backslash-separated PHP identifiers, e.g. Vendor\\Package",
            ));
        }

        let segment_re = Regex::new(&format!("^{}$", IDENTIFIER))
            .map_err(|e| Error::internal_unexpected(e.to_string()))?;
        if !segment_re.is_match(&self.functions_segment) {
            return Err(Error::config_invalid_value(
                "functions_segment",
                Some(self.functions_segment.clone()),
                "Expected a single PHP identifier",
            ));
        }

        if self.include.trim().is_empty() {
            return Err(Error::config_invalid_value(
                "include",
                None,
                "Include pattern cannot be empty",
            ));
        }

        let manifest = Path::new(&self.manifest_file);
        if self.manifest_file.is_empty() || manifest.components().count() != 1 {
            return Err(Error::config_invalid_value(
                "manifest_file",
                Some(self.manifest_file.clone()),
                "Expected a plain file name",
            ));
        }

        Ok(())
    }

    pub fn namespace(&self) -> Namespace {
        Namespace::new(self.namespace.clone(), self.functions_segment.clone())
    }
}

/// Parse JSON string into typed value.
pub(crate) fn from_str<T: DeserializeOwned>(s: &str, context: &str) -> Result<T> {
    serde_json::from_str(s).map_err(|e| Error::validation_invalid_json(e, Some(context.to_string())))
}

/// Load settings from `path`, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<ConvertConfig> {
    let Some(path) = path else {
        return Ok(ConvertConfig::default());
    };

    if !path.is_file() {
        return Err(Error::validation_invalid_argument(
            "config",
            format!("Config file '{}' not found", path.display()),
        ));
    }

    let content = io::read_file(path, &format!("read {}", path.display()))?;
    from_str(&content, &format!("parse {}", path.display()))
}
