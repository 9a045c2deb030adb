use std::path::PathBuf;

/// Target namespace root plus the sub-segment that holds function containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    root: String,
    functions_segment: String,
}

impl Namespace {
    /// `root` is written without leading or trailing backslashes,
    /// e.g. `Facebook\Libphutil`.
    pub fn new(root: impl Into<String>, functions_segment: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            functions_segment: functions_segment.into(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn functions_segment(&self) -> &str {
        &self.functions_segment
    }

    /// Namespace of the generated function containers.
    pub fn functions_namespace(&self) -> String {
        format!("{}\\{}", self.root, self.functions_segment)
    }

    /// `\Root\Name`
    pub fn qualify_class(&self, name: &str) -> String {
        format!("\\{}\\{}", self.root, name)
    }

    /// `\Root\Functions\Container::name`
    pub fn qualify_function(&self, container: &str, name: &str) -> String {
        format!("\\{}\\{}::{}", self.functions_namespace(), container, name)
    }

    /// Relative directory the namespace maps to, one component per segment.
    pub fn relative_dir(&self) -> PathBuf {
        self.root.split('\\').collect()
    }
}
