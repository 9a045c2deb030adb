//! Text rewriting: substitution plus the per-file prologue transforms.

use std::path::Path;

use super::namespace::Namespace;
use super::substitution::SubstitutionMap;
use crate::error::Result;
use crate::utils::io;

const OPEN_TAG: &str = "<?php";

/// Apply every entry in order, each one to the output of the previous.
/// Each entry is a plain, case-sensitive, non-overlapping replace.
pub fn substitute(text: &str, map: &SubstitutionMap) -> String {
    let mut text = text.to_string();
    for (pattern, replacement) in map.iter() {
        if text.contains(pattern) {
            text = text.replace(pattern, replacement);
        }
    }
    text
}

/// Shift every line after the first right by two spaces.
pub fn indent(text: &str) -> String {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("  {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Open the functions namespace and a container class named after the file.
pub fn wrap_in_container(text: &str, namespace: &Namespace, container: &str) -> String {
    let header = format!(
        "{}\n\nnamespace {};\n\nclass {} {{",
        OPEN_TAG,
        namespace.functions_namespace(),
        container
    );
    let mut wrapped = text.replace(OPEN_TAG, &header);
    wrapped.push_str("\n}\n");
    wrapped
}

pub fn insert_namespace_declaration(text: &str, namespace: &Namespace) -> String {
    text.replace(
        OPEN_TAG,
        &format!("{}\n\nnamespace {};", OPEN_TAG, namespace.root()),
    )
}

pub fn rewrite_function_source(
    text: &str,
    map: &SubstitutionMap,
    namespace: &Namespace,
    container: &str,
) -> String {
    let text = substitute(text, map);
    let text = indent(&text);
    wrap_in_container(&text, namespace, container)
}

pub fn rewrite_class_source(text: &str, map: &SubstitutionMap, namespace: &Namespace) -> String {
    let text = substitute(text, map);
    insert_namespace_declaration(&text, namespace)
}

/// Rewrite an already-copied function file where it lies.
pub fn rewrite_function_file(
    path: &Path,
    map: &SubstitutionMap,
    namespace: &Namespace,
) -> Result<()> {
    let container = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let (contents, encoding) = io::read_text(path, &format!("read {}", path.display()))?;
    let rewritten = rewrite_function_source(&contents, map, namespace, &container);
    io::write_text(path, &rewritten, encoding, &format!("write {}", path.display()))
}

/// Rewrite an already-copied class file where it lies.
pub fn rewrite_class_file(path: &Path, map: &SubstitutionMap, namespace: &Namespace) -> Result<()> {
    let (contents, encoding) = io::read_text(path, &format!("read {}", path.display()))?;
    let rewritten = rewrite_class_source(&contents, map, namespace);
    io::write_text(path, &rewritten, encoding, &format!("write {}", path.display()))
}
