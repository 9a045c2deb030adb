//! Whole-tree conversion.
//!
//! wipe target → copy classified files → build the global map → rewrite the
//! copies in place → write the manifest. Single pass, no rollback: a failed
//! run leaves a partial target tree and is fixed by re-running.

use std::fmt;
use std::path::{Path, PathBuf};

use glob_match::glob_match;
use serde::Serialize;

use super::builtins::{builtin_names, BUILTINS_VERSION};
use super::extract::{extract, Classification};
use super::manifest::{FunctionManifest, FunctionManifestEntry};
use super::rewrite;
use super::substitution::SubstitutionMapBuilder;
use crate::config::ConvertConfig;
use crate::error::{Error, Result};
use crate::utils::io;

/// Progress notifications, rendered as the CLI's console lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    DirectoryCleaned,
    Skipped(String),
    Copied(usize),
    ReplacementStarted(usize),
    Done,
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::DirectoryCleaned => write!(f, "Directory cleaned."),
            ProgressEvent::Skipped(path) => write!(f, "Skipping {}", path),
            ProgressEvent::Copied(count) => write!(f, "{} files copied to new location.", count),
            ProgressEvent::ReplacementStarted(count) => {
                write!(f, "Starting replacement of {} strings.", count)
            }
            ProgressEvent::Done => write!(f, "Done."),
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub namespace: String,
    /// Directory the namespace maps to inside the target tree.
    pub namespace_dir: String,
    pub class_files: Vec<String>,
    pub function_files: Vec<String>,
    /// Source-relative paths of files with no declarations.
    pub skipped: Vec<String>,
    pub copied: usize,
    pub substitutions: usize,
    /// PHP release the built-in class table was taken from.
    pub builtins_version: String,
    pub functions: Vec<FunctionManifestEntry>,
    pub manifest_path: String,
}

/// Convert `<source>/src` into `<target>/src/<Namespace path>`.
pub fn convert(
    source: &Path,
    target: &Path,
    config: &ConvertConfig,
    mut on_progress: impl FnMut(&ProgressEvent),
) -> Result<ConversionReport> {
    config.validate()?;
    let namespace = config.namespace();

    let source_src = source.join("src");
    if !source_src.is_dir() {
        return Err(Error::source_not_found(source_src.to_string_lossy()));
    }

    let target_src = target.join("src");
    io::remove_dir_all(&target_src)?;
    let namespace_dir = target_src.join(namespace.relative_dir());
    io::create_dir_all(&namespace_dir)?;
    on_progress(&ProgressEvent::DirectoryCleaned);

    let files = walk_source_files(&source_src, config)?;
    log_status!("convert", "Found {} candidate files", files.len());

    let mut builder = SubstitutionMapBuilder::new(&namespace);
    builder.add_builtins(builtin_names(&config.extra_builtins));

    let mut class_files: Vec<PathBuf> = Vec::new();
    let mut function_files: Vec<PathBuf> = Vec::new();
    let mut skipped = Vec::new();
    let mut manifest = FunctionManifest::new();

    for path in &files {
        let relative = path
            .strip_prefix(&source_src)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let container = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let (contents, _) = io::read_text(path, &format!("read {}", path.display()))?;
        let extraction = extract(&contents);

        match extraction.classification() {
            Classification::ClassBearing => {
                let destination = namespace_dir.join(file_name);
                io::copy_file(path, &destination)?;
                if let Some(class) = &extraction.class_like {
                    log_status!("convert", "{} declares {} {}", relative, class.kind.keyword(), class.name);
                    builder.add_class_like(class);
                }
                push_unique(&mut class_files, destination);
            }
            Classification::FunctionBearing => {
                let destination = namespace_dir
                    .join(namespace.functions_segment())
                    .join(file_name);
                io::copy_file(path, &destination)?;
                log_status!(
                    "convert",
                    "{} declares {} function(s)",
                    relative,
                    extraction.functions.len()
                );
                manifest.extend(builder.add_functions(&container, &extraction.functions));
                push_unique(&mut function_files, destination);
            }
            Classification::Unclassified => {
                on_progress(&ProgressEvent::Skipped(relative.clone()));
                skipped.push(relative);
            }
        }
    }

    let copied = class_files.len() + function_files.len();
    on_progress(&ProgressEvent::Copied(copied));

    let map = builder.build();
    on_progress(&ProgressEvent::ReplacementStarted(map.len()));

    for file in &function_files {
        rewrite::rewrite_function_file(file, &map, &namespace)?;
    }
    for file in &class_files {
        rewrite::rewrite_class_file(file, &map, &namespace)?;
    }

    let manifest_path = target_src.join(&config.manifest_file);
    manifest.write(&manifest_path)?;
    log_status!("convert", "Wrote {} manifest lines to {}", manifest.entries().len(), manifest_path.display());
    on_progress(&ProgressEvent::Done);

    Ok(ConversionReport {
        namespace: namespace.root().to_string(),
        namespace_dir: namespace_dir.to_string_lossy().to_string(),
        class_files: display_paths(&class_files),
        function_files: display_paths(&function_files),
        skipped,
        copied,
        substitutions: map.len(),
        builtins_version: BUILTINS_VERSION.to_string(),
        functions: manifest.entries().to_vec(),
        manifest_path: manifest_path.to_string_lossy().to_string(),
    })
}

/// Same-named files from different source directories land on one flat
/// destination; each destination is rewritten once.
fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn display_paths(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.to_string_lossy().to_string())
        .collect()
}

/// Files under `root` whose names match the include glob, skipping excluded
/// directory names at any depth. Sorted by name at every level so the
/// last-write-wins order of the map is reproducible.
pub fn walk_source_files(root: &Path, config: &ConvertConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk_recursive(root, config, &mut files)?;
    Ok(files)
}

fn walk_recursive(dir: &Path, config: &ConvertConfig, files: &mut Vec<PathBuf>) -> Result<()> {
    let read_error =
        |e: std::io::Error| Error::internal_io(e.to_string(), Some(format!("read dir {}", dir.display())));

    let mut entries = std::fs::read_dir(dir)
        .map_err(read_error)?
        .map(|entry| -> std::io::Result<(PathBuf, std::fs::FileType)> {
            let entry = entry?;
            Ok((entry.path(), entry.file_type()?))
        })
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(read_error)?;
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (path, file_type) in entries {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if file_type.is_dir() {
            if config.exclude_dirs.iter().any(|d| d == &name) {
                continue;
            }
            walk_recursive(&path, config, files)?;
        } else if file_type.is_symlink() && path.is_dir() {
            // Never followed: a link back up the tree would recurse forever.
            log_status!("convert", "Not following symlinked directory {}", path.display());
        } else if path.is_file() && glob_match(&config.include, &name) {
            files.push(path);
        }
    }

    Ok(())
}
