//! Substitution map construction.
//!
//! A bare identifier cannot be replaced as a plain substring: `Foo` also
//! occurs in `FooBar` and in unrelated prose. Each symbol instead yields one
//! entry per (prefix, suffix) pair from fixed boundary sets, so only
//! occurrences framed by those characters are rewritten. Occurrences framed
//! by anything else are left alone.
//!
//! The map is insertion ordered. Re-inserting an existing pattern replaces
//! its replacement but keeps its original position, so when two symbols
//! produce the same pattern the last one processed wins.

use indexmap::IndexMap;

use super::extract::{ClassLike, ClassLikeKind};
use super::manifest::FunctionManifestEntry;
use super::namespace::Namespace;

/// Characters that can precede a class or function reference.
pub const PREFIXES: &[&str] = &["(", "{", "[", " ", ";", ".", "!", "'", "\""];

/// Characters that can follow a class reference.
pub const CLASS_SUFFIXES: &[&str] = &[" ", "\n", ";", "(", ")", "}", "]", ",", "::", "'", "\""];

/// A function reference is a call or a callable string.
pub const FUNCTION_SUFFIXES: &[&str] = &["(", " (", "'", "\""];

/// Ordered pattern → replacement pairs, applied top to bottom.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionMap {
    entries: IndexMap<String, String>,
}

impl SubstitutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Returns the replacement previously stored for
    /// `pattern`, if any.
    pub fn insert(&mut self, pattern: String, replacement: String) -> Option<String> {
        self.entries.insert(pattern, replacement)
    }

    pub fn get(&self, pattern: &str) -> Option<&str> {
        self.entries.get(pattern).map(String::as_str)
    }

    pub fn position(&self, pattern: &str) -> Option<usize> {
        self.entries.get_index_of(pattern)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Accumulates the global map across all files of a run.
pub struct SubstitutionMapBuilder<'a> {
    namespace: &'a Namespace,
    map: SubstitutionMap,
}

impl<'a> SubstitutionMapBuilder<'a> {
    pub fn new(namespace: &'a Namespace) -> Self {
        Self {
            namespace,
            map: SubstitutionMap::new(),
        }
    }

    /// Rewrite references to runtime classes to their global `\Name` form.
    pub fn add_builtins<'n>(&mut self, names: impl IntoIterator<Item = &'n str>) {
        let names: Vec<&str> = names.into_iter().collect();
        for suffix in CLASS_SUFFIXES {
            for prefix in PREFIXES {
                for name in &names {
                    self.map.insert(
                        format!("{prefix}{name}{suffix}"),
                        format!("{prefix}\\{name}{suffix}"),
                    );
                }
            }
        }
    }

    /// Qualify every reference to a library class-like, then restore the
    /// bare name at its own declaration site.
    pub fn add_class_like(&mut self, class: &ClassLike) {
        let name = &class.name;
        let qualified = self.namespace.qualify_class(name);

        for suffix in CLASS_SUFFIXES {
            for prefix in PREFIXES {
                self.map.insert(
                    format!("{prefix}{name}{suffix}"),
                    format!("{prefix}{qualified}{suffix}"),
                );
            }

            for kind in [ClassLikeKind::Class, ClassLikeKind::Interface, ClassLikeKind::Trait] {
                let keyword = kind.keyword();
                self.map.insert(
                    format!("{keyword} {qualified}{suffix}"),
                    format!("{keyword} {name}{suffix}"),
                );
            }
        }
    }

    /// Qualify every call to the functions of one file as static calls on
    /// the file's container, and turn their declarations into static
    /// methods. Returns the manifest lines for the file.
    pub fn add_functions(
        &mut self,
        container: &str,
        functions: &[String],
    ) -> Vec<FunctionManifestEntry> {
        let mut entries = Vec::with_capacity(functions.len());

        for function in functions {
            let qualified = self.namespace.qualify_function(container, function);

            for suffix in FUNCTION_SUFFIXES {
                for prefix in PREFIXES {
                    self.map.insert(
                        format!("{prefix}{function}{suffix}"),
                        format!("{prefix}{qualified}{suffix}"),
                    );
                }

                self.map.insert(
                    format!("function {qualified}{suffix}"),
                    format!("static function {function}{suffix}"),
                );
            }

            entries.push(FunctionManifestEntry {
                function: function.clone(),
                file: container.to_string(),
                qualified,
            });
        }

        entries
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn build(self) -> SubstitutionMap {
        self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns() -> Namespace {
        Namespace::new("Facebook\\Libphutil", "Functions")
    }

    fn widget() -> ClassLike {
        ClassLike {
            kind: ClassLikeKind::Class,
            name: "Widget".to_string(),
        }
    }

    #[test]
    fn class_entries_cover_every_boundary_pair() {
        let ns = ns();
        let mut builder = SubstitutionMapBuilder::new(&ns);
        builder.add_class_like(&widget());
        let map = builder.build();

        // Every pair, plus three declaration entries per suffix.
        let expected = PREFIXES.len() * CLASS_SUFFIXES.len() + 3 * CLASS_SUFFIXES.len();
        assert_eq!(map.len(), expected);
        assert_eq!(map.get(" Widget("), Some(" \\Facebook\\Libphutil\\Widget("));
        assert_eq!(map.get("(Widget::"), Some("(\\Facebook\\Libphutil\\Widget::"));
        assert_eq!(map.get("\"Widget\""), Some("\"\\Facebook\\Libphutil\\Widget\""));
        assert_eq!(map.get("WidgetFactory"), None);
    }

    #[test]
    fn declaration_entries_follow_general_entries() {
        let ns = ns();
        let mut builder = SubstitutionMapBuilder::new(&ns);
        builder.add_class_like(&widget());
        let map = builder.build();

        let general = map.position(" Widget ").unwrap();
        let declaration = map.position("class \\Facebook\\Libphutil\\Widget ").unwrap();
        assert!(declaration > general);
        assert_eq!(
            map.get("trait \\Facebook\\Libphutil\\Widget\n"),
            Some("trait Widget\n")
        );
    }

    #[test]
    fn function_entries_and_manifest() {
        let ns = ns();
        let mut builder = SubstitutionMapBuilder::new(&ns);
        let entries = builder.add_functions("utils", &["idx".to_string(), "mpull".to_string()]);
        let map = builder.build();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].file, "utils");
        assert_eq!(entries[0].qualified, "\\Facebook\\Libphutil\\Functions\\utils::idx");

        let per_function = PREFIXES.len() * FUNCTION_SUFFIXES.len() + FUNCTION_SUFFIXES.len();
        assert_eq!(map.len(), 2 * per_function);
        assert_eq!(
            map.get("(idx("),
            Some("(\\Facebook\\Libphutil\\Functions\\utils::idx(")
        );
        assert_eq!(
            map.get("'mpull'"),
            Some("'\\Facebook\\Libphutil\\Functions\\utils::mpull'")
        );
        assert_eq!(
            map.get("function \\Facebook\\Libphutil\\Functions\\utils::idx("),
            Some("static function idx(")
        );
    }

    #[test]
    fn builtins_map_to_global_names() {
        let ns = ns();
        let mut builder = SubstitutionMapBuilder::new(&ns);
        builder.add_builtins(["Exception", "ArrayAccess"]);
        assert_eq!(builder.len(), 2 * PREFIXES.len() * CLASS_SUFFIXES.len());
        let map = builder.build();
        assert_eq!(map.get(" Exception("), Some(" \\Exception("));
        assert_eq!(map.get(" ArrayAccess{"), None);
    }

    #[test]
    fn later_insert_wins_but_keeps_position() {
        let ns = ns();
        let mut builder = SubstitutionMapBuilder::new(&ns);
        builder.add_functions("first", &["helper".to_string()]);
        let position = builder.map.position(" helper(").unwrap();
        builder.add_functions("second", &["helper".to_string()]);
        let map = builder.build();

        assert_eq!(map.position(" helper("), Some(position));
        assert_eq!(
            map.get(" helper("),
            Some(" \\Facebook\\Libphutil\\Functions\\second::helper(")
        );
    }

    #[test]
    fn library_class_overrides_builtin_value() {
        let ns = ns();
        let mut builder = SubstitutionMapBuilder::new(&ns);
        builder.add_builtins(["Widget"]);
        builder.add_class_like(&widget());
        let map = builder.build();
        assert_eq!(map.position(" Widget "), Some(PREFIXES.iter().position(|p| *p == " ").unwrap()));
        assert_eq!(map.get(" Widget "), Some(" \\Facebook\\Libphutil\\Widget "));
    }
}
