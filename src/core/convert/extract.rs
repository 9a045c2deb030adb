//! Symbol extraction: which class-like and which functions a file declares.
//!
//! Works purely on token kinds and adjacency. Only the first class-like
//! declaration of a file is reported; files declaring several are not
//! supported and their later declarations are ignored.

use serde::Serialize;

use super::lexer::{tokenize, Token, TokenKind};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassLikeKind {
    Class,
    Interface,
    Trait,
}

impl ClassLikeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            ClassLikeKind::Class => "class",
            ClassLikeKind::Interface => "interface",
            ClassLikeKind::Trait => "trait",
        }
    }

    fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::ClassKw => Some(ClassLikeKind::Class),
            TokenKind::InterfaceKw => Some(ClassLikeKind::Interface),
            TokenKind::TraitKw => Some(ClassLikeKind::Trait),
            _ => None,
        }
    }
}

/// A class, interface or trait declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassLike {
    pub kind: ClassLikeKind,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    ClassBearing,
    FunctionBearing,
    Unclassified,
}

/// Declarations found in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// First class-like declaration, if any.
    pub class_like: Option<ClassLike>,
    /// Top-level function names in file order. Duplicates are kept.
    pub functions: Vec<String>,
}

impl Extraction {
    /// A class-like declaration wins over functions in the same file.
    pub fn classification(&self) -> Classification {
        if self.class_like.is_some() {
            Classification::ClassBearing
        } else if !self.functions.is_empty() {
            Classification::FunctionBearing
        } else {
            Classification::Unclassified
        }
    }
}

/// Extract declarations, degrading to an empty extraction when the source
/// cannot be tokenized.
pub fn extract(source: &str) -> Extraction {
    match try_extract(source) {
        Ok(extraction) => extraction,
        Err(e) => {
            log_status!("extract", "{}: {}", e.message, e.details);
            Extraction::default()
        }
    }
}

pub fn try_extract(source: &str) -> Result<Extraction> {
    let tokens = tokenize(source)?;
    Ok(Extraction {
        class_like: find_class_like(&tokens),
        functions: find_functions(&tokens),
    })
}

/// `class|interface|trait`, one whitespace token, then an identifier.
fn find_class_like(tokens: &[Token<'_>]) -> Option<ClassLike> {
    tokens.windows(3).find_map(|w| {
        let kind = ClassLikeKind::from_token(w[0].kind)?;
        if w[1].kind == TokenKind::Whitespace && w[2].kind == TokenKind::Identifier {
            Some(ClassLike {
                kind,
                name: w[2].text.to_string(),
            })
        } else {
            None
        }
    })
}

/// Names of functions declared at brace depth zero.
///
/// Each `function` keyword opens a declaration identified by its offset.
/// The first identifier that still belongs to that declaration is its name;
/// the declaration closes at the first other significant token, so
/// parameter names, type hints and defaults are never picked up, and a
/// closure (`function (`) yields nothing.
fn find_functions(tokens: &[Token<'_>]) -> Vec<String> {
    let mut functions = Vec::new();
    let mut depth = 0usize;
    let mut declaration: Option<usize> = None;

    for token in tokens {
        match token.kind {
            TokenKind::FunctionKw if depth == 0 => declaration = Some(token.offset),
            kind if kind.is_trivia() => {}
            TokenKind::Identifier => {
                if declaration.take().is_some() {
                    functions.push(token.text.to_string());
                }
            }
            TokenKind::Punct if token.text == "&" && declaration.is_some() => {}
            TokenKind::Punct => {
                declaration = None;
                match token.text {
                    "{" => depth += 1,
                    "}" => depth = depth.saturating_sub(1),
                    _ => {}
                }
            }
            _ => declaration = None,
        }
    }

    functions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_class_name() {
        let e = extract("<?php\n\nfinal class PhutilURI extends Phobject {\n}\n");
        assert_eq!(
            e.class_like,
            Some(ClassLike {
                kind: ClassLikeKind::Class,
                name: "PhutilURI".to_string()
            })
        );
        assert_eq!(e.classification(), Classification::ClassBearing);
    }

    #[test]
    fn finds_interface_and_trait() {
        let e = extract("<?php\ninterface PhutilSafeHTMLProducerInterface {}\n");
        assert_eq!(e.class_like.unwrap().kind, ClassLikeKind::Interface);

        let e = extract("<?php\ntrait PhutilLogging {}\n");
        assert_eq!(e.class_like.unwrap().kind, ClassLikeKind::Trait);
    }

    #[test]
    fn only_first_class_is_reported() {
        let e = extract("<?php\nclass First {}\nclass Second {}\n");
        assert_eq!(e.class_like.unwrap().name, "First");
    }

    #[test]
    fn class_constant_and_anonymous_class_are_ignored() {
        let e = extract("<?php\n$a = Foo::class;\n$b = new class extends Bar {};\n");
        assert_eq!(e.class_like, None);
    }

    #[test]
    fn attributes_do_not_hide_declarations() {
        let e = extract("<?php\n#[Attribute] class Marker {}\n");
        assert_eq!(e.class_like.unwrap().name, "Marker");

        let e = extract("<?php\n#[Pure] function &first(array $a) {}\n");
        assert_eq!(e.functions, vec!["first"]);
    }

    #[test]
    fn class_requires_single_whitespace_token() {
        // A comment between keyword and name breaks the triple.
        let e = extract("<?php\nclass /* x */ Foo {}\n");
        assert_eq!(e.class_like, None);
    }

    #[test]
    fn finds_top_level_functions_in_order() {
        let source = "<?php\n\nfunction idx(array $array, $key, $default = null) {\n  return $default;\n}\n\nfunction &mpull(array $list, $method) {\n  return $list;\n}\n";
        let e = extract(source);
        assert_eq!(e.functions, vec!["idx", "mpull"]);
        assert_eq!(e.classification(), Classification::FunctionBearing);
    }

    #[test]
    fn parameters_and_type_hints_are_not_functions() {
        let e = extract("<?php\nfunction f(Foo $a, $b = PHP_EOL) {}\n");
        assert_eq!(e.functions, vec!["f"]);
    }

    #[test]
    fn closures_and_methods_are_not_functions() {
        let source = "<?php\n$f = function ($x) { return strtoupper($x); };\nfunction g() {\n  $h = function () {};\n}\n";
        assert_eq!(extract(source).functions, vec!["g"]);
    }

    #[test]
    fn nested_declarations_are_ignored() {
        let source = "<?php\nif (!function_exists('h')) {\n  function h() {}\n}\n";
        assert!(extract(source).functions.is_empty());
    }

    #[test]
    fn duplicate_function_names_are_kept() {
        let e = extract("<?php\nfunction a() {}\nfunction a() {}\n");
        assert_eq!(e.functions, vec!["a", "a"]);
    }

    #[test]
    fn class_wins_over_functions() {
        let e = extract("<?php\nfunction helper() {}\nclass Holder {}\n");
        assert_eq!(e.functions, vec!["helper"]);
        assert_eq!(e.classification(), Classification::ClassBearing);
    }

    #[test]
    fn empty_file_is_unclassified() {
        let e = extract("<?php\n\n// nothing here\n$x = 1;\n");
        assert_eq!(e.classification(), Classification::Unclassified);
    }

    #[test]
    fn unparsable_source_degrades_to_empty() {
        let e = extract("<?php\nclass Broken {\n  $s = 'unterminated;\n");
        assert_eq!(e, Extraction::default());
        assert!(try_extract("<?php\n/* open").is_err());
    }
}
