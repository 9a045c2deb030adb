//! PHP tokenizer built on logos.
//!
//! Produces a flat token stream over a whole file, including inline HTML,
//! whitespace and comments, so callers can reason about token adjacency.
//! This is a lexical scan only; nothing here understands PHP grammar.

use logos::Logos;

use crate::error::{Error, Result};

/// Token kinds exposed to the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    InlineHtml,
    OpenTag,
    CloseTag,
    Whitespace,
    Comment,
    DocComment,
    Attribute,
    String,
    Heredoc,
    Variable,
    Number,
    ClassKw,
    InterfaceKw,
    TraitKw,
    FunctionKw,
    ExtendsKw,
    ImplementsKw,
    Identifier,
    Punct,
}

impl TokenKind {
    /// Tokens that never change the meaning of surrounding code.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace
                | TokenKind::Comment
                | TokenKind::DocComment
                | TokenKind::Attribute
        )
    }
}

/// Token with kind, text and byte offset into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: usize,
}

/// Logos token types for code between `<?php` and `?>`.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum PhpToken {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[token("#[", attribute)]
    Attribute,

    #[token("//", line_comment)]
    #[token("#", line_comment)]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[token("'", quoted)]
    #[token("\"", quoted)]
    #[token("`", quoted)]
    ConstantString,

    #[token("<<<", heredoc)]
    Heredoc,

    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*")]
    Variable,

    #[regex(r"[0-9][0-9A-Za-z_.]*")]
    Number,

    #[token("class", ignore(ascii_case))]
    ClassKw,
    #[token("interface", ignore(ascii_case))]
    InterfaceKw,
    #[token("trait", ignore(ascii_case))]
    TraitKw,
    #[token("function", ignore(ascii_case))]
    FunctionKw,
    #[token("extends", ignore(ascii_case))]
    ExtendsKw,
    #[token("implements", ignore(ascii_case))]
    ImplementsKw,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    #[token("?>")]
    CloseTag,

    // Everything else is a single punctuation character. Non-ASCII bytes
    // outside strings and comments land here too.
    #[regex(r#"[^A-Za-z0-9_ \t\r\n'"`$#/<?]"#)]
    #[token("/")]
    #[token("<")]
    #[token("?")]
    #[token("$")]
    Punct,
}

impl From<PhpToken> for TokenKind {
    fn from(token: PhpToken) -> Self {
        match token {
            PhpToken::Whitespace => TokenKind::Whitespace,
            PhpToken::LineComment => TokenKind::Comment,
            PhpToken::BlockComment => TokenKind::Comment,
            PhpToken::Attribute => TokenKind::Attribute,
            PhpToken::ConstantString => TokenKind::String,
            PhpToken::Heredoc => TokenKind::Heredoc,
            PhpToken::Variable => TokenKind::Variable,
            PhpToken::Number => TokenKind::Number,
            PhpToken::ClassKw => TokenKind::ClassKw,
            PhpToken::InterfaceKw => TokenKind::InterfaceKw,
            PhpToken::TraitKw => TokenKind::TraitKw,
            PhpToken::FunctionKw => TokenKind::FunctionKw,
            PhpToken::ExtendsKw => TokenKind::ExtendsKw,
            PhpToken::ImplementsKw => TokenKind::ImplementsKw,
            PhpToken::Identifier => TokenKind::Identifier,
            PhpToken::CloseTag => TokenKind::CloseTag,
            PhpToken::Punct => TokenKind::Punct,
        }
    }
}

/// Line comments stop before the newline or a closing `?>`.
fn line_comment(lex: &mut logos::Lexer<PhpToken>) {
    let rest = lex.remainder();
    let newline = rest.find('\n').unwrap_or(rest.len());
    let end = rest[..newline].find("?>").unwrap_or(newline);
    lex.bump(end);
}

/// `#[...]` up to the matching bracket; strings inside may hold brackets.
fn attribute(lex: &mut logos::Lexer<PhpToken>) -> bool {
    let bytes = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(_) if b == b'\\' => i += 1,
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'\'' | b'"' => quote = Some(b),
                b'[' => depth += 1,
                b']' => {
                    depth -= 1;
                    if depth == 0 {
                        lex.bump(i + 1);
                        return true;
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }
    false
}

fn block_comment(lex: &mut logos::Lexer<PhpToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

/// Quoted strings; the opening quote is the current slice.
fn quoted(lex: &mut logos::Lexer<PhpToken>) -> bool {
    let quote = lex.slice().as_bytes()[0];
    let bytes = lex.remainder().as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => {
                lex.bump(i + 1);
                return true;
            }
            _ => i += 1,
        }
    }
    false
}

/// Heredoc and nowdoc bodies up to and including the closing label.
fn heredoc(lex: &mut logos::Lexer<PhpToken>) -> bool {
    let rest = lex.remainder();
    let header = rest.trim_start_matches([' ', '\t']);
    let mut consumed = rest.len() - header.len();

    let quote = header.chars().next().filter(|c| *c == '"' || *c == '\'');
    let label_start = if quote.is_some() { 1 } else { 0 };
    let label_len = header[label_start..]
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    if label_len == 0 {
        return false;
    }
    let label = &header[label_start..label_start + label_len];
    consumed += label_start + label_len;
    if let Some(q) = quote {
        if !header[label_start + label_len..].starts_with(q) {
            return false;
        }
        consumed += 1;
    }

    let Some(newline) = rest[consumed..].find('\n') else {
        return false;
    };
    consumed += newline + 1;

    let mut line_start = consumed;
    while line_start <= rest.len() {
        let line_end = rest[line_start..]
            .find('\n')
            .map(|n| line_start + n)
            .unwrap_or(rest.len());
        let line = &rest[line_start..line_end];
        let trimmed = line.trim_start_matches([' ', '\t']);
        if let Some(after) = trimmed.strip_prefix(label) {
            let terminated = after
                .bytes()
                .next()
                .map_or(true, |b| !(b.is_ascii_alphanumeric() || b == b'_'));
            if terminated {
                let label_end = line_start + (line.len() - trimmed.len()) + label.len();
                lex.bump(label_end);
                return true;
            }
        }
        if line_end == rest.len() {
            break;
        }
        line_start = line_end + 1;
    }
    false
}

/// Split a source file into tokens.
///
/// Text outside `<?php … ?>` becomes `InlineHtml`. An unterminated string,
/// comment or heredoc is an error carrying the byte offset where it starts.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < source.len() {
        let Some((tag_start, tag_len)) = find_open_tag(&source[pos..]) else {
            tokens.push(Token {
                kind: TokenKind::InlineHtml,
                text: &source[pos..],
                offset: pos,
            });
            break;
        };

        if tag_start > 0 {
            tokens.push(Token {
                kind: TokenKind::InlineHtml,
                text: &source[pos..pos + tag_start],
                offset: pos,
            });
        }
        let tag_offset = pos + tag_start;
        tokens.push(Token {
            kind: TokenKind::OpenTag,
            text: &source[tag_offset..tag_offset + tag_len],
            offset: tag_offset,
        });
        pos = tag_offset + tag_len;

        pos = lex_code(source, pos, &mut tokens)?;
    }

    Ok(tokens)
}

/// Run the logos lexer from `start` until `?>` or end of input. Returns the
/// offset where inline HTML resumes.
fn lex_code<'a>(source: &'a str, start: usize, tokens: &mut Vec<Token<'a>>) -> Result<usize> {
    let mut lexer = PhpToken::lexer(&source[start..]);

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        let offset = start + span.start;
        let kind: TokenKind = match token {
            Ok(t) => t.into(),
            Err(()) => {
                return Err(Error::source_unparsable(
                    offset,
                    format!("unterminated token starting with {:?}", lexer.slice()),
                ));
            }
        };

        if kind == TokenKind::CloseTag {
            // `?>` swallows one directly following newline.
            let mut end = start + span.end;
            if source[end..].starts_with("\r\n") {
                end += 2;
            } else if source[end..].starts_with('\n') {
                end += 1;
            }
            tokens.push(Token {
                kind,
                text: &source[offset..end],
                offset,
            });
            return Ok(end);
        }

        let kind = if kind == TokenKind::Comment && lexer.slice().starts_with("/**") {
            TokenKind::DocComment
        } else {
            kind
        };
        tokens.push(Token {
            kind,
            text: lexer.slice(),
            offset,
        });
    }

    Ok(source.len())
}

/// Locate the next open tag. Returns (start, length), where a `<?php` tag
/// includes the single whitespace character that must follow it.
fn find_open_tag(text: &str) -> Option<(usize, usize)> {
    let mut from = 0;
    while let Some(found) = text[from..].find("<?") {
        let start = from + found;
        let after = &text[start + 2..];
        if after.len() >= 3 && after.as_bytes()[..3].eq_ignore_ascii_case(b"php") {
            let rest = &after[3..];
            if rest.is_empty() {
                return Some((start, 5));
            }
            if rest.starts_with("\r\n") {
                return Some((start, 7));
            }
            if rest.starts_with([' ', '\t', '\n', '\r']) {
                return Some((start, 6));
            }
        } else if after.starts_with('=') {
            return Some((start, 3));
        } else if !after.starts_with("xml") {
            return Some((start, 2));
        }
        from = start + 2;
    }
    None
}
