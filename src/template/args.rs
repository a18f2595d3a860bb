//! Placeholder argument lists.
//!
//! Arguments follow the placeholder head, separated by whitespace:
//! `key="value"`, `key='value'`, `key=value`, or a bare positional token
//! (optionally quoted). Quotes are stripped and nothing else is unescaped, so a
//! quote character cannot appear inside a value delimited by the same quote.
//!
//! A quote only opens a quoted value at the start of a token, after whitespace
//! or `=`. Inside a bare word such as `it's` it is kept as written.

use logos::Logos;

use super::error::{MalformedKind, Result, TemplateError};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
enum ArgToken {
    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    #[regex(r"'[^']*'")]
    SingleQuoted,

    #[regex(r#"[^ \t\n\r\f"'=][^ \t\n\r\f=]*"#)]
    Word,
}

/// One decoded argument. Positional arguments have an empty key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub key: String,
    pub value: String,
}

impl Argument {
    pub fn positional(value: impl Into<String>) -> Self {
        Self {
            key: String::new(),
            value: value.into(),
        }
    }

    pub fn named(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn is_positional(&self) -> bool {
        self.key.is_empty()
    }
}

/// Values of the positional arguments, in order.
pub fn positional(args: &[Argument]) -> impl Iterator<Item = &str> {
    args.iter()
        .filter(|arg| arg.is_positional())
        .map(|arg| arg.value.as_str())
}

/// Value of the first argument named `key`.
pub fn named<'a>(args: &'a [Argument], key: &str) -> Option<&'a str> {
    args.iter()
        .find(|arg| arg.key == key)
        .map(|arg| arg.value.as_str())
}

/// A lexed argument token with its absolute offset.
struct ArgPiece<'t> {
    token: ArgToken,
    text: &'t str,
    offset: usize,
}

impl ArgPiece<'_> {
    fn is_value(&self) -> bool {
        matches!(
            self.token,
            ArgToken::Word | ArgToken::DoubleQuoted | ArgToken::SingleQuoted
        )
    }

    fn value(&self) -> &str {
        match self.token {
            ArgToken::DoubleQuoted | ArgToken::SingleQuoted => &self.text[1..self.text.len() - 1],
            ArgToken::Word | ArgToken::Equals => self.text,
        }
    }
}

/// Parse an argument list. `base` is the offset of `input` within the
/// template text and is added to every reported error offset.
pub fn parse_arguments(input: &str, base: usize) -> Result<Vec<Argument>> {
    let mut pieces = Vec::new();
    let mut lexer = ArgToken::lexer(input);
    while let Some(result) = lexer.next() {
        let offset = base + lexer.span().start;
        match result {
            Ok(token) => pieces.push(ArgPiece {
                token,
                text: lexer.slice(),
                offset,
            }),
            // Only a quote at the start of a token can fail to lex.
            Err(()) => {
                return Err(TemplateError::malformed(
                    offset,
                    MalformedKind::UnterminatedQuote,
                ))
            }
        }
    }

    let mut args = Vec::new();
    let mut cursor = pieces.iter().peekable();
    while let Some(piece) = cursor.next() {
        match piece.token {
            ArgToken::Equals => {
                return Err(TemplateError::malformed(
                    piece.offset,
                    MalformedKind::UnexpectedEquals,
                ));
            }
            ArgToken::Word if cursor.peek().is_some_and(|next| next.token == ArgToken::Equals) => {
                let equals = cursor.next().map(|p| p.offset).unwrap_or(piece.offset);
                match cursor.next() {
                    Some(value) if value.is_value() => {
                        args.push(Argument::named(piece.text, value.value()));
                    }
                    _ => {
                        return Err(TemplateError::malformed(
                            equals,
                            MalformedKind::MissingValue(piece.text.to_owned()),
                        ));
                    }
                }
            }
            _ => args.push(Argument::positional(piece.value())),
        }
    }

    Ok(args)
}
