//! logos-based template scanner.
//!
//! Template text is lexed with two token sets. Outside a placeholder the
//! [`MarkupToken`] set splits text into literal runs, `$${` escapes and `${`
//! openers. On an opener the lexer is morphed into [`BodyToken`], which skips
//! over quoted strings so that a `}` inside quotes does not end the span, and
//! is morphed back once the closing `}` is found.
//!
//! A quote opens a string only at the start of a token: at the start of the
//! body, after whitespace or `=`, or after the colon of a function head.
//! Inside a word it is an ordinary character, so `${tr:don't}` ends at its
//! own `}`. The argument lexer applies the same rule.
//!
//! Priority follows logos rules: `$${` beats `${`, which beats a lone `$`.

use logos::{Lexer, Logos};

use super::error::{MalformedKind, Result, TemplateError};
use super::placeholder::function_head;

/// Tokens outside of a placeholder.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum MarkupToken {
    /// `$${`: renders as a literal `${`.
    #[token("$${")]
    Escape,

    /// `${`: opens a placeholder.
    #[token("${")]
    Open,

    /// A `$` that opens nothing.
    #[token("$")]
    Dollar,

    #[regex(r"[^$]+")]
    Text,
}

/// Tokens inside a `${...}` body.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum BodyToken {
    #[token("}")]
    Close,

    #[regex(r"[ \t\n\r\f=]+")]
    Separator,

    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    #[regex(r"'[^']*'")]
    SingleQuoted,

    #[regex(r#"[^ \t\n\r\f="'}][^ \t\n\r\f=}]*"#)]
    Word,
}

/// Byte offsets of one `${...}` occurrence, from the `$` up to and including
/// the closing `}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Offset of the first byte of the placeholder body.
    pub fn body_start(&self) -> usize {
        self.start + 2
    }
}

/// One piece of scanned template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    /// Text copied to the output unchanged.
    Literal(&'t str),
    /// An escaped opener; rendered as `${`.
    Escaped,
    /// A placeholder and its body (the text between `${` and `}`).
    Placeholder { span: Span, body: &'t str },
}

/// Iterator over the [`Segment`]s of a template.
///
/// Yields at most one error, after which iteration stops.
pub struct Scanner<'t> {
    source: &'t str,
    lexer: Option<Lexer<'t, MarkupToken>>,
}

impl<'t> Scanner<'t> {
    pub fn new(source: &'t str) -> Self {
        Self {
            source,
            lexer: Some(MarkupToken::lexer(source)),
        }
    }

    /// Consume a placeholder body. `start` is the offset of the `${`.
    fn placeholder(
        &mut self,
        lexer: Lexer<'t, MarkupToken>,
        start: usize,
    ) -> Result<Segment<'t>> {
        let source = self.source;
        let mut body = lexer.morph::<BodyToken>();
        if let Some((_, after)) = function_head(body.remainder()) {
            body.bump(after);
        }
        loop {
            match body.next() {
                Some(Ok(BodyToken::Close)) => {
                    let end = body.span().end;
                    self.lexer = Some(body.morph());
                    let span = Span { start, end };
                    return Ok(Segment::Placeholder {
                        span,
                        body: &source[span.body_start()..end - 1],
                    });
                }
                Some(Ok(_)) => {}
                Some(Err(())) => {
                    return Err(TemplateError::malformed(
                        body.span().start,
                        MalformedKind::UnterminatedQuote,
                    ));
                }
                None => {
                    return Err(TemplateError::malformed(
                        start,
                        MalformedKind::Unterminated,
                    ));
                }
            }
        }
    }
}

impl<'t> Iterator for Scanner<'t> {
    type Item = Result<Segment<'t>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut lexer = self.lexer.take()?;
        let token = lexer.next()?;
        let segment = match token {
            Ok(MarkupToken::Open) => {
                let start = lexer.span().start;
                return Some(self.placeholder(lexer, start));
            }
            Ok(MarkupToken::Escape) => Segment::Escaped,
            // Every byte is covered by Text or Dollar, so an error slice is
            // still literal text.
            Ok(MarkupToken::Text | MarkupToken::Dollar) | Err(()) => {
                Segment::Literal(lexer.slice())
            }
        };
        self.lexer = Some(lexer);
        Some(Ok(segment))
    }
}

/// Scan a whole template, failing on the first malformed placeholder.
pub fn scan(source: &str) -> Result<Vec<Segment<'_>>> {
    Scanner::new(source).collect()
}
