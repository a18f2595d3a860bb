//! Placeholder classification.
//!
//! The body of a `${...}` span is split into a head token (up to the first
//! whitespace) and the rest. The head decides the kind:
//!
//! | head          | kind                 |
//! |---------------|----------------------|
//! | `<name>`      | conditional open     |
//! | `</name>`     | conditional close    |
//! | `fun:arg`     | function call        |
//! | anything else | variable reference   |
//!
//! A function's first argument is the rest of the head after the colon, taken
//! verbatim. Quotes are stripped only when they enclose the whole of it. The
//! text after the head goes through [`parse_arguments`].

use super::args::{parse_arguments, Argument};
use super::error::{MalformedKind, Result, TemplateError};

/// A classified placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    Variable { name: String, args: Vec<Argument> },
    /// `args` starts with the positional argument written directly after the
    /// colon, when there is one.
    Function { name: String, args: Vec<Argument> },
    ConditionalOpen { name: String },
    ConditionalClose { name: String },
}

impl Placeholder {
    /// Classify a placeholder body. `offset` is the position of `body` in the
    /// template text and anchors error offsets.
    pub fn classify(body: &str, offset: usize) -> Result<Self> {
        let trimmed = body.trim_start_matches(is_space);
        let offset = offset + (body.len() - trimmed.len());
        let head_len = trimmed.find(is_space).unwrap_or(trimmed.len());
        let (head, rest) = trimmed.split_at(head_len);

        let placeholder = if head.len() >= 2
            && head.starts_with('<')
            && head.ends_with('>')
            && !head.starts_with("</")
        {
            Self::ConditionalOpen {
                name: head[1..head.len() - 1].to_owned(),
            }
        } else if head.len() >= 3 && head.starts_with("</") && head.ends_with('>') {
            Self::ConditionalClose {
                name: head[2..head.len() - 1].to_owned(),
            }
        } else if let Some((name, after)) = function_head(trimmed) {
            let tail = &trimmed[after..];
            let (first, len) = head_argument(tail, offset + after)?;
            let mut args: Vec<Argument> = first.into_iter().collect();
            args.extend(parse_arguments(&tail[len..], offset + after + len)?);
            Self::Function {
                name: name.to_owned(),
                args,
            }
        } else {
            Self::Variable {
                name: head.to_owned(),
                args: parse_arguments(rest, offset + head_len)?,
            }
        };

        if placeholder.name().is_empty() {
            return Err(TemplateError::malformed(offset, MalformedKind::EmptyName));
        }
        Ok(placeholder)
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Variable { name, .. }
            | Self::Function { name, .. }
            | Self::ConditionalOpen { name }
            | Self::ConditionalClose { name } => name,
        }
    }

    pub fn args(&self) -> &[Argument] {
        match self {
            Self::Variable { args, .. } | Self::Function { args, .. } => args,
            Self::ConditionalOpen { .. } | Self::ConditionalClose { .. } => &[],
        }
    }

    pub fn is_conditional(&self) -> bool {
        matches!(
            self,
            Self::ConditionalOpen { .. } | Self::ConditionalClose { .. }
        )
    }
}

fn is_space(c: char) -> bool {
    c.is_ascii_whitespace()
}

/// Split a leading `name:` off a placeholder body.
///
/// The name runs up to the first whitespace, quote, `=`, `:` or `}`; the body
/// is a function call only when that character is the colon. Returns the name
/// and the offset just past the colon. The scanner uses the same split, so a
/// quote directly after the colon opens a quoted value in both places.
pub(crate) fn function_head(body: &str) -> Option<(&str, usize)> {
    let trimmed = body.trim_start_matches(is_space);
    let lead = body.len() - trimmed.len();
    let end = trimmed.find(|c: char| is_space(c) || matches!(c, ':' | '=' | '"' | '\'' | '}'))?;
    let (name, rest) = trimmed.split_at(end);
    rest.starts_with(':').then_some((name, lead + end + 1))
}

/// The function argument written directly after the colon, and its length.
///
/// It runs to the next whitespace. A leading quote extends it to the matching
/// quote first; the quotes are dropped when nothing follows them.
fn head_argument(text: &str, base: usize) -> Result<(Option<Argument>, usize)> {
    let mut quoted = None;
    let mut start = 0;
    if let Some(quote) = text.chars().next().filter(|&c| matches!(c, '"' | '\'')) {
        let close = text[1..]
            .find(quote)
            .ok_or_else(|| TemplateError::malformed(base, MalformedKind::UnterminatedQuote))?;
        start = close + 2;
        quoted = Some(&text[1..close + 1]);
    }

    let len = start + text[start..].find(is_space).unwrap_or(text.len() - start);
    let value = match quoted {
        Some(inner) if len == start => inner,
        _ => &text[..len],
    };
    let argument = (len > 0).then(|| Argument::positional(value));
    Ok((argument, len))
}
