//! Text formats for bound strings.

use std::borrow::Cow;

/// How a bound string is interpreted when written into markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextFormat {
    /// Markup, written as is. No validation is performed.
    #[default]
    Xhtml,
    /// Plain text, HTML-escaped on output.
    Plain,
}

/// Convert `text` in the given format into markup.
pub fn format_text(text: &str, format: TextFormat) -> Cow<'_, str> {
    match format {
        TextFormat::Xhtml => Cow::Borrowed(text),
        TextFormat::Plain => html_escape::encode_text(text),
    }
}

/// Escape a value for use inside a double-quoted attribute.
pub fn attribute_value(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}
