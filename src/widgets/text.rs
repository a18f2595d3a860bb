//! Text widget: displays fixed text content.
//!
//! The simplest widget. It renders its content inside a `<span>`, either
//! as markup or as HTML-escaped plain text.

use std::any::Any;

use crate::dom::NodeData;
use crate::format::{format_text, TextFormat};
use crate::template::{RenderScope, Result};
use crate::widget::traits::Widget;

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// A widget that displays fixed text.
///
/// # Examples
///
/// ```ignore
/// let label = Text::new("<b>Hello</b>");
/// let safe = Text::plain(user_input);
/// ```
pub struct Text {
    content: String,
    format: TextFormat,
}

impl Text {
    /// Create a `Text` widget with markup content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            format: TextFormat::Xhtml,
        }
    }

    /// Create a `Text` widget with plain text content.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            format: TextFormat::Plain,
        }
    }

    /// Return the text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn format(&self) -> TextFormat {
        self.format
    }

    /// Replace the text content, keeping the format.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}

impl Widget for Text {
    fn widget_type(&self) -> &str {
        "Text"
    }

    fn render(&mut self, node: &NodeData, _scope: &RenderScope) -> Result<String> {
        Ok(format!(
            "{}{}</span>",
            node.open_tag("span", &[]),
            format_text(&self.content, self.format)
        ))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
