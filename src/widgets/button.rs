//! Button widget: a push button with a text label.
//!
//! Supports a `disabled` state, rendered as the `disabled` attribute.

use std::any::Any;

use crate::dom::NodeData;
use crate::format::{format_text, TextFormat};
use crate::template::{RenderScope, Result};
use crate::widget::traits::Widget;

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A push button with a plain-text label.
///
/// # Examples
///
/// ```ignore
/// let btn = Button::new("Submit");
/// let disabled_btn = Button::new("Locked").disabled(true);
/// ```
pub struct Button {
    label: String,
    disabled: bool,
}

impl Button {
    /// Create a new button with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
        }
    }

    /// Set whether the button is disabled (builder pattern).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Return the button label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the button is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl Widget for Button {
    fn widget_type(&self) -> &str {
        "Button"
    }

    fn render(&mut self, node: &NodeData, _scope: &RenderScope) -> Result<String> {
        let mut attrs = vec![("type", "button")];
        if self.disabled {
            attrs.push(("disabled", "disabled"));
        }
        Ok(format!(
            "{}{}</button>",
            node.open_tag("button", &attrs),
            format_text(&self.label, TextFormat::Plain)
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
