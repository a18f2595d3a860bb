//! Widget rendering helpers.
//!
//! Functions for rendering a widget outside of any template, with a
//! predictable id, so the markup can be compared against literal strings.

use crate::dom::NodeData;
use crate::template::{RenderConfig, RenderScope, Result};
use crate::widget::Widget;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a widget with the id `test` and default limits.
///
/// # Examples
///
/// ```
/// use gilt_template::testing::render_to_string;
/// use gilt_template::widgets::Text;
///
/// let output = render_to_string(&mut Text::new("Hello")).unwrap();
/// assert_eq!(output, r#"<span id="test">Hello</span>"#);
/// ```
pub fn render_to_string(widget: &mut dyn Widget) -> Result<String> {
    render_with_id(widget, "test", &[])
}

/// Render a widget with the given id and classes and default limits.
pub fn render_with_id(widget: &mut dyn Widget, id: &str, classes: &[&str]) -> Result<String> {
    let node = NodeData::new()
        .with_id(id)
        .with_classes(classes.iter().copied());
    widget.render(&node, &RenderScope::root(RenderConfig::new()))
}
