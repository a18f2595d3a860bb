//! Node types: FragmentId, NodeData, Fragment.

use std::any::Any;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::new_key_type;

use crate::format::attribute_value;
use crate::template::{RenderScope, Result};
use crate::widget::Widget;

new_key_type! {
    /// Arena key of a bound fragment. Copy, lightweight (u64).
    pub struct FragmentId;
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Generate a process-wide unique element id (`w1`, `w2`, ...).
fn next_id() -> String {
    format!("w{}", NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

// ---------------------------------------------------------------------------
// NodeData
// ---------------------------------------------------------------------------

/// Markup attributes shared by every rendered widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Unique element id, used for the `id` attribute and the `id` function.
    pub id: String,
    /// Style classes (the `class` attribute).
    pub classes: Vec<String>,
}

impl Default for NodeData {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeData {
    /// Create node data with a freshly generated id and no classes.
    pub fn new() -> Self {
        Self {
            id: next_id(),
            classes: Vec::new(),
        }
    }

    /// Set the id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Add a single class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        self.add_class(&class);
        self
    }

    /// Add multiple classes (builder).
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for class in classes {
            let class = class.into();
            self.add_class(&class);
        }
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Add every whitespace-separated class in `classes`.
    pub fn add_class_list(&mut self, classes: &str) {
        for class in classes.split_ascii_whitespace() {
            self.add_class(class);
        }
    }

    /// Remove a class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Opening tag carrying the id, the classes, and any `extra` attributes.
    pub fn open_tag(&self, tag: &str, extra: &[(&str, &str)]) -> String {
        let mut out = format!("<{tag} id=\"{}\"", attribute_value(&self.id));
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", attribute_value(&self.classes.join(" ")));
        }
        for (name, value) in extra {
            let _ = write!(out, " {name}=\"{}\"", attribute_value(value));
        }
        out.push('>');
        out
    }
}

// ---------------------------------------------------------------------------
// Fragment
// ---------------------------------------------------------------------------

/// A widget together with its node data, ready to be bound into a template.
pub struct Fragment {
    node: NodeData,
    widget: Box<dyn Widget>,
}

impl Fragment {
    pub fn new(widget: impl Widget + 'static) -> Self {
        Self::from_boxed(Box::new(widget))
    }

    pub fn from_boxed(widget: Box<dyn Widget>) -> Self {
        Self {
            node: NodeData::new(),
            widget,
        }
    }

    /// Set the element id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.node.id = id.into();
        self
    }

    /// Add a class (builder).
    pub fn with_class(mut self, class: &str) -> Self {
        self.node.add_class(class);
        self
    }

    /// Add several classes (builder).
    pub fn with_classes(mut self, classes: &[&str]) -> Self {
        for class in classes {
            self.node.add_class(class);
        }
        self
    }

    pub fn id(&self) -> &str {
        &self.node.id
    }

    pub fn node(&self) -> &NodeData {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut NodeData {
        &mut self.node
    }

    pub fn widget_type(&self) -> &str {
        self.widget.widget_type()
    }

    /// Downcast the wrapped widget.
    pub fn downcast_ref<W: Any>(&self) -> Option<&W> {
        self.widget.as_any().downcast_ref()
    }

    /// Downcast the wrapped widget mutably.
    pub fn downcast_mut<W: Any>(&mut self) -> Option<&mut W> {
        self.widget.as_any_mut().downcast_mut()
    }

    /// Render the widget's markup.
    pub fn render(&mut self, scope: &RenderScope) -> Result<String> {
        self.widget.render(&self.node, scope)
    }
}

impl std::fmt::Debug for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fragment")
            .field("widget_type", &self.widget.widget_type())
            .field("node", &self.node)
            .finish()
    }
}
