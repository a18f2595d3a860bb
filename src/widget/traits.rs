//! Widget trait: markup rendering for bound fragments.
//!
//! The `Widget` trait is what a template binds under a variable name. Every
//! widget knows its type name and how to render itself into markup, given the
//! node data (id, classes) it was bound with. The `WidgetExt` trait adds
//! builder-style conversions into a [`Fragment`].

use std::any::Any;

use crate::dom::{Fragment, NodeData};
use crate::template::{RenderScope, Result};

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by everything that can be bound into a template.
///
/// Widget is object-safe. Methods that require `Self: Sized` live on the
/// `WidgetExt` extension trait instead.
pub trait Widget {
    /// The type name for this widget (e.g. "Button", "Template").
    fn widget_type(&self) -> &str;

    /// Render this widget as markup.
    ///
    /// `node` carries the id and classes the widget is bound with. Widgets
    /// that render template text themselves must do so in
    /// [`RenderScope::descend`] of `scope`.
    fn render(&mut self, node: &NodeData, scope: &RenderScope) -> Result<String>;

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ---------------------------------------------------------------------------
// WidgetExt
// ---------------------------------------------------------------------------

/// Extension trait providing builder-style conversions into fragments.
///
/// Automatically implemented for all types that implement `Widget`.
pub trait WidgetExt: Widget {
    /// Wrap this widget with a generated id.
    fn into_fragment(self) -> Fragment
    where
        Self: Sized + 'static,
    {
        Fragment::new(self)
    }

    /// Wrap this widget with an explicit id.
    fn with_id(self, id: &str) -> Fragment
    where
        Self: Sized + 'static,
    {
        Fragment::new(self).with_id(id)
    }

    /// Wrap this widget with a single class.
    fn with_class(self, class: &str) -> Fragment
    where
        Self: Sized + 'static,
    {
        Fragment::new(self).with_class(class)
    }

    /// Wrap this widget with multiple classes.
    fn with_classes(self, classes: &[&str]) -> Fragment
    where
        Self: Sized + 'static,
    {
        Fragment::new(self).with_classes(classes)
    }
}

// Blanket implementation: every Widget gets WidgetExt for free.
impl<T: Widget> WidgetExt for T {}

// ===========================================================================
// Tests
// ===========================================================================
