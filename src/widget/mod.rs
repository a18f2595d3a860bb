//! Widget system: the renderable trait bound into templates.

pub mod traits;

pub use traits::{Widget, WidgetExt};
