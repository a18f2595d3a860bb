//! Built-in widgets: Text, Button.

pub mod button;
pub mod text;

pub use button::Button;
pub use text::Text;
