//! Test support: a recording resolver double and render helpers.
//!
//! Use [`MapResolver`] to stand in for the owning framework's resolution hooks
//! and inspect which hooks a render consulted. Use [`render_to_string`] to
//! render a single widget with a fixed id for exact-match assertions.

pub mod resolver;
pub mod snapshot;

pub use resolver::{HookCall, MapResolver};
pub use snapshot::{render_to_string, render_with_id};
