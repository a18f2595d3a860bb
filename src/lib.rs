//! # gilt-template
//!
//! A template substitution engine for markup, in the style of a widget
//! framework's template widget.
//!
//! Template text embeds `${...}` placeholders:
//!
//! - `${name}` and `${name class="a b"}`: a bound string, or a bound widget
//!   rendered to markup (with extra style classes)
//! - `${fun:arg more args}`: a call into the template's function table
//! - `${<cond>}` ... `${</cond>}`: a block shown only when `cond` is true
//! - `$${`: a literal `${`
//!
//! ## Core Systems
//!
//! - **[`template`]**: Scanner, classifier, argument parser, conditional
//!   stack, resolution dispatcher, functions and render limits
//! - **[`dom`]**: Slotmap-backed arena of bound fragments with id/class data
//! - **[`widget`]**: Widget trait for anything bound into a template
//! - **[`widgets`]**: Built-in widgets: Text, Button
//! - **[`i18n`]**: Message bundle behind the `tr` and `block` functions
//! - **[`format`]**: Text formats and HTML escaping
//! - **[`testing`]**: Recording resolver double and render helpers

// Foundation
pub mod format;
pub mod i18n;

// Core systems
pub mod template;

// Widget system
pub mod dom;
pub mod widget;
pub mod widgets;

// Test support
pub mod testing;

pub use template::{Argument, RenderConfig, Resolver, Result, Template, TemplateError};
