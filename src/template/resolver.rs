//! Resolution hooks.
//!
//! A [`Resolver`] is consulted for names the template instance cannot resolve
//! from its own bindings, function table, or condition set. Every method has a
//! default, so an implementation only overrides what it provides.

use super::args::Argument;
use crate::dom::Fragment;

/// Capability set a render call consults for unbound names.
pub trait Resolver {
    /// Text for a variable with no bound string.
    fn resolve_string(&mut self, _name: &str, _args: &[Argument]) -> Option<String> {
        None
    }

    /// Fragment for a variable with no bound string or widget.
    fn resolve_widget(&mut self, _name: &str) -> Option<&mut Fragment> {
        None
    }

    /// Result of a function call that the function table did not handle.
    fn resolve_function(&mut self, _name: &str, _args: &[Argument]) -> Option<String> {
        None
    }

    /// Value of a condition that was never set on the template.
    fn condition_value(&mut self, _name: &str) -> Option<bool> {
        None
    }

    /// Text written in place of a variable nothing could resolve.
    fn handle_unresolved_variable(&mut self, name: &str, _args: &[Argument]) -> String {
        format!("??{name}??")
    }
}

/// Resolver that provides nothing beyond the defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl Resolver for NoHooks {}
