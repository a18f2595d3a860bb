//! MapResolver: a table-driven [`Resolver`] that records every hook call.

use std::collections::HashMap;

use crate::dom::Fragment;
use crate::template::{Argument, Resolver};

/// One recorded hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookCall {
    String(String),
    Widget(String),
    Function(String, Vec<Argument>),
    Condition(String),
    Unresolved(String),
}

/// Resolver backed by plain maps.
///
/// # Examples
///
/// ```
/// use gilt_template::testing::{HookCall, MapResolver};
/// use gilt_template::Template;
///
/// let mut hooks = MapResolver::new().with_string("user", "ada");
/// let mut t = Template::new("${user}");
/// assert_eq!(t.render_with(&mut hooks).unwrap(), "ada");
/// assert_eq!(hooks.calls(), &[HookCall::String("user".into())]);
/// ```
#[derive(Debug, Default)]
pub struct MapResolver {
    strings: HashMap<String, String>,
    widgets: HashMap<String, Fragment>,
    functions: HashMap<String, String>,
    conditions: HashMap<String, bool>,
    unresolved_marker: Option<String>,
    calls: Vec<HookCall>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve variable `name` to `text` (builder).
    pub fn with_string(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.strings.insert(name.into(), text.into());
        self
    }

    /// Resolve variable `name` to `fragment` (builder).
    pub fn with_widget(mut self, name: impl Into<String>, fragment: Fragment) -> Self {
        self.widgets.insert(name.into(), fragment);
        self
    }

    /// Answer function `name` with `text`, whatever the arguments (builder).
    pub fn with_function(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.functions.insert(name.into(), text.into());
        self
    }

    /// Answer condition `name` with `value` (builder).
    pub fn with_condition(mut self, name: impl Into<String>, value: bool) -> Self {
        self.conditions.insert(name.into(), value);
        self
    }

    /// Write `marker` for unresolved variables instead of `??name??` (builder).
    pub fn with_unresolved_marker(mut self, marker: impl Into<String>) -> Self {
        self.unresolved_marker = Some(marker.into());
        self
    }

    /// Hook invocations so far, in order.
    pub fn calls(&self) -> &[HookCall] {
        &self.calls
    }

    pub fn widget(&self, name: &str) -> Option<&Fragment> {
        self.widgets.get(name)
    }
}

impl Resolver for MapResolver {
    fn resolve_string(&mut self, name: &str, _args: &[Argument]) -> Option<String> {
        self.calls.push(HookCall::String(name.to_owned()));
        self.strings.get(name).cloned()
    }

    fn resolve_widget(&mut self, name: &str) -> Option<&mut Fragment> {
        self.calls.push(HookCall::Widget(name.to_owned()));
        self.widgets.get_mut(name)
    }

    fn resolve_function(&mut self, name: &str, args: &[Argument]) -> Option<String> {
        self.calls
            .push(HookCall::Function(name.to_owned(), args.to_vec()));
        self.functions.get(name).cloned()
    }

    fn condition_value(&mut self, name: &str) -> Option<bool> {
        self.calls.push(HookCall::Condition(name.to_owned()));
        self.conditions.get(name).copied()
    }

    fn handle_unresolved_variable(&mut self, name: &str, _args: &[Argument]) -> String {
        self.calls.push(HookCall::Unresolved(name.to_owned()));
        match &self.unresolved_marker {
            Some(marker) => marker.clone(),
            None => format!("??{name}??"),
        }
    }
}
