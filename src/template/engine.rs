//! The template engine.
//!
//! A [`Template`] owns template text plus everything needed to render it:
//! string and widget bindings, condition values, a function table and a
//! message bundle. [`Template::render`] makes one left-to-right pass over the
//! text: literal text is copied, placeholders are classified and resolved,
//! and conditional blocks decide what reaches the output.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, trace};

use super::args::Argument;
use super::conditions::ConditionalStack;
use super::config::{Output, RenderConfig, RenderScope};
use super::error::Result;
use super::functions::{self, FunctionContext, TemplateFunction};
use super::placeholder::Placeholder;
use super::resolver::{NoHooks, Resolver};
use super::scanner::{Scanner, Segment};
use crate::dom::{Fragment, FragmentArena, NodeData};
use crate::format::{format_text, TextFormat};
use crate::i18n::MessageBundle;
use crate::widget::Widget;

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// Template text with its bindings.
///
/// # Examples
///
/// ```
/// use gilt_template::Template;
///
/// let mut t = Template::new("Hello ${name}!${<admin>} (admin)${</admin>}");
/// t.bind_string("name", "Ada");
/// assert_eq!(t.render().unwrap(), "Hello Ada!");
///
/// t.set_condition("admin", true);
/// assert_eq!(t.render().unwrap(), "Hello Ada! (admin)");
/// ```
pub struct Template {
    text: Rc<str>,
    strings: HashMap<String, String>,
    widgets: FragmentArena,
    conditions: HashMap<String, bool>,
    functions: HashMap<String, TemplateFunction>,
    messages: MessageBundle,
    config: RenderConfig,
}

impl Default for Template {
    fn default() -> Self {
        Self::new("")
    }
}

impl Template {
    /// Create a template with the given text and no bindings.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Rc::from(text.into()),
            strings: HashMap::new(),
            widgets: FragmentArena::new(),
            conditions: HashMap::new(),
            functions: HashMap::new(),
            messages: MessageBundle::new(),
            config: RenderConfig::default(),
        }
    }

    // -- Template text ------------------------------------------------------

    /// Replace the template text. Bindings, conditions and functions are kept.
    pub fn set_template_text(&mut self, text: impl Into<String>) {
        self.text = Rc::from(text.into());
    }

    pub fn template_text(&self) -> &str {
        &self.text
    }

    // -- Bindings -----------------------------------------------------------

    /// Bind markup to `name`. It is written to the output as is.
    pub fn bind_string(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.bind_string_with_format(name, text, TextFormat::Xhtml);
    }

    /// Bind text in the given format to `name`. Plain text is HTML-escaped
    /// once, at bind time.
    pub fn bind_string_with_format(
        &mut self,
        name: impl Into<String>,
        text: impl Into<String>,
        format: TextFormat,
    ) {
        let name = name.into();
        let text = text.into();
        self.widgets.take(&name);
        let value = format_text(&text, format).into_owned();
        self.strings.insert(name, value);
    }

    /// Bind the decimal representation of `value` to `name`.
    pub fn bind_int(&mut self, name: impl Into<String>, value: i64) {
        self.bind_string(name, value.to_string());
    }

    /// Bind a widget to `name` with a generated id.
    pub fn bind_widget(&mut self, name: impl Into<String>, widget: impl Widget + 'static) {
        self.bind_fragment(name, Fragment::new(widget));
    }

    /// Bind a fragment to `name`, returning the fragment it replaces.
    pub fn bind_fragment(&mut self, name: impl Into<String>, fragment: Fragment) -> Option<Fragment> {
        let name = name.into();
        self.strings.remove(&name);
        self.widgets.bind(name, fragment)
    }

    /// Bind `name` to nothing: it renders as the empty string.
    pub fn bind_empty(&mut self, name: impl Into<String>) {
        self.bind_string(name, "");
    }

    /// Unbind the widget bound to `name` and return it.
    pub fn take_widget(&mut self, name: &str) -> Option<Fragment> {
        self.widgets.take(name)
    }

    /// The fragment bound to `name`.
    pub fn resolve_fragment(&self, name: &str) -> Option<&Fragment> {
        self.widgets.get(name)
    }

    /// The fragment bound to `name`, mutably.
    pub fn resolve_fragment_mut(&mut self, name: &str) -> Option<&mut Fragment> {
        self.widgets.get_mut(name)
    }

    /// The string bound to `name`, after format conversion.
    pub fn resolve_string_value(&self, name: &str) -> Option<&str> {
        self.strings.get(name).map(String::as_str)
    }

    pub fn is_widget_bound(&self, name: &str) -> bool {
        self.widgets.contains(name)
    }

    /// Whether `name` has a string or widget binding.
    pub fn is_bound(&self, name: &str) -> bool {
        self.strings.contains_key(name) || self.widgets.contains(name)
    }

    // -- Functions ----------------------------------------------------------

    /// Register `f` as the function `name`, replacing any previous one.
    pub fn add_function<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&mut FunctionContext<'_>, &[Argument]) -> Result<Option<String>> + 'static,
    {
        self.add_shared_function(name, functions::function(f));
    }

    /// Register an already shared function.
    pub fn add_shared_function(&mut self, name: impl Into<String>, f: TemplateFunction) {
        self.functions.insert(name.into(), f);
    }

    /// Register the standard `tr`, `id` and `block` functions.
    pub fn add_standard_functions(&mut self) {
        self.add_shared_function("tr", functions::tr());
        self.add_shared_function("id", functions::id());
        self.add_shared_function("block", functions::block());
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    // -- Conditions ---------------------------------------------------------

    pub fn set_condition(&mut self, name: impl Into<String>, value: bool) {
        self.conditions.insert(name.into(), value);
    }

    /// Value of condition `name`; `false` when it was never set.
    pub fn condition_value(&self, name: &str) -> bool {
        self.conditions.get(name).copied().unwrap_or(false)
    }

    /// Names of the conditions currently set to `true`, sorted.
    pub fn conditions_set(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .conditions
            .iter()
            .filter(|(_, value)| **value)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    // -- Messages and limits ------------------------------------------------

    pub fn set_messages(&mut self, messages: MessageBundle) {
        self.messages = messages;
    }

    pub fn messages(&self) -> &MessageBundle {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageBundle {
        &mut self.messages
    }

    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Drop all string and widget bindings and all condition values. The
    /// function table and message bundle are kept.
    pub fn clear(&mut self) {
        self.strings.clear();
        self.widgets.clear();
        self.conditions.clear();
    }

    // -- Rendering ----------------------------------------------------------

    /// Render the template text with this template's own bindings.
    pub fn render(&mut self) -> Result<String> {
        self.render_with(&mut NoHooks)
    }

    /// Render the template text, consulting `hooks` for anything the
    /// template cannot resolve itself.
    pub fn render_with(&mut self, hooks: &mut dyn Resolver) -> Result<String> {
        let scope = RenderScope::root(self.config);
        self.render_scoped(hooks, scope)
    }

    fn render_scoped(&mut self, hooks: &mut dyn Resolver, scope: RenderScope) -> Result<String> {
        let text = Rc::clone(&self.text);
        self.render_source(&text, hooks, scope)
    }

    /// One scan-classify-resolve pass over `source`.
    pub(crate) fn render_source(
        &mut self,
        source: &str,
        hooks: &mut dyn Resolver,
        scope: RenderScope,
    ) -> Result<String> {
        debug!(len = source.len(), depth = scope.depth(), "rendering template");

        let mut out = Output::new(&scope);
        let mut stack = ConditionalStack::new();

        for segment in Scanner::new(source) {
            match segment? {
                Segment::Literal(text) => {
                    if !stack.is_suppressed() {
                        out.push_str(text)?;
                    }
                }
                Segment::Escaped => {
                    if !stack.is_suppressed() {
                        out.push_str("${")?;
                    }
                }
                Segment::Placeholder { span, body } => {
                    match Placeholder::classify(body, span.body_start())? {
                        Placeholder::ConditionalOpen { name } => {
                            let value =
                                !stack.is_suppressed() && self.resolve_condition(&name, hooks);
                            stack.open(name, value);
                        }
                        Placeholder::ConditionalClose { name } => {
                            stack.close(&name, span.start)?;
                        }
                        placeholder if stack.is_suppressed() => {
                            trace!(name = placeholder.name(), "skipping suppressed placeholder");
                        }
                        Placeholder::Variable { name, args } => {
                            let text = self.resolve_variable(&name, &args, hooks, &scope)?;
                            out.push_str(&text)?;
                        }
                        Placeholder::Function { name, args } => {
                            if let Some(text) = self.call_function(&name, &args, hooks, scope)? {
                                out.push_str(&text)?;
                            }
                        }
                    }
                }
            }
        }

        stack.finish(source.len())?;
        Ok(out.into_string())
    }

    fn resolve_condition(&self, name: &str, hooks: &mut dyn Resolver) -> bool {
        match self.conditions.get(name) {
            Some(&value) => value,
            None => hooks.condition_value(name).unwrap_or(false),
        }
    }

    fn resolve_variable(
        &mut self,
        name: &str,
        args: &[Argument],
        hooks: &mut dyn Resolver,
        scope: &RenderScope,
    ) -> Result<String> {
        if let Some(text) = self.strings.get(name) {
            return Ok(text.clone());
        }
        if let Some(text) = hooks.resolve_string(name, args) {
            return Ok(text);
        }
        if let Some(fragment) = self.widgets.get_mut(name) {
            return render_fragment(fragment, args, scope);
        }
        if let Some(fragment) = hooks.resolve_widget(name) {
            return render_fragment(fragment, args, scope);
        }

        debug!(name, "unresolved template variable");
        Ok(hooks.handle_unresolved_variable(name, args))
    }

    fn call_function(
        &mut self,
        name: &str,
        args: &[Argument],
        hooks: &mut dyn Resolver,
        scope: RenderScope,
    ) -> Result<Option<String>> {
        if let Some(function) = self.functions.get(name).cloned() {
            let mut ctx = FunctionContext::new(self, &mut *hooks, scope);
            if let Some(text) = function(&mut ctx, args)? {
                return Ok(Some(text));
            }
        }
        if let Some(text) = hooks.resolve_function(name, args) {
            return Ok(Some(text));
        }

        debug!(name, "unresolved template function");
        Ok(None)
    }
}

/// Apply `class` arguments to a resolved fragment and render it.
fn render_fragment(fragment: &mut Fragment, args: &[Argument], scope: &RenderScope) -> Result<String> {
    for arg in args.iter().filter(|arg| arg.key == "class") {
        fragment.node_mut().add_class_list(&arg.value);
    }
    fragment.render(scope)
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut functions: Vec<_> = self.functions.keys().collect();
        functions.sort_unstable();
        f.debug_struct("Template")
            .field("text", &self.text)
            .field("strings", &self.strings)
            .field("widgets", &self.widgets)
            .field("conditions", &self.conditions)
            .field("functions", &functions)
            .field("config", &self.config)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Template as a widget
// ---------------------------------------------------------------------------

impl Widget for Template {
    fn widget_type(&self) -> &str {
        "Template"
    }

    /// Render as a `<div>` around this template's own output, one nesting
    /// level below `scope`. Each limit is the stricter of this template's
    /// config and the one `scope` carries.
    fn render(&mut self, node: &NodeData, scope: &RenderScope) -> Result<String> {
        let scope = scope.descend()?.restrict(self.config);
        let inner = self.render_scoped(&mut NoHooks, scope)?;
        Ok(format!("{}{}</div>", node.open_tag("div", &[]), inner))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::error::{MalformedKind, TemplateError, UnbalancedKind};
    use crate::widget::WidgetExt;
    use crate::widgets::{Button, Text};
    use pretty_assertions::assert_eq;

    fn render(text: &str) -> Result<String> {
        Template::new(text).render()
    }

    // -- Literal text -------------------------------------------------------

    #[test]
    fn text_without_placeholders_is_unchanged() {
        for text in ["", "plain", "<p a=\"1\">x</p>", "cost: $5 {braces}", "ünïcödé"] {
            assert_eq!(render(text).unwrap(), text);
        }
    }

    #[test]
    fn escape_renders_opener() {
        assert_eq!(render("a $${b} c").unwrap(), "a ${b} c");
        assert_eq!(render("$${<x>}").unwrap(), "${<x>}");
    }

    // -- Variables ----------------------------------------------------------

    #[test]
    fn bound_string() {
        let mut t = Template::new("Hello ${name}!");
        t.bind_string("name", "<b>World</b>");
        assert_eq!(t.render().unwrap(), "Hello <b>World</b>!");
    }

    #[test]
    fn plain_string_is_escaped() {
        let mut t = Template::new("${v}");
        t.bind_string_with_format("v", "a<b", TextFormat::Plain);
        assert_eq!(t.render().unwrap(), "a&lt;b");
        assert_eq!(t.resolve_string_value("v"), Some("a&lt;b"));
    }

    #[test]
    fn bound_int() {
        let mut t = Template::new("${n} items");
        t.bind_int("n", -3);
        assert_eq!(t.render().unwrap(), "-3 items");
    }

    #[test]
    fn unbound_variable_marker() {
        assert_eq!(render("[${missing}]").unwrap(), "[??missing??]");
    }

    #[test]
    fn bind_empty_renders_nothing() {
        let mut t = Template::new("a${x}b");
        t.bind_widget("x", Text::new("w"));
        t.bind_empty("x");
        assert!(!t.is_widget_bound("x"));
        assert!(t.is_bound("x"));
        assert_eq!(t.render().unwrap(), "ab");
    }

    #[test]
    fn widget_binding() {
        let mut t = Template::new("<p>${title}</p>");
        t.bind_fragment("title", Text::new("Hi").with_id("t1"));
        assert_eq!(t.render().unwrap(), r#"<p><span id="t1">Hi</span></p>"#);
    }

    #[test]
    fn class_argument_styles_widget() {
        let mut t = Template::new(r#"${ok class="primary big"}"#);
        t.bind_fragment("ok", Button::new("OK").with_id("b"));
        assert_eq!(
            t.render().unwrap(),
            r#"<button id="b" class="primary big" type="button">OK</button>"#
        );
        assert!(t.resolve_fragment("ok").unwrap().node().has_class("big"));
    }

    #[test]
    fn string_binding_replaces_widget_and_back() {
        let mut t = Template::new("${x}");
        t.bind_widget("x", Text::new("w"));
        t.bind_string("x", "s");
        assert_eq!(t.render().unwrap(), "s");

        t.bind_fragment("x", Text::new("w").with_id("i"));
        assert_eq!(t.render().unwrap(), r#"<span id="i">w</span>"#);
        assert_eq!(t.resolve_string_value("x"), None);
    }

    #[test]
    fn take_widget_unbinds() {
        let mut t = Template::new("${x}");
        t.bind_widget("x", Button::new("b"));
        let fragment = t.take_widget("x").unwrap();
        assert!(fragment.downcast_ref::<Button>().is_some());
        assert_eq!(t.render().unwrap(), "??x??");
    }

    // -- Conditions ---------------------------------------------------------

    #[test]
    fn condition_controls_block() {
        let mut t = Template::new("a${<c>}X${</c>}b");
        assert_eq!(t.render().unwrap(), "ab");
        t.set_condition("c", true);
        assert_eq!(t.render().unwrap(), "aXb");
    }

    #[test]
    fn condition_defaults_and_set() {
        let mut t = Template::new("");
        assert!(!t.condition_value("x"));
        t.set_condition("b", true);
        t.set_condition("a", true);
        t.set_condition("off", false);
        assert!(t.condition_value("a"));
        assert_eq!(t.conditions_set(), vec!["a", "b"]);
    }

    #[test]
    fn nested_conditions() {
        let text = "${<a>}${<b>}Y${</b>}${</a>}";
        let mut t = Template::new(text);
        t.set_condition("a", true);
        t.set_condition("b", false);
        assert_eq!(t.render().unwrap(), "");

        t.set_condition("a", false);
        t.set_condition("b", true);
        assert_eq!(t.render().unwrap(), "");

        t.set_condition("a", true);
        assert_eq!(t.render().unwrap(), "Y");
    }

    #[test]
    fn suppressed_region_does_not_resolve() {
        let mut t = Template::new("${<off>}${missing}${f:x}${</off>}done");
        t.add_function("f", |_, _| panic!("function called inside suppressed block"));
        assert_eq!(t.render().unwrap(), "done");
    }

    #[test]
    fn suppressed_region_still_checks_balance() {
        let err = render("${<off>}${<a>}${</b>}${</off>}").unwrap_err();
        assert_eq!(
            err,
            TemplateError::unbalanced(
                14,
                UnbalancedKind::Mismatched {
                    expected: "a".into(),
                    found: "b".into(),
                }
            )
        );
    }

    #[test]
    fn mismatched_close_is_fatal() {
        let err = render("${<a>}${</b>}").unwrap_err();
        assert!(matches!(err, TemplateError::UnbalancedConditional { offset: 6, .. }));
    }

    #[test]
    fn unclosed_block_is_fatal() {
        let err = render("${<a>}text").unwrap_err();
        assert_eq!(
            err,
            TemplateError::unbalanced(10, UnbalancedKind::Unclosed { name: "a".into() })
        );
    }

    #[test]
    fn stray_close_is_fatal() {
        let err = render("x${</a>}").unwrap_err();
        assert_eq!(
            err,
            TemplateError::unbalanced(1, UnbalancedKind::UnexpectedClose { name: "a".into() })
        );
    }

    // -- Functions ----------------------------------------------------------

    #[test]
    fn registered_function_output() {
        let mut t = Template::new("${tr:greeting}, world");
        t.add_function("tr", |_, args| {
            assert_eq!(args, &[Argument::positional("greeting")]);
            Ok(Some("Hello".into()))
        });
        assert!(t.has_function("tr"));
        assert_eq!(t.render().unwrap(), "Hello, world");
    }

    #[test]
    fn unknown_function_renders_nothing() {
        assert_eq!(render("[${tr:greeting}]").unwrap(), "[]");
    }

    #[test]
    fn function_declining_renders_nothing() {
        let mut t = Template::new("[${f:x}]");
        t.add_function("f", |_, _| Ok(None));
        assert_eq!(t.render().unwrap(), "[]");
    }

    #[test]
    fn standard_functions() {
        let mut t = Template::new(r#"<label for="${id:field}">${tr:label}</label>${field}"#);
        t.add_standard_functions();
        t.messages_mut().insert("label", "Name");
        t.bind_fragment("field", Text::new("").with_id("f1"));
        assert_eq!(
            t.render().unwrap(),
            r#"<label for="f1">Name</label><span id="f1"></span>"#
        );
    }

    #[test]
    fn block_recursion_hits_depth_limit() {
        let mut t = Template::new("${block:loop}");
        t.add_standard_functions();
        t.set_messages(MessageBundle::new().with("loop", "again ${block:loop}"));
        t.set_config(RenderConfig::new().with_max_depth(3));
        assert_eq!(
            t.render().unwrap_err(),
            TemplateError::DepthExceeded { limit: 3 }
        );
    }

    // -- Malformed input ----------------------------------------------------

    #[test]
    fn malformed_placeholders() {
        let cases = [
            ("ab${x", 2, MalformedKind::Unterminated),
            (r#"${v a="x}"#, 6, MalformedKind::UnterminatedQuote),
            ("${}", 2, MalformedKind::EmptyName),
            ("${ }", 3, MalformedKind::EmptyName),
        ];
        for (text, offset, kind) in cases {
            assert_eq!(
                render(text).unwrap_err(),
                TemplateError::malformed(offset, kind),
                "template {text:?}"
            );
        }
    }

    // -- Lifecycle ----------------------------------------------------------

    #[test]
    fn render_is_deterministic() {
        let mut t = Template::new("${a} ${w class=\"x\"} ${<c>}on${</c>}");
        t.bind_string("a", "A");
        t.bind_widget("w", Text::new("T"));
        t.set_condition("c", true);
        let first = t.render().unwrap();
        assert_eq!(t.render().unwrap(), first);
    }

    #[test]
    fn clear_keeps_functions() {
        let mut t = Template::new("${a}${<c>}C${</c>}${f:}");
        t.bind_string("a", "A");
        t.set_condition("c", true);
        t.add_function("f", |_, _| Ok(Some("F".into())));
        assert_eq!(t.render().unwrap(), "ACF");

        t.clear();
        assert_eq!(t.render().unwrap(), "??a??F");
    }

    #[test]
    fn set_template_text_keeps_bindings() {
        let mut t = Template::new("${a}");
        t.bind_string("a", "1");
        t.set_template_text("<${a}>");
        assert_eq!(t.template_text(), "<${a}>");
        assert_eq!(t.render().unwrap(), "<1>");
    }

    #[test]
    fn output_limit() {
        let mut t = Template::new("${a}${a}");
        t.bind_string("a", "12345");
        t.set_config(RenderConfig::new().with_max_output(8));
        assert_eq!(
            t.render().unwrap_err(),
            TemplateError::OutputLimitExceeded { limit: 8 }
        );
    }

    // -- Nested templates ---------------------------------------------------

    #[test]
    fn template_as_widget() {
        let mut inner = Template::new("<i>${x}</i>");
        inner.bind_string("x", "in");
        let mut outer = Template::new("${child}");
        outer.bind_fragment("child", inner.with_id("c"));
        assert_eq!(outer.render().unwrap(), r#"<div id="c"><i>in</i></div>"#);
    }

    #[test]
    fn nested_template_keeps_its_own_output_limit() {
        let mut inner = Template::new("${long}");
        inner.bind_string("long", "0123456789");
        inner.set_config(RenderConfig::new().with_max_output(4));
        let mut outer = Template::new("${child}");
        outer.bind_widget("child", inner);
        assert_eq!(
            outer.render().unwrap_err(),
            TemplateError::OutputLimitExceeded { limit: 4 }
        );
    }

    #[test]
    fn nested_template_depth_limit() {
        let inner = Template::new("x");
        let mut outer = Template::new("${child}");
        outer.set_config(RenderConfig::new().with_max_depth(0));
        outer.bind_widget("child", inner);
        assert_eq!(
            outer.render().unwrap_err(),
            TemplateError::DepthExceeded { limit: 0 }
        );
    }
}
