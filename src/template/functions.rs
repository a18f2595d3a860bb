//! Template functions.
//!
//! A function placeholder `${name:arg ...}` calls the closure registered
//! under `name`. Functions receive a [`FunctionContext`] that exposes the
//! message bundle, bound widgets and nested rendering, and return
//! `Ok(None)` when they do not apply to the given arguments.

use std::rc::Rc;

use super::args::{positional, Argument};
use super::config::RenderScope;
use super::engine::Template;
use super::error::Result;
use super::resolver::Resolver;
use crate::dom::Fragment;

/// A registered template function.
pub type TemplateFunction =
    Rc<dyn Fn(&mut FunctionContext<'_>, &[Argument]) -> Result<Option<String>>>;

// ---------------------------------------------------------------------------
// FunctionContext
// ---------------------------------------------------------------------------

/// What a function can reach while it runs.
pub struct FunctionContext<'a> {
    template: &'a mut Template,
    hooks: &'a mut dyn Resolver,
    scope: RenderScope,
}

impl<'a> FunctionContext<'a> {
    pub(crate) fn new(
        template: &'a mut Template,
        hooks: &'a mut dyn Resolver,
        scope: RenderScope,
    ) -> Self {
        Self {
            template,
            hooks,
            scope,
        }
    }

    /// Localized text for `key` from the template's message bundle.
    pub fn tr(&self, key: &str) -> String {
        self.template.messages().tr(key)
    }

    /// Localized text for `key`, if the bundle has it.
    pub fn message(&self, key: &str) -> Option<&str> {
        self.template.messages().get(key)
    }

    /// The widget bound to `name` on the template, or else supplied by the
    /// resolution hooks.
    pub fn widget(&mut self, name: &str) -> Option<&mut Fragment> {
        if self.template.is_widget_bound(name) {
            return self.template.resolve_fragment_mut(name);
        }
        self.hooks.resolve_widget(name)
    }

    /// Render `text` as template text one nesting level down, with the same
    /// bindings and hooks as the current render.
    pub fn render_text(&mut self, text: &str) -> Result<String> {
        let scope = self.scope.descend()?;
        self.template.render_source(text, &mut *self.hooks, scope)
    }

    pub fn scope(&self) -> &RenderScope {
        &self.scope
    }
}

/// Wrap a closure as a [`TemplateFunction`].
pub fn function<F>(f: F) -> TemplateFunction
where
    F: Fn(&mut FunctionContext<'_>, &[Argument]) -> Result<Option<String>> + 'static,
{
    Rc::new(f)
}

// ---------------------------------------------------------------------------
// Standard functions
// ---------------------------------------------------------------------------

/// `${tr:key}`: localized string for `key`.
pub fn tr() -> TemplateFunction {
    function(|ctx, args| Ok(positional(args).next().map(|key| ctx.tr(key))))
}

/// `${id:name}`: element id of the widget bound to `name`.
pub fn id() -> TemplateFunction {
    function(|ctx, args| {
        let Some(name) = positional(args).next() else {
            return Ok(None);
        };
        Ok(ctx.widget(name).map(|fragment| fragment.id().to_owned()))
    })
}

/// `${block:key arg1 arg2 ...}`: the message `key` with `{1}`, `{2}`, ...
/// replaced by the following positional arguments, rendered as template text.
pub fn block() -> TemplateFunction {
    function(|ctx, args| {
        let mut values = positional(args);
        let Some(key) = values.next() else {
            return Ok(None);
        };
        let mut text = ctx.tr(key);
        for (i, value) in values.enumerate() {
            text = text.replace(&format!("{{{}}}", i + 1), value);
        }
        ctx.render_text(&text).map(Some)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::MessageBundle;
    use crate::template::resolver::NoHooks;
    use crate::template::{RenderConfig, TemplateError};
    use crate::widget::WidgetExt;
    use crate::widgets::Text;

    fn call(
        template: &mut Template,
        function: TemplateFunction,
        args: &[Argument],
    ) -> Result<Option<String>> {
        let mut hooks = NoHooks;
        let scope = RenderScope::root(*template.config());
        let mut ctx = FunctionContext::new(template, &mut hooks, scope);
        function(&mut ctx, args)
    }

    #[test]
    fn tr_looks_up_message() {
        let mut t = Template::new("");
        t.set_messages(MessageBundle::new().with("greeting", "Hello"));
        assert_eq!(
            call(&mut t, tr(), &[Argument::positional("greeting")]).unwrap(),
            Some("Hello".into())
        );
        assert_eq!(
            call(&mut t, tr(), &[Argument::positional("other")]).unwrap(),
            Some("??other??".into())
        );
    }

    #[test]
    fn tr_without_key_does_not_match() {
        let mut t = Template::new("");
        assert_eq!(call(&mut t, tr(), &[]).unwrap(), None);
    }

    #[test]
    fn id_of_bound_widget() {
        let mut t = Template::new("");
        t.bind_fragment("name", Text::new("x").with_id("field-1"));
        assert_eq!(
            call(&mut t, id(), &[Argument::positional("name")]).unwrap(),
            Some("field-1".into())
        );
        assert_eq!(
            call(&mut t, id(), &[Argument::positional("other")]).unwrap(),
            None
        );
    }

    #[test]
    fn block_substitutes_and_renders() {
        let mut t = Template::new("");
        t.set_messages(MessageBundle::new().with("row", "<li>{1}: ${value} ({2})</li>"));
        t.bind_string("value", "42");
        let args = [
            Argument::positional("row"),
            Argument::positional("answer"),
            Argument::positional("final"),
        ];
        assert_eq!(
            call(&mut t, block(), &args).unwrap(),
            Some("<li>answer: 42 (final)</li>".into())
        );
    }

    #[test]
    fn block_respects_depth_limit() {
        let mut t = Template::new("");
        t.set_config(RenderConfig::new().with_max_depth(0));
        t.set_messages(MessageBundle::new().with("row", "x"));
        assert_eq!(
            call(&mut t, block(), &[Argument::positional("row")]).unwrap_err(),
            TemplateError::DepthExceeded { limit: 0 }
        );
    }

    #[test]
    fn context_exposes_scope_and_messages() {
        let mut t = Template::new("");
        t.set_messages(MessageBundle::new().with("k", "v"));
        let mut hooks = NoHooks;
        let ctx = FunctionContext::new(&mut t, &mut hooks, RenderScope::root(RenderConfig::new()));
        assert_eq!(ctx.scope().depth(), 0);
        assert_eq!(ctx.message("k"), Some("v"));
        assert_eq!(ctx.message("missing"), None);
    }
}
