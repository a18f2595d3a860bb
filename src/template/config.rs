//! Render limits.
//!
//! Widgets and functions may render further template text (a bound
//! [`Template`](super::Template), the `block` function), so every render
//! carries a [`RenderScope`] that counts nesting and enforces the limits of
//! its [`RenderConfig`].

use super::error::{Result, TemplateError};

// ---------------------------------------------------------------------------
// RenderConfig
// ---------------------------------------------------------------------------

/// Limits applied to a render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Maximum nesting of template renders inside one another.
    pub max_depth: usize,
    /// Maximum size of one rendered text in bytes. `None` means unbounded.
    pub max_output: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 16,
            max_output: None,
        }
    }
}

impl RenderConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nesting limit (builder).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the output size limit (builder).
    pub fn with_max_output(mut self, max_output: usize) -> Self {
        self.max_output = Some(max_output);
        self
    }

    /// The tighter of each limit in `self` and `other`.
    pub fn stricter(self, other: RenderConfig) -> Self {
        let max_output = match (self.max_output, other.max_output) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        Self {
            max_depth: self.max_depth.min(other.max_depth),
            max_output,
        }
    }
}

// ---------------------------------------------------------------------------
// RenderScope
// ---------------------------------------------------------------------------

/// Nesting level of the render in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderScope {
    depth: usize,
    config: RenderConfig,
}

impl RenderScope {
    /// Scope of a top-level render.
    pub fn root(config: RenderConfig) -> Self {
        Self { depth: 0, config }
    }

    /// Scope for a render nested inside this one.
    pub fn descend(&self) -> Result<Self> {
        let depth = self.depth + 1;
        if depth > self.config.max_depth {
            return Err(TemplateError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }
        Ok(Self {
            depth,
            config: self.config,
        })
    }

    /// Same depth, limited further by `config`.
    pub fn restrict(self, config: RenderConfig) -> Self {
        Self {
            depth: self.depth,
            config: self.config.stricter(config),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Append-only output buffer that enforces `max_output`.
#[derive(Debug)]
pub(crate) struct Output {
    buf: String,
    limit: Option<usize>,
}

impl Output {
    pub(crate) fn new(scope: &RenderScope) -> Self {
        Self {
            buf: String::new(),
            limit: scope.config.max_output,
        }
    }

    pub(crate) fn push_str(&mut self, text: &str) -> Result<()> {
        if let Some(limit) = self.limit {
            if self.buf.len() + text.len() > limit {
                return Err(TemplateError::OutputLimitExceeded { limit });
            }
        }
        self.buf.push_str(text);
        Ok(())
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}
