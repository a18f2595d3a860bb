//! Conditional block tracking.
//!
//! [`ConditionalStack`] holds the names of the blocks open at the current
//! point of a render, plus the depth at which output suppression began. Once a
//! false block opens, everything up to its matching close is hidden, whatever
//! the truth values of blocks nested inside it.

use super::error::{Result, TemplateError, UnbalancedKind};

/// Open conditional blocks for one render pass.
#[derive(Debug, Default)]
pub struct ConditionalStack {
    open: Vec<String>,
    /// Stack depth of the block that started suppression, or 0.
    suppression_depth: usize,
}

impl ConditionalStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a block. A false `value` starts suppression unless it is already
    /// active.
    pub fn open(&mut self, name: impl Into<String>, value: bool) {
        self.open.push(name.into());
        if !value && self.suppression_depth == 0 {
            self.suppression_depth = self.open.len();
        }
    }

    /// Close the innermost block, which must be named `name`.
    pub fn close(&mut self, name: &str, offset: usize) -> Result<()> {
        match self.open.last() {
            None => {
                return Err(TemplateError::unbalanced(
                    offset,
                    UnbalancedKind::UnexpectedClose {
                        name: name.to_owned(),
                    },
                ));
            }
            Some(top) if top != name => {
                return Err(TemplateError::unbalanced(
                    offset,
                    UnbalancedKind::Mismatched {
                        expected: top.clone(),
                        found: name.to_owned(),
                    },
                ));
            }
            Some(_) => {}
        }

        let depth = self.open.len();
        self.open.pop();
        if depth <= self.suppression_depth {
            self.suppression_depth = 0;
        }
        Ok(())
    }

    /// Whether output is currently hidden.
    pub fn is_suppressed(&self) -> bool {
        self.suppression_depth > 0
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Check that every block was closed. `offset` is the end of the text.
    pub fn finish(self, offset: usize) -> Result<()> {
        match self.open.last() {
            Some(name) => Err(TemplateError::unbalanced(
                offset,
                UnbalancedKind::Unclosed { name: name.clone() },
            )),
            None => Ok(()),
        }
    }
}
