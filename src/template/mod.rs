//! Template engine: scanner, placeholder classifier, argument parser,
//! conditional blocks, and the resolution dispatcher.

pub mod args;
pub mod conditions;
pub mod config;
pub mod engine;
pub mod error;
pub mod functions;
pub mod placeholder;
pub mod resolver;
pub mod scanner;

pub use args::Argument;
pub use conditions::ConditionalStack;
pub use config::{RenderConfig, RenderScope};
pub use engine::Template;
pub use error::{MalformedKind, Result, TemplateError, UnbalancedKind};
pub use functions::{FunctionContext, TemplateFunction};
pub use placeholder::Placeholder;
pub use resolver::{NoHooks, Resolver};
pub use scanner::{Scanner, Segment, Span};
