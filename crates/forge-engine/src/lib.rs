//! Dialog generation engine.
//!
//! Takes a loaded [`forge_model::ComponentRegistry`] and produces one
//! [`forge_target::Target`] tree pair per component: the component node and
//! its authoring dialog. Members are collected across the class hierarchy,
//! filtered and reordered by the authored directives, then rendered through
//! a fixed handler chain with container recursion.

pub mod context;
pub mod dialog;
pub mod error;
pub mod handlers;
pub mod ordering;
pub mod registry;
pub mod report;
pub mod source;

pub use context::RenderContext;
pub use dialog::{ComponentOutput, build_all, build_component};
pub use error::PluginError;
pub use registry::{CustomWidgetHandler, ExtensionHook, WidgetRegistry};
pub use report::{ExceptionHandler, TerminationPolicy};
pub use source::Source;
