//! Shared state threaded through the handler chain.

use crate::registry::WidgetRegistry;
use crate::report::ExceptionHandler;
use forge_model::component::ComponentRegistry;
use forge_model::config::ForgeConfig;

/// Borrowed collaborators every handler needs. The reporter is the only
/// piece handlers mutate; the rest is read-only for the whole build.
pub struct RenderContext<'a> {
    pub components: &'a ComponentRegistry,
    pub widgets: &'a WidgetRegistry,
    pub config: &'a ForgeConfig,
    pub reporter: &'a mut ExceptionHandler,
    /// Value classes currently being recursed into; guards against
    /// container declarations that reference themselves.
    pub(crate) class_stack: Vec<String>,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        components: &'a ComponentRegistry,
        widgets: &'a WidgetRegistry,
        config: &'a ForgeConfig,
        reporter: &'a mut ExceptionHandler,
    ) -> Self {
        Self {
            components,
            widgets,
            config,
            reporter,
            class_stack: Vec::new(),
        }
    }
}
