//! Widget resolution and the extension seams.
//!
//! Built-in widgets are a closed set resolved by enumeration order. Custom
//! widgets and extension hooks are the two open seams: both are trait
//! objects registered under a marker string.

use crate::context::RenderContext;
use crate::error::PluginError;
use crate::source::Source;
use forge_model::widget::{CustomWidgetDef, WidgetDef, WidgetKind};
use forge_target::Target;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Renders a user-defined widget onto the member node.
///
/// Registered under the marker string of [`CustomWidgetDef`]; an unregistered
/// marker falls back to mapping the property bag directly onto the node.
pub trait CustomWidgetHandler: Send + Sync {
    fn render(
        &self,
        def: &CustomWidgetDef,
        source: &Source,
        node: &mut Target,
    ) -> Result<(), PluginError>;
}

/// Post-processes a member node after the built-in chain has run.
pub trait ExtensionHook: Send + Sync {
    fn apply(
        &self,
        properties: &BTreeMap<String, forge_model::PropertyValue>,
        source: &Source,
        node: &mut Target,
    ) -> Result<(), PluginError>;
}

/// Registered custom widget handlers and extension hooks, keyed by marker.
#[derive(Default, Clone)]
pub struct WidgetRegistry {
    custom: BTreeMap<String, Arc<dyn CustomWidgetHandler>>,
    hooks: BTreeMap<String, Arc<dyn ExtensionHook>>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_custom(
        &mut self,
        marker: impl Into<String>,
        handler: Arc<dyn CustomWidgetHandler>,
    ) {
        self.custom.insert(marker.into(), handler);
    }

    pub fn register_hook(&mut self, marker: impl Into<String>, hook: Arc<dyn ExtensionHook>) {
        self.hooks.insert(marker.into(), hook);
    }

    pub fn custom_handler(&self, marker: &str) -> Option<&Arc<dyn CustomWidgetHandler>> {
        self.custom.get(marker)
    }

    pub fn hook(&self, marker: &str) -> Option<&Arc<dyn ExtensionHook>> {
        self.hooks.get(marker)
    }
}

impl std::fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetRegistry")
            .field("custom", &self.custom.keys().collect::<Vec<_>>())
            .field("hooks", &self.hooks.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Pick the widget declaration that renders for `source`.
///
/// Built-in kinds win by [`WidgetKind::BUILT_IN`] order; a custom declaration
/// is consulted only when no built-in matched. More than one declaration on
/// the same member is reported as ambiguous before the winner renders, so a
/// strict policy can still abort the build.
pub fn resolve_widget<'a>(
    source: &'a Source,
    ctx: &mut RenderContext<'_>,
) -> Result<Option<&'a WidgetDef>, PluginError> {
    let widgets = &source.field.widgets;
    if widgets.is_empty() {
        return Ok(None);
    }
    if widgets.len() > 1 {
        ctx.reporter.handle(PluginError::AmbiguousWidget {
            member: source.field.name.clone(),
            kinds: widgets.iter().map(|w| w.kind().name().to_string()).collect(),
        })?;
    }
    for kind in WidgetKind::BUILT_IN {
        if let Some(widget) = widgets.iter().find(|w| w.kind() == kind) {
            return Ok(Some(widget));
        }
    }
    // Only custom declarations remain.
    Ok(widgets.iter().find(|w| w.kind() == WidgetKind::Custom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ExceptionHandler;
    use forge_model::component::{ComponentRegistry, FieldDef};
    use forge_model::config::ForgeConfig;
    use forge_model::widget::{HiddenDef, TextFieldDef};

    fn test_ctx<'a>(
        components: &'a ComponentRegistry,
        widgets: &'a WidgetRegistry,
        config: &'a ForgeConfig,
        reporter: &'a mut ExceptionHandler,
    ) -> RenderContext<'a> {
        RenderContext::new(components, widgets, config, reporter)
    }

    #[test]
    fn test_no_widget_declared() {
        let components = ComponentRegistry::new();
        let widgets = WidgetRegistry::new();
        let config = ForgeConfig::default();
        let mut reporter = ExceptionHandler::default();
        let mut ctx = test_ctx(&components, &widgets, &config, &mut reporter);

        let source = Source::new("C", FieldDef::new("plain"));
        let resolved = resolve_widget(&source, &mut ctx).unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn test_ambiguous_reported_first_wins() {
        let components = ComponentRegistry::new();
        let widgets = WidgetRegistry::new();
        let config = ForgeConfig::default();
        let mut reporter = ExceptionHandler::default();
        let mut ctx = test_ctx(&components, &widgets, &config, &mut reporter);

        let field = FieldDef::new("mixed")
            .with_widget(WidgetDef::Hidden(HiddenDef::default()))
            .with_widget(WidgetDef::TextField(TextFieldDef::default()));
        let source = Source::new("C", field);

        let resolved = resolve_widget(&source, &mut ctx).unwrap();
        // TextField precedes Hidden in resolution order regardless of the
        // declaration sequence.
        assert!(matches!(resolved, Some(WidgetDef::TextField(_))));
        assert_eq!(reporter.reports().len(), 1);
    }

    #[test]
    fn test_custom_resolves_when_alone() {
        let components = ComponentRegistry::new();
        let widgets = WidgetRegistry::new();
        let config = ForgeConfig::default();
        let mut reporter = ExceptionHandler::default();
        let mut ctx = test_ctx(&components, &widgets, &config, &mut reporter);

        let field = FieldDef::new("special").with_widget(WidgetDef::Custom(CustomWidgetDef {
            marker: "stars".to_string(),
            ..CustomWidgetDef::default()
        }));
        let source = Source::new("C", field);

        let resolved = resolve_widget(&source, &mut ctx).unwrap();
        assert!(matches!(resolved, Some(WidgetDef::Custom(_))));
        assert!(!reporter.has_reports());
    }
}
