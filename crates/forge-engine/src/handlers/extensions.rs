//! Extension hook dispatch.

use crate::context::RenderContext;
use crate::error::PluginError;
use crate::source::Source;
use forge_target::Target;

/// Run every registered hook matching the field's extension annotations.
/// Unregistered markers are skipped silently apart from a debug log, so
/// definitions stay portable across installations with different hook sets.
pub fn apply(
    source: &Source,
    ctx: &mut RenderContext<'_>,
    node: &mut Target,
) -> Result<(), PluginError> {
    for extension in &source.field.extensions {
        match ctx.widgets.hook(&extension.marker) {
            Some(hook) => hook.apply(&extension.properties, source, node)?,
            None => {
                tracing::debug!(marker = %extension.marker, "no extension hook registered");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ExtensionHook, WidgetRegistry};
    use crate::report::ExceptionHandler;
    use forge_model::PropertyValue;
    use forge_model::component::{ComponentRegistry, ExtensionDef, FieldDef};
    use forge_model::config::ForgeConfig;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    struct Stamp;

    impl ExtensionHook for Stamp {
        fn apply(
            &self,
            properties: &BTreeMap<String, PropertyValue>,
            _source: &Source,
            node: &mut Target,
        ) -> Result<(), PluginError> {
            for (name, value) in properties {
                node.attribute(name.clone(), value.clone());
            }
            Ok(())
        }
    }

    #[test]
    fn test_registered_hook_runs() {
        let components = ComponentRegistry::new();
        let mut widgets = WidgetRegistry::new();
        widgets.register_hook("stamp", Arc::new(Stamp));
        let config = ForgeConfig::default();
        let mut reporter = ExceptionHandler::default();
        let mut ctx = RenderContext::new(&components, &widgets, &config, &mut reporter);

        let mut extension = ExtensionDef {
            marker: "stamp".to_string(),
            ..ExtensionDef::default()
        };
        extension
            .properties
            .insert("stamped".to_string(), true.into());
        let mut field = FieldDef::new("title");
        field.extensions.push(extension);
        let source = Source::new("C", field);

        let mut node = Target::new("title");
        apply(&source, &mut ctx, &mut node).unwrap();
        assert_eq!(node.attr("stamped"), Some(&PropertyValue::Boolean(true)));
    }

    #[test]
    fn test_unregistered_hook_is_skipped() {
        let components = ComponentRegistry::new();
        let widgets = WidgetRegistry::new();
        let config = ForgeConfig::default();
        let mut reporter = ExceptionHandler::default();
        let mut ctx = RenderContext::new(&components, &widgets, &config, &mut reporter);

        let mut field = FieldDef::new("title");
        field.extensions.push(ExtensionDef {
            marker: "absent".to_string(),
            ..ExtensionDef::default()
        });
        let source = Source::new("C", field);

        let mut node = Target::new("title");
        apply(&source, &mut ctx, &mut node).unwrap();
        assert!(!node.has_attributes());
        assert!(!reporter.has_reports());
    }
}
