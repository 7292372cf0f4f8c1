//! Tabbed container rendering.

use crate::context::RenderContext;
use crate::error::PluginError;
use crate::source::Source;
use forge_model::widget::{PanelDef, TabsDef};
use forge_target::Target;

use super::{ContainerBucket, partition, render_buckets, resolve_class_sources};

pub fn render(
    def: &TabsDef,
    source: &Source,
    ctx: &mut RenderContext<'_>,
    node: &mut Target,
) -> Result<(), PluginError> {
    let class = def.value_class.as_deref();
    let sources = match class {
        Some(class) => {
            resolve_class_sources(class, &source.field.ignore, ctx)?.unwrap_or_default()
        }
        None => Vec::new(),
    };

    let class_name = class.unwrap_or_else(|| source.class_name());
    let buckets = bucketize(&def.tabs, class_name, sources, ctx)?;

    if let Some(class) = class {
        ctx.class_stack.push(class.to_string());
        let rendered = render_buckets(buckets, ctx, node);
        ctx.class_stack.pop();
        rendered
    } else {
        render_buckets(buckets, ctx, node)
    }
}

/// Bucket members over the declared tabs. A tabs container with no tab
/// declarations is reported, then rescued with a single synthetic tab so its
/// members still render somewhere visible.
pub(crate) fn bucketize(
    tabs: &[PanelDef],
    class_name: &str,
    sources: Vec<Source>,
    ctx: &mut RenderContext<'_>,
) -> Result<Vec<ContainerBucket>, PluginError> {
    if !tabs.is_empty() {
        return Ok(partition(tabs, class_name, sources));
    }
    ctx.reporter.handle(PluginError::InvalidSetting(format!(
        "tabs container on '{class_name}' declares no tabs"
    )))?;
    let fallback = vec![PanelDef::new(&ctx.config.naming.default_tab_title)];
    Ok(partition(&fallback, class_name, sources))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::WidgetRegistry;
    use crate::report::ExceptionHandler;
    use forge_model::component::{ComponentDef, ComponentRegistry, FieldDef};
    use forge_model::config::ForgeConfig;
    use forge_model::widget::{TextFieldDef, WidgetDef};

    #[test]
    fn test_zero_tabs_produces_synthetic_bucket() {
        let mut backing = ComponentDef::new("Meta");
        backing.fields.push(
            FieldDef::new("keywords").with_widget(WidgetDef::TextField(TextFieldDef::default())),
        );
        let mut components = ComponentRegistry::new();
        components.insert(backing);
        let widgets = WidgetRegistry::new();
        let config = ForgeConfig::default();
        let mut reporter = ExceptionHandler::default();

        let mut node = Target::new("meta");
        {
            let mut ctx = RenderContext::new(&components, &widgets, &config, &mut reporter);
            let def = TabsDef {
                value_class: Some("Meta".to_string()),
                ..TabsDef::default()
            };
            let source = Source::new("Page", FieldDef::new("meta"));
            render(&def, &source, &mut ctx, &mut node).unwrap();
        }

        assert_eq!(reporter.reports().len(), 1);
        let items = node.child("items").unwrap();
        assert_eq!(items.children().len(), 1);
        let tab = &items.children()[0];
        assert_eq!(
            tab.attr("jcr:title").and_then(|v| v.as_plain_str()),
            Some("newTab")
        );
        assert!(tab.child("items").unwrap().child("keywords").is_some());
    }

    #[test]
    fn test_recursive_value_class_is_reported() {
        let mut class = ComponentDef::new("Loop");
        class.fields.push(
            FieldDef::new("again").with_widget(WidgetDef::Tabs(forge_model::widget::TabsDef {
                tabs: vec![PanelDef::new("One")],
                value_class: Some("Loop".to_string()),
            })),
        );
        let mut components = ComponentRegistry::new();
        components.insert(class);
        let widgets = WidgetRegistry::new();
        let config = ForgeConfig::default();
        let mut reporter = ExceptionHandler::default();

        let mut node = Target::new("outer");
        {
            let mut ctx = RenderContext::new(&components, &widgets, &config, &mut reporter);
            let def = TabsDef {
                tabs: vec![PanelDef::new("One")],
                value_class: Some("Loop".to_string()),
            };
            let source = Source::new("Page", FieldDef::new("outer"));
            render(&def, &source, &mut ctx, &mut node).unwrap();
        }
        // The nested tabs inside "Loop" hit the recursion guard.
        assert!(
            reporter
                .reports()
                .iter()
                .any(|r| r.to_string().contains("recursion"))
        );
    }
}
