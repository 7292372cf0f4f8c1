//! Component-level assembly: one definition in, two node trees out.
//!
//! Every component definition yields a `.content.xml` pair: the component
//! node itself and the authoring dialog beneath it. The dialog body follows
//! the declared layout; members flow through the ordering passes and the
//! handler chain.

use crate::context::RenderContext;
use crate::error::PluginError;
use crate::handlers::containers;
use crate::handlers::properties::{PRIMARY_TYPE, RESOURCE_TYPE, UNSTRUCTURED};
use crate::handlers::widgets;
use crate::ordering;
use forge_model::component::{ComponentDef, DialogLayout};
use forge_model::widget::WidgetKind;
use forge_target::Target;

const DIALOG_RT: &str = "cq/gui/components/authoring/dialog";

/// The rendered trees for one component.
#[derive(Debug, Clone)]
pub struct ComponentOutput {
    /// Component path relative to the apps root.
    pub path: String,
    /// Root of the component node document.
    pub content: Target,
    /// Root of the dialog document.
    pub dialog: Target,
}

/// Build the output pair for a single definition. Value classes (no path)
/// yield `None` after a report; they only exist to back containers.
pub fn build_component(
    def: &ComponentDef,
    ctx: &mut RenderContext<'_>,
) -> Result<Option<ComponentOutput>, PluginError> {
    let Some(path) = &def.path else {
        ctx.reporter.handle(PluginError::Definition(format!(
            "'{}' has no component path, nothing to generate",
            def.name
        )))?;
        return Ok(None);
    };
    tracing::debug!(component = %def.name, path = %path, "building dialog");

    if let Some(parent) = &def.extends
        && ctx.components.get(parent).is_none()
    {
        ctx.reporter.handle(PluginError::Definition(format!(
            "'{}' extends unknown class '{}'",
            def.name, parent
        )))?;
    }

    let title = def.title.clone().unwrap_or_else(|| def.name.clone());

    let mut content = Target::new("jcr:root");
    content.attribute(PRIMARY_TYPE, "cq:Component");
    content.attribute("jcr:title", title.clone());
    content.attribute_opt("jcr:description", def.description.clone());
    content.attribute_opt("componentGroup", def.group.clone());
    content.attribute_opt("sling:resourceSuperType", def.super_type.clone());

    let mut dialog = Target::new("jcr:root");
    dialog.attribute(PRIMARY_TYPE, UNSTRUCTURED);
    dialog.attribute("jcr:title", title);
    dialog.attribute(RESOURCE_TYPE, DIALOG_RT);
    for (name, value) in &def.properties {
        dialog.attribute(name.clone(), value.clone());
    }

    let sources = ordering::ordered_sources(ctx.components, &def.name, &[]);

    let body = dialog.add_child(Target::new("content"));
    body.attribute(PRIMARY_TYPE, UNSTRUCTURED);
    body.attribute(RESOURCE_TYPE, widgets::CONTAINER_RT);

    match &def.layout {
        DialogLayout::Default => {
            let mut items = Target::new("items");
            items.attribute(PRIMARY_TYPE, UNSTRUCTURED);
            for source in &sources {
                containers::render_member_node(source, ctx, &mut items)?;
            }
            body.add_child(items);
        }
        DialogLayout::Tabs { tabs } => {
            let items = body.add_child(Target::new("items"));
            items.attribute(PRIMARY_TYPE, UNSTRUCTURED);
            let layout = items.add_child(Target::new("tabs"));
            layout.attribute(PRIMARY_TYPE, UNSTRUCTURED);
            layout.attribute_opt(RESOURCE_TYPE, widgets::resource_type(WidgetKind::Tabs));
            let buckets = containers::tabs::bucketize(tabs, &def.name, sources, ctx)?;
            containers::render_buckets(buckets, ctx, layout)?;
        }
        DialogLayout::Accordion { panels } => {
            let items = body.add_child(Target::new("items"));
            items.attribute(PRIMARY_TYPE, UNSTRUCTURED);
            let layout = items.add_child(Target::new("accordion"));
            layout.attribute(PRIMARY_TYPE, UNSTRUCTURED);
            layout.attribute_opt(RESOURCE_TYPE, widgets::resource_type(WidgetKind::Accordion));
            if panels.is_empty() {
                ctx.reporter.handle(PluginError::InvalidSetting(format!(
                    "accordion layout on '{}' declares no panels",
                    def.name
                )))?;
            }
            let buckets = containers::partition(panels, &def.name, sources);
            containers::render_buckets(buckets, ctx, layout)?;
        }
    }

    Ok(Some(ComponentOutput {
        path: path.clone(),
        content,
        dialog,
    }))
}

/// Build every component in the registry, in stable name order.
pub fn build_all(ctx: &mut RenderContext<'_>) -> Result<Vec<ComponentOutput>, PluginError> {
    let components: Vec<ComponentDef> = ctx.components.components().cloned().collect();
    let mut outputs = Vec::with_capacity(components.len());
    for def in &components {
        if let Some(output) = build_component(def, ctx)? {
            outputs.push(output);
        }
    }
    Ok(outputs)
}
