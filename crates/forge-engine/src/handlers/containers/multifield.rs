//! Multi-field rendering: a repeating group backed by a value class.
//!
//! A single-member backing class renders that member directly as the
//! repeated widget; a multi-member class renders a composite with one
//! sub-node per member.

use crate::context::RenderContext;
use crate::error::PluginError;
use crate::source::Source;
use forge_model::widget::MultiFieldDef;
use forge_target::Target;

use super::super::dialog_field::submit_name;
use super::super::properties::{PRIMARY_TYPE, RESOURCE_TYPE, UNSTRUCTURED};
use super::super::widgets::CONTAINER_RT;
use super::{render_member_node, resolve_class_sources};

pub fn render(
    def: &MultiFieldDef,
    source: &Source,
    ctx: &mut RenderContext<'_>,
    node: &mut Target,
) -> Result<(), PluginError> {
    node.attribute_opt("fieldLabel", source.field.label.clone());
    node.attribute_opt("fieldDescription", source.field.description.clone());

    let Some(sources) = resolve_class_sources(&def.value_class, &source.field.ignore, ctx)? else {
        return Ok(());
    };
    if sources.is_empty() {
        ctx.reporter.handle(PluginError::InvalidSetting(format!(
            "multi-field on '{}' resolved to no members in '{}'",
            source.field.name, def.value_class
        )))?;
        return Ok(());
    }

    ctx.class_stack.push(def.value_class.clone());
    let rendered = render_members(&sources, source, ctx, node);
    ctx.class_stack.pop();
    rendered
}

fn render_members(
    sources: &[Source],
    source: &Source,
    ctx: &mut RenderContext<'_>,
    node: &mut Target,
) -> Result<(), PluginError> {
    if let [member] = sources {
        // Simple form: the lone member is the repeated widget, submitting
        // under the multi-field's own name rather than its declared one.
        let mut inner = Target::new("field");
        super::super::run_member(member, ctx, &mut inner)?;
        inner.attribute("name", submit_name(source, ctx));
        node.add_child(inner);
        return Ok(());
    }

    node.attribute("composite", true);
    let mut inner = Target::new("field");
    inner.attribute(PRIMARY_TYPE, UNSTRUCTURED);
    inner.attribute(RESOURCE_TYPE, CONTAINER_RT);
    inner.attribute("name", submit_name(source, ctx));
    let mut items = Target::new("items");
    items.attribute(PRIMARY_TYPE, UNSTRUCTURED);
    for member in sources {
        // Composite instance names are resolved against the instance node,
        // so a leading ./ would double up.
        render_member_node(&member.with_stripped_relative(), ctx, &mut items)?;
    }
    inner.add_child(items);
    node.add_child(inner);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::WidgetRegistry;
    use crate::report::ExceptionHandler;
    use forge_model::PropertyValue;
    use forge_model::component::{ComponentDef, ComponentRegistry, FieldDef};
    use forge_model::config::ForgeConfig;
    use forge_model::widget::{TextFieldDef, WidgetDef};

    fn render_multi(
        components: &ComponentRegistry,
        class: &str,
        field_name: &str,
    ) -> (Target, ExceptionHandler) {
        let widgets = WidgetRegistry::new();
        let config = ForgeConfig::default();
        let mut reporter = ExceptionHandler::default();
        let mut node = Target::new(field_name);
        {
            let mut ctx = RenderContext::new(components, &widgets, &config, &mut reporter);
            let def = MultiFieldDef {
                value_class: class.to_string(),
            };
            let source = Source::new("Page", FieldDef::new(field_name));
            render(&def, &source, &mut ctx, &mut node).unwrap();
        }
        (node, reporter)
    }

    #[test]
    fn test_single_member_renders_direct_form() {
        let mut components = ComponentRegistry::new();
        components.insert(ComponentDef::new("Tag").with_field(
            FieldDef::new("value").with_widget(WidgetDef::TextField(TextFieldDef::default())),
        ));
        let (node, _) = render_multi(&components, "Tag", "tags");

        assert!(node.attr("composite").is_none());
        let inner = node.child("field").unwrap();
        // The member's own name is overridden with the multi-field's.
        assert_eq!(inner.attr("name").and_then(|v| v.as_plain_str()), Some("./tags"));
        assert_eq!(
            inner.attr(RESOURCE_TYPE).and_then(|v| v.as_plain_str()),
            Some("granite/ui/components/coral/foundation/form/textfield")
        );
    }

    #[test]
    fn test_multi_member_renders_composite() {
        let mut components = ComponentRegistry::new();
        components.insert(
            ComponentDef::new("Link")
                .with_field(
                    FieldDef::new("./url")
                        .with_widget(WidgetDef::TextField(TextFieldDef::default())),
                )
                .with_field(
                    FieldDef::new("text")
                        .with_widget(WidgetDef::TextField(TextFieldDef::default())),
                ),
        );
        let (node, _) = render_multi(&components, "Link", "links");

        assert_eq!(node.attr("composite"), Some(&PropertyValue::Boolean(true)));
        let inner = node.child("field").unwrap();
        assert_eq!(inner.attr("name").and_then(|v| v.as_plain_str()), Some("./links"));
        let items = inner.child("items").unwrap();
        assert_eq!(items.children().len(), 2);
        // The doubly-relative ./url lost its prefix inside the composite.
        assert_eq!(
            items.children()[0].attr("name").and_then(|v| v.as_plain_str()),
            Some("./url")
        );
    }

    #[test]
    fn test_empty_backing_class_reported() {
        let mut components = ComponentRegistry::new();
        components.insert(ComponentDef::new("Empty"));
        let (node, reporter) = render_multi(&components, "Empty", "rows");

        assert!(node.child("field").is_none());
        assert_eq!(reporter.reports().len(), 1);
    }
}
