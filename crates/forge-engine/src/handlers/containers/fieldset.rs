//! Field-set rendering: another class's members grouped under a shared
//! submit-name prefix.

use crate::context::RenderContext;
use crate::error::PluginError;
use crate::source::Source;
use forge_model::widget::FieldSetDef;
use forge_target::{NamingMode, Target, valid_name};

use super::super::properties::{PRIMARY_TYPE, UNSTRUCTURED};
use super::{render_member_node, resolve_class_sources};

pub fn render(
    def: &FieldSetDef,
    source: &Source,
    ctx: &mut RenderContext<'_>,
    node: &mut Target,
) -> Result<(), PluginError> {
    let title = def.title.clone().or_else(|| source.field.label.clone());
    node.attribute_opt("jcr:title", title);

    let Some(sources) = resolve_class_sources(&def.value_class, &source.field.ignore, ctx)? else {
        return Ok(());
    };
    if sources.is_empty() {
        ctx.reporter.handle(PluginError::InvalidSetting(format!(
            "field set on '{}' resolved to no members in '{}'",
            source.field.name, def.value_class
        )))?;
        return Ok(());
    }

    let prefix = valid_name(
        def.name_prefix.as_deref().unwrap_or_default(),
        NamingMode::FieldPrefix,
        "",
    );
    let postfix = valid_name(
        def.name_postfix.as_deref().unwrap_or_default(),
        NamingMode::FieldPostfix,
        "",
    );

    let mut items = Target::new("items");
    items.attribute(PRIMARY_TYPE, UNSTRUCTURED);
    ctx.class_stack.push(def.value_class.clone());
    let rendered: Result<(), PluginError> = (|| {
        for member in &sources {
            // The surrounding overlay composes with this set's own affixes.
            let member = member
                .with_overlay(&source.name_prefix, &source.name_postfix)
                .with_overlay(&prefix, &postfix);
            render_member_node(&member, ctx, &mut items)?;
        }
        Ok(())
    })();
    ctx.class_stack.pop();
    rendered?;
    node.add_child(items);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::WidgetRegistry;
    use crate::report::ExceptionHandler;
    use forge_model::component::{ComponentDef, ComponentRegistry, FieldDef, MemberRef};
    use forge_model::config::ForgeConfig;
    use forge_model::widget::{TextFieldDef, WidgetDef};

    fn link_class() -> ComponentDef {
        ComponentDef::new("Link")
            .with_field(
                FieldDef::new("url").with_widget(WidgetDef::TextField(TextFieldDef::default())),
            )
            .with_field(
                FieldDef::new("text").with_widget(WidgetDef::TextField(TextFieldDef::default())),
            )
    }

    fn render_set(
        components: &ComponentRegistry,
        def: &FieldSetDef,
        field: FieldDef,
    ) -> (Target, ExceptionHandler) {
        let widgets = WidgetRegistry::new();
        let config = ForgeConfig::default();
        let mut reporter = ExceptionHandler::default();
        let mut node = Target::new("set");
        {
            let mut ctx = RenderContext::new(components, &widgets, &config, &mut reporter);
            let source = Source::new("Page", field);
            render(def, &source, &mut ctx, &mut node).unwrap();
        }
        (node, reporter)
    }

    #[test]
    fn test_prefix_applies_to_member_names() {
        let mut components = ComponentRegistry::new();
        components.insert(link_class());
        let def = FieldSetDef {
            value_class: "Link".to_string(),
            name_prefix: Some("primary/".to_string()),
            ..FieldSetDef::default()
        };
        let (node, reporter) = render_set(&components, &def, FieldDef::new("primaryLink"));

        let items = node.child("items").unwrap();
        let url = items.child("url").unwrap();
        assert_eq!(
            url.attr("name").and_then(|v| v.as_plain_str()),
            Some("./primary/url")
        );
        assert!(!reporter.has_reports());
    }

    #[test]
    fn test_field_level_ignore_filters_members() {
        let mut components = ComponentRegistry::new();
        components.insert(link_class());
        let def = FieldSetDef {
            value_class: "Link".to_string(),
            ..FieldSetDef::default()
        };
        let mut field = FieldDef::new("link");
        field.ignore.push(MemberRef::in_class("Link", "text"));
        let (node, _) = render_set(&components, &def, field);

        let items = node.child("items").unwrap();
        assert_eq!(items.children().len(), 1);
        assert!(items.child("url").is_some());
    }

    #[test]
    fn test_empty_member_set_reported_without_items() {
        let mut components = ComponentRegistry::new();
        components.insert(ComponentDef::new("Empty"));
        let def = FieldSetDef {
            value_class: "Empty".to_string(),
            ..FieldSetDef::default()
        };
        let (node, reporter) = render_set(&components, &def, FieldDef::new("nothing"));

        assert!(node.child("items").is_none());
        assert_eq!(reporter.reports().len(), 1);
        assert_eq!(reporter.reports()[0].kind(), "invalid_setting");
    }

    #[test]
    fn test_title_falls_back_to_label() {
        let mut components = ComponentRegistry::new();
        components.insert(link_class());
        let def = FieldSetDef {
            value_class: "Link".to_string(),
            ..FieldSetDef::default()
        };
        let (node, _) = render_set(&components, &def, FieldDef::new("link").with_label("Link"));
        assert_eq!(node.attr("jcr:title").and_then(|v| v.as_plain_str()), Some("Link"));
    }
}
