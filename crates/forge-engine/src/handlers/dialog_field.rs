//! Common dialog-field attributes: submit name, label, description,
//! required/disabled flags, and the default value.

use crate::context::RenderContext;
use crate::source::Source;
use forge_model::widget::WidgetDef;
use forge_target::{NamingMode, Target, valid_name};

use super::widgets;

pub fn apply(
    source: &Source,
    resolved: Option<&WidgetDef>,
    ctx: &RenderContext<'_>,
    node: &mut Target,
) {
    // Static and container widgets carry no submit value; labels and names
    // would be dead weight on them.
    if resolved.is_some_and(|w| !widgets::holds_value(w.kind())) {
        return;
    }

    node.attribute("name", submit_name(source, ctx));
    node.attribute_opt("fieldLabel", source.field.label.clone());
    node.attribute_opt("fieldDescription", source.field.description.clone());
    if source.field.required {
        node.attribute("required", true);
    }
    if source.field.disabled {
        node.attribute("disabled", true);
    }
    node.attribute_opt("value", source.field.default_value.clone());
}

/// The relative property path the widget submits to. The overlay-adjusted
/// field name is cleansed and anchored at the current resource.
pub fn submit_name(source: &Source, ctx: &RenderContext<'_>) -> String {
    let name = valid_name(
        &source.prefixed_name(),
        NamingMode::FieldName,
        &ctx.config.naming.default_field_name,
    );
    if name.starts_with("./") || name.starts_with("../") {
        name
    } else {
        format!("./{name}")
    }
}
