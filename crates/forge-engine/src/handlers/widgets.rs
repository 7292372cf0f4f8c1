//! Per-widget attribute emission.
//!
//! Each built-in kind maps to a Granite UI resource type plus its specific
//! attributes. Container kinds delegate to [`super::containers`]; custom
//! kinds go through the registered handler or fall back to a verbatim
//! property mapping.

use crate::context::RenderContext;
use crate::error::PluginError;
use crate::source::Source;
use chrono::DateTime;
use forge_model::PropertyValue;
use forge_model::widget::{
    AlertDef, AnchorButtonDef, ButtonDef, CheckboxDef, ColorFieldDef, CustomWidgetDef,
    DatePickerDef, FileUploadDef, HeadingDef, HiddenDef, ImageUploadDef, NumberFieldDef, OptionDef,
    PasswordDef, PathFieldDef, RadioGroupDef, RichTextEditorDef, SelectDef, SwitchDef, TextAreaDef,
    TextFieldDef, WidgetDef, WidgetKind,
};
use forge_target::Target;

use super::containers;
use super::properties::{PRIMARY_TYPE, RESOURCE_TYPE, UNSTRUCTURED};

/// Granite resource type for a built-in kind. `Custom` has none.
pub fn resource_type(kind: WidgetKind) -> Option<&'static str> {
    Some(match kind {
        WidgetKind::TextField => "granite/ui/components/coral/foundation/form/textfield",
        WidgetKind::TextArea => "granite/ui/components/coral/foundation/form/textarea",
        WidgetKind::RichTextEditor => "cq/gui/components/authoring/dialog/richtext",
        WidgetKind::Checkbox => "granite/ui/components/coral/foundation/form/checkbox",
        WidgetKind::Switch => "granite/ui/components/coral/foundation/form/switch",
        WidgetKind::Select => "granite/ui/components/coral/foundation/form/select",
        WidgetKind::RadioGroup => "granite/ui/components/coral/foundation/form/radiogroup",
        WidgetKind::DatePicker => "granite/ui/components/coral/foundation/form/datepicker",
        WidgetKind::NumberField => "granite/ui/components/coral/foundation/form/numberfield",
        WidgetKind::PathField => "granite/ui/components/coral/foundation/form/pathfield",
        WidgetKind::ColorField => "granite/ui/components/coral/foundation/form/colorfield",
        WidgetKind::Password => "granite/ui/components/coral/foundation/form/password",
        WidgetKind::Hidden => "granite/ui/components/coral/foundation/form/hidden",
        WidgetKind::FileUpload => "granite/ui/components/coral/foundation/form/fileupload",
        WidgetKind::ImageUpload => "cq/gui/components/authoring/dialog/fileupload",
        WidgetKind::Button => "granite/ui/components/coral/foundation/button",
        WidgetKind::AnchorButton => "granite/ui/components/coral/foundation/anchorbutton",
        WidgetKind::Heading => "granite/ui/components/coral/foundation/heading",
        WidgetKind::Alert => "granite/ui/components/coral/foundation/alert",
        WidgetKind::Tabs => "granite/ui/components/coral/foundation/tabs",
        WidgetKind::Accordion => "granite/ui/components/coral/foundation/accordion",
        WidgetKind::FieldSet => "granite/ui/components/coral/foundation/form/fieldset",
        WidgetKind::MultiField => "granite/ui/components/coral/foundation/form/multifield",
        WidgetKind::Custom => return None,
    })
}

/// Whether a kind submits a value (and therefore carries name/label/value).
pub fn holds_value(kind: WidgetKind) -> bool {
    !kind.is_container()
        && !matches!(
            kind,
            WidgetKind::Button | WidgetKind::AnchorButton | WidgetKind::Heading | WidgetKind::Alert
        )
}

/// Render the resolved widget onto the member node.
pub fn render(
    source: &Source,
    resolved: Option<&WidgetDef>,
    ctx: &mut RenderContext<'_>,
    node: &mut Target,
) -> Result<(), PluginError> {
    let Some(widget) = resolved else {
        return Ok(());
    };
    if let Some(rt) = resource_type(widget.kind()) {
        node.attribute(RESOURCE_TYPE, rt);
    }
    match widget {
        WidgetDef::TextField(def) => text_field(def, node),
        WidgetDef::TextArea(def) => text_area(def, node),
        WidgetDef::RichTextEditor(def) => rich_text(def, node),
        WidgetDef::Checkbox(def) => checkbox(def, node),
        WidgetDef::Switch(def) => switch(def, node),
        WidgetDef::Select(def) => select(def, node),
        WidgetDef::RadioGroup(def) => radio_group(def, node),
        WidgetDef::DatePicker(def) => date_picker(def, source, ctx, node)?,
        WidgetDef::NumberField(def) => number_field(def, node),
        WidgetDef::PathField(def) => path_field(def, node),
        WidgetDef::ColorField(def) => color_field(def, node),
        WidgetDef::Password(def) => password(def, source, ctx, node),
        WidgetDef::Hidden(def) => hidden(def, node),
        WidgetDef::FileUpload(def) => file_upload(def, node),
        WidgetDef::ImageUpload(def) => image_upload(def, node),
        WidgetDef::Button(def) => button(def, node),
        WidgetDef::AnchorButton(def) => anchor_button(def, node),
        WidgetDef::Heading(def) => heading(def, node),
        WidgetDef::Alert(def) => alert(def, node),
        WidgetDef::Tabs(def) => containers::tabs::render(def, source, ctx, node)?,
        WidgetDef::Accordion(def) => containers::accordion::render(def, source, ctx, node)?,
        WidgetDef::FieldSet(def) => containers::fieldset::render(def, source, ctx, node)?,
        WidgetDef::MultiField(def) => containers::multifield::render(def, source, ctx, node)?,
        WidgetDef::Custom(def) => custom(def, source, ctx, node)?,
    }
    Ok(())
}

fn text_field(def: &TextFieldDef, node: &mut Target) {
    node.attribute_opt("emptyText", def.empty_text.clone());
    node.attribute_opt("maxlength", def.max_length);
}

fn text_area(def: &TextAreaDef, node: &mut Target) {
    node.attribute_opt("emptyText", def.empty_text.clone());
    node.attribute_opt("rows", def.rows);
    node.attribute_opt("cols", def.cols);
}

fn rich_text(def: &RichTextEditorDef, node: &mut Target) {
    if def.use_fixed_inline_toolbar {
        node.attribute("useFixedInlineToolbar", true);
    }
    if !def.features.is_empty() {
        // Feature tokens land on the rtePlugins child, one node per plugin.
        let plugins = node.get_or_create_child("rtePlugins");
        plugins.attribute(PRIMARY_TYPE, UNSTRUCTURED);
        for feature in &def.features {
            let Some((plugin, feature)) = feature.split_once('#') else {
                continue;
            };
            let entry = plugins.get_or_create_child(plugin);
            entry.attribute(PRIMARY_TYPE, UNSTRUCTURED);
            let features = match entry.remove_attribute("features") {
                Some(PropertyValue::StringArray(mut items)) => {
                    items.push(feature.to_string());
                    items
                }
                _ => vec![feature.to_string()],
            };
            entry.attribute("features", PropertyValue::StringArray(features));
        }
    }
}

fn checkbox(def: &CheckboxDef, node: &mut Target) {
    node.attribute_opt("text", def.text.clone());
    node.attribute_opt("checked", def.checked);
    node.attribute("value", "true");
    node.attribute("uncheckedValue", "false");
}

fn switch(def: &SwitchDef, node: &mut Target) {
    node.attribute_opt("checked", def.checked);
    node.attribute_opt("onText", def.on_text.clone());
    node.attribute_opt("offText", def.off_text.clone());
}

fn option_items(options: &[OptionDef], node: &mut Target) {
    let items = node.get_or_create_child("items");
    items.attribute(PRIMARY_TYPE, UNSTRUCTURED);
    for option in options {
        let name = forge_target::unique_name(&option.value, "item", items);
        let item = items.add_child(Target::new(name));
        item.attribute(PRIMARY_TYPE, UNSTRUCTURED);
        item.attribute("text", option.text.clone());
        item.attribute("value", option.value.clone());
        if option.selected {
            item.attribute("selected", true);
        }
    }
}

fn select(def: &SelectDef, node: &mut Target) {
    if def.multiple {
        node.attribute("multiple", true);
    }
    if def.empty_option {
        node.attribute("emptyOption", true);
    }
    if let Some(path) = &def.datasource {
        let datasource = node.get_or_create_child("datasource");
        datasource.attribute(PRIMARY_TYPE, UNSTRUCTURED);
        datasource.attribute(RESOURCE_TYPE, path.clone());
    } else {
        option_items(&def.options, node);
    }
}

fn radio_group(def: &RadioGroupDef, node: &mut Target) {
    if def.vertical {
        node.attribute("vertical", true);
    }
    option_items(&def.buttons, node);
}

/// Min/max bounds are authored as strings and validated here; an unparsable
/// bound is reported and its attribute omitted, the rest of the widget
/// renders normally.
fn date_picker(
    def: &DatePickerDef,
    source: &Source,
    ctx: &mut RenderContext<'_>,
    node: &mut Target,
) -> Result<(), PluginError> {
    node.attribute("type", "date");
    node.attribute_opt("displayedFormat", def.display_format.clone());
    node.attribute_opt("valueFormat", def.value_format.clone());
    for (attr, bound) in [("minDate", &def.min), ("maxDate", &def.max)] {
        let Some(bound) = bound else { continue };
        if DateTime::parse_from_rfc3339(bound).is_ok() {
            node.attribute(attr, bound.clone());
        } else {
            ctx.reporter.handle(PluginError::validation(
                &source.field.name,
                format!("'{bound}' is not a valid ISO-8601 date for {attr}"),
            ))?;
        }
    }
    Ok(())
}

fn number_field(def: &NumberFieldDef, node: &mut Target) {
    node.attribute_opt("min", def.min);
    node.attribute_opt("max", def.max);
    node.attribute_opt("step", def.step);
}

fn path_field(def: &PathFieldDef, node: &mut Target) {
    node.attribute_opt("rootPath", def.root_path.clone());
    node.attribute_opt("filter", def.filter.clone());
}

fn color_field(def: &ColorFieldDef, node: &mut Target) {
    node.attribute_opt("variant", def.variant.clone());
    if !def.default_colors.is_empty() {
        let items = node.get_or_create_child("items");
        items.attribute(PRIMARY_TYPE, UNSTRUCTURED);
        for color in &def.default_colors {
            let name = forge_target::unique_name(color, "color", items);
            let item = items.add_child(Target::new(name));
            item.attribute(PRIMARY_TYPE, UNSTRUCTURED);
            item.attribute("value", color.clone());
        }
    }
}

/// A retype companion renders as a sibling reference so the front end can
/// compare the two inputs.
fn password(def: &PasswordDef, source: &Source, ctx: &RenderContext<'_>, node: &mut Target) {
    if let Some(retype) = &def.retype {
        let companion = Source::new(source.class_name(), {
            let mut field = source.field.clone();
            field.name = retype.clone();
            field
        });
        node.attribute("retype", super::dialog_field::submit_name(&companion, ctx));
    }
}

fn hidden(def: &HiddenDef, node: &mut Target) {
    node.attribute_opt("value", def.value.clone());
}

fn file_upload(def: &FileUploadDef, node: &mut Target) {
    if !def.mime_types.is_empty() {
        node.attribute("mimeTypes", PropertyValue::StringArray(def.mime_types.clone()));
    }
    node.attribute_opt("sizeLimit", def.size_limit);
    node.attribute_opt("uploadUrl", def.upload_url.clone());
}

fn image_upload(def: &ImageUploadDef, node: &mut Target) {
    if !def.mime_types.is_empty() {
        node.attribute("mimeTypes", PropertyValue::StringArray(def.mime_types.clone()));
    }
    node.attribute_opt("title", def.title.clone());
}

fn button(def: &ButtonDef, node: &mut Target) {
    node.attribute_opt("text", def.text.clone());
    node.attribute_opt("variant", def.variant.clone());
    node.attribute_opt("command", def.command.clone());
}

fn anchor_button(def: &AnchorButtonDef, node: &mut Target) {
    node.attribute_opt("text", def.text.clone());
    node.attribute_opt("href", def.href.clone());
}

fn heading(def: &HeadingDef, node: &mut Target) {
    node.attribute_opt("text", def.text.clone());
    node.attribute_opt("level", def.level);
}

fn alert(def: &AlertDef, node: &mut Target) {
    node.attribute_opt("text", def.text.clone());
    node.attribute_opt("variant", def.variant.clone());
}

/// A registered handler takes over entirely; without one the property bag is
/// mapped onto the node as-is.
fn custom(
    def: &CustomWidgetDef,
    source: &Source,
    ctx: &mut RenderContext<'_>,
    node: &mut Target,
) -> Result<(), PluginError> {
    node.attribute_opt(RESOURCE_TYPE, def.resource_type.clone());
    if let Some(handler) = ctx.widgets.custom_handler(&def.marker) {
        return handler.render(def, source, node);
    }
    tracing::debug!(marker = %def.marker, "no custom handler registered, mapping properties");
    for (name, value) in &def.properties {
        node.attribute(name.clone(), value.clone());
    }
    Ok(())
}

/// Generic layout container, used for tab panels and composite multi-fields.
pub(crate) const CONTAINER_RT: &str = "granite/ui/components/coral/foundation/container";
