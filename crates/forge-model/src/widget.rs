//! The closed widget vocabulary.
//!
//! Each widget kind corresponds to one authoring-dialog UI control. The enum
//! is the registry discriminant: when a field declares several widget
//! annotations at once, resolution scans [`WidgetKind::BUILT_IN`] in
//! declaration order and the first match wins.

use crate::value::PropertyValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Discriminant for the built-in widget set, in resolution precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    TextField,
    TextArea,
    RichTextEditor,
    Checkbox,
    Switch,
    Select,
    RadioGroup,
    DatePicker,
    NumberField,
    PathField,
    ColorField,
    Password,
    Hidden,
    FileUpload,
    ImageUpload,
    Button,
    AnchorButton,
    Heading,
    Alert,
    Tabs,
    Accordion,
    FieldSet,
    MultiField,
    Custom,
}

impl WidgetKind {
    /// Built-in kinds in resolution order. `Custom` is deliberately absent:
    /// custom annotations are consulted only after no built-in matches.
    pub const BUILT_IN: [Self; 23] = [
        Self::TextField,
        Self::TextArea,
        Self::RichTextEditor,
        Self::Checkbox,
        Self::Switch,
        Self::Select,
        Self::RadioGroup,
        Self::DatePicker,
        Self::NumberField,
        Self::PathField,
        Self::ColorField,
        Self::Password,
        Self::Hidden,
        Self::FileUpload,
        Self::ImageUpload,
        Self::Button,
        Self::AnchorButton,
        Self::Heading,
        Self::Alert,
        Self::Tabs,
        Self::Accordion,
        Self::FieldSet,
        Self::MultiField,
    ];

    /// Whether this kind holds other widgets.
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            Self::Tabs | Self::Accordion | Self::FieldSet | Self::MultiField
        )
    }

    /// Stable lowercase name, used in logs and ambiguity reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::TextField => "text_field",
            Self::TextArea => "text_area",
            Self::RichTextEditor => "rich_text_editor",
            Self::Checkbox => "checkbox",
            Self::Switch => "switch",
            Self::Select => "select",
            Self::RadioGroup => "radio_group",
            Self::DatePicker => "date_picker",
            Self::NumberField => "number_field",
            Self::PathField => "path_field",
            Self::ColorField => "color_field",
            Self::Password => "password",
            Self::Hidden => "hidden",
            Self::FileUpload => "file_upload",
            Self::ImageUpload => "image_upload",
            Self::Button => "button",
            Self::AnchorButton => "anchor_button",
            Self::Heading => "heading",
            Self::Alert => "alert",
            Self::Tabs => "tabs",
            Self::Accordion => "accordion",
            Self::FieldSet => "field_set",
            Self::MultiField => "multi_field",
            Self::Custom => "custom",
        }
    }
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A widget annotation as declared on a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WidgetDef {
    TextField(TextFieldDef),
    TextArea(TextAreaDef),
    RichTextEditor(RichTextEditorDef),
    Checkbox(CheckboxDef),
    Switch(SwitchDef),
    Select(SelectDef),
    RadioGroup(RadioGroupDef),
    DatePicker(DatePickerDef),
    NumberField(NumberFieldDef),
    PathField(PathFieldDef),
    ColorField(ColorFieldDef),
    Password(PasswordDef),
    Hidden(HiddenDef),
    FileUpload(FileUploadDef),
    ImageUpload(ImageUploadDef),
    Button(ButtonDef),
    AnchorButton(AnchorButtonDef),
    Heading(HeadingDef),
    Alert(AlertDef),
    Tabs(TabsDef),
    Accordion(AccordionDef),
    FieldSet(FieldSetDef),
    MultiField(MultiFieldDef),
    Custom(CustomWidgetDef),
}

impl WidgetDef {
    /// The discriminant for registry resolution.
    pub const fn kind(&self) -> WidgetKind {
        match self {
            Self::TextField(_) => WidgetKind::TextField,
            Self::TextArea(_) => WidgetKind::TextArea,
            Self::RichTextEditor(_) => WidgetKind::RichTextEditor,
            Self::Checkbox(_) => WidgetKind::Checkbox,
            Self::Switch(_) => WidgetKind::Switch,
            Self::Select(_) => WidgetKind::Select,
            Self::RadioGroup(_) => WidgetKind::RadioGroup,
            Self::DatePicker(_) => WidgetKind::DatePicker,
            Self::NumberField(_) => WidgetKind::NumberField,
            Self::PathField(_) => WidgetKind::PathField,
            Self::ColorField(_) => WidgetKind::ColorField,
            Self::Password(_) => WidgetKind::Password,
            Self::Hidden(_) => WidgetKind::Hidden,
            Self::FileUpload(_) => WidgetKind::FileUpload,
            Self::ImageUpload(_) => WidgetKind::ImageUpload,
            Self::Button(_) => WidgetKind::Button,
            Self::AnchorButton(_) => WidgetKind::AnchorButton,
            Self::Heading(_) => WidgetKind::Heading,
            Self::Alert(_) => WidgetKind::Alert,
            Self::Tabs(_) => WidgetKind::Tabs,
            Self::Accordion(_) => WidgetKind::Accordion,
            Self::FieldSet(_) => WidgetKind::FieldSet,
            Self::MultiField(_) => WidgetKind::MultiField,
            Self::Custom(_) => WidgetKind::Custom,
        }
    }
}

/// Single-line text input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFieldDef {
    pub empty_text: Option<String>,
    pub max_length: Option<i64>,
}

/// Multi-line plain text input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextAreaDef {
    pub empty_text: Option<String>,
    pub rows: Option<i64>,
    pub cols: Option<i64>,
}

/// Rich text editor with a configurable feature set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RichTextEditorDef {
    pub features: Vec<String>,
    pub use_fixed_inline_toolbar: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckboxDef {
    pub text: Option<String>,
    pub checked: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchDef {
    pub checked: Option<bool>,
    pub on_text: Option<String>,
    pub off_text: Option<String>,
}

/// One entry of a select or radio-group option list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionDef {
    pub text: String,
    pub value: String,
    pub selected: bool,
}

impl OptionDef {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
            selected: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectDef {
    pub options: Vec<OptionDef>,
    pub empty_option: bool,
    pub multiple: bool,
    /// Resource path of an external option datasource; renders a datasource
    /// child node instead of inline items.
    pub datasource: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioGroupDef {
    pub buttons: Vec<OptionDef>,
    pub vertical: bool,
}

/// Date picker; `min`/`max` are ISO-8601 strings validated at render time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatePickerDef {
    pub display_format: Option<String>,
    pub value_format: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFieldDef {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathFieldDef {
    pub root_path: Option<String>,
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorFieldDef {
    pub variant: Option<String>,
    pub default_colors: Vec<String>,
}

/// Password input, optionally paired with a retype companion field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordDef {
    pub retype: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HiddenDef {
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUploadDef {
    pub mime_types: Vec<String>,
    pub size_limit: Option<i64>,
    pub upload_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageUploadDef {
    pub mime_types: Vec<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonDef {
    pub text: Option<String>,
    pub variant: Option<String>,
    pub command: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorButtonDef {
    pub text: Option<String>,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingDef {
    pub text: Option<String>,
    pub level: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertDef {
    pub text: Option<String>,
    pub variant: Option<String>,
}

/// One tab or accordion panel declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelDef {
    pub title: String,
    /// Extra attributes merged onto the panel node.
    pub attributes: BTreeMap<String, PropertyValue>,
    /// Members declared inline on the panel. Field-placed members landing in
    /// the same bucket trigger a combined re-sort.
    pub members: Vec<crate::component::FieldDef>,
}

impl PanelDef {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Nested tab container backed by another definition class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsDef {
    pub tabs: Vec<PanelDef>,
    /// Class whose members populate the tabs; the declaring field's own class
    /// is used when absent (dialog-level layout).
    pub value_class: Option<String>,
}

/// Nested accordion container backed by another definition class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccordionDef {
    pub panels: Vec<PanelDef>,
    pub value_class: Option<String>,
}

/// Grouping of another class's members under a common name prefix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSetDef {
    pub value_class: String,
    pub title: Option<String>,
    pub name_prefix: Option<String>,
    pub name_postfix: Option<String>,
}

/// Repeating group backed by another class. A single-member backing class
/// renders one widget directly; a multi-member class renders a composite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiFieldDef {
    pub value_class: String,
}

/// User-supplied widget: a marker kind name plus a free-form property bag.
/// A handler registered under `marker` takes over rendering; otherwise the
/// properties map directly onto the node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomWidgetDef {
    pub marker: String,
    pub resource_type: Option<String>,
    pub properties: BTreeMap<String, PropertyValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order_excludes_custom() {
        assert!(!WidgetKind::BUILT_IN.contains(&WidgetKind::Custom));
        assert_eq!(WidgetKind::BUILT_IN[0], WidgetKind::TextField);
    }

    #[test]
    fn test_container_kinds() {
        assert!(WidgetKind::Tabs.is_container());
        assert!(WidgetKind::MultiField.is_container());
        assert!(!WidgetKind::TextField.is_container());
    }

    #[test]
    fn test_widget_def_tagged_json() {
        let json = r#"{ "kind": "text_field", "max_length": 20 }"#;
        let def: WidgetDef = serde_json::from_str(json).unwrap();
        assert_eq!(def.kind(), WidgetKind::TextField);
        match def {
            WidgetDef::TextField(t) => assert_eq!(t.max_length, Some(20)),
            other => panic!("unexpected widget: {:?}", other),
        }
    }
}
