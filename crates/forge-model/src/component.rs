//! Component classes, fields, and authoring directives.
//!
//! A [`ComponentDef`] is the declarative stand-in for an annotated class:
//! an ordered list of fields, optional inheritance via `extends`, and the
//! directives (ignore, replace, place, rank) that shape member collection.
//! Definitions carrying a `path` render a dialog; path-less definitions are
//! value classes backing field sets, multi-fields, and nested containers.

use crate::value::PropertyValue;
use crate::widget::{PanelDef, WidgetDef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A (class, member) reference used by ignore and replace directives.
/// An absent class defers to the contextual class being processed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberRef {
    pub class: Option<String>,
    pub member: String,
}

impl MemberRef {
    pub fn new(member: impl Into<String>) -> Self {
        Self {
            class: None,
            member: member.into(),
        }
    }

    pub fn in_class(class: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            member: member.into(),
        }
    }
}

/// Placement directive: a container section and/or relative ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceDef {
    /// Title of the tab/panel bucket this member belongs to.
    pub section: Option<String>,
    pub before: Option<MemberRef>,
    pub after: Option<MemberRef>,
}

/// HTML attributes rendered onto the widget node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlAttributes {
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    pub id: Option<String>,
    /// Extra `data-*` entries, rendered onto the granite:data child.
    pub data: BTreeMap<String, String>,
}

impl HtmlAttributes {
    pub fn is_empty(&self) -> bool {
        self.class_name.is_none() && self.id.is_none() && self.data.is_empty()
    }
}

/// One conditional-visibility rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependsOnRule {
    /// The query expression evaluated by the front-end.
    pub query: String,
    /// Action to run when the query result changes; absent means "visibility".
    pub action: Option<String>,
    /// Action-scoped parameters.
    pub params: BTreeMap<String, String>,
}

/// Marks a field as a reference other depends-on queries can point at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependsOnRef {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ref_type: Option<String>,
    pub lazy: bool,
}

/// A custom (non-widget) annotation consumed by a registered extension hook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionDef {
    pub marker: String,
    pub properties: BTreeMap<String, PropertyValue>,
}

/// One declared member of a component class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDef {
    pub name: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub required: bool,
    pub disabled: bool,
    /// Default value written to the `value` attribute.
    pub default_value: Option<PropertyValue>,
    /// Explicit ordering hint; lower ranks render first, unranked counts as 0.
    pub rank: Option<i64>,
    pub place: Option<PlaceDef>,
    /// Supersede another member; this field takes over its position (and its
    /// rank, when no explicit rank is declared here).
    pub replace: Option<MemberRef>,
    /// Members excluded when this field's container recurses.
    pub ignore: Vec<MemberRef>,
    /// Widget annotations. Exactly one should resolve; extras are reported.
    pub widgets: Vec<WidgetDef>,
    /// Free-form properties mapped verbatim onto the node.
    pub properties: BTreeMap<String, PropertyValue>,
    pub attributes: HtmlAttributes,
    pub depends_on: Vec<DependsOnRule>,
    pub depends_on_ref: Option<DependsOnRef>,
    /// Custom annotations handled by registered extension hooks.
    pub extensions: Vec<ExtensionDef>,
    /// Wrap the rendered widget in a synthetic repeating container.
    pub multiple: bool,
}

impl FieldDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_widget(mut self, widget: WidgetDef) -> Self {
        self.widgets.push(widget);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_rank(mut self, rank: i64) -> Self {
        self.rank = Some(rank);
        self
    }
}

/// Dialog-level layout of a component's own members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DialogLayout {
    /// Single fixed container.
    #[default]
    Default,
    Tabs {
        tabs: Vec<PanelDef>,
    },
    Accordion {
        panels: Vec<PanelDef>,
    },
}

/// A component class: the unit one dialog is generated for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentDef {
    /// Class name, unique within the registry.
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Package path of the component node. Absent for value classes.
    pub path: Option<String>,
    pub group: Option<String>,
    pub super_type: Option<String>,
    /// Parent class whose members are inherited.
    pub extends: Option<String>,
    pub layout: DialogLayout,
    /// Class-level ignore directives.
    pub ignore: Vec<MemberRef>,
    pub fields: Vec<FieldDef>,
    /// Extra attributes merged onto the dialog root.
    pub properties: BTreeMap<String, PropertyValue>,
}

impl ComponentDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether this definition produces a dialog (value classes do not).
    pub fn is_component(&self) -> bool {
        self.path.is_some()
    }

    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }
}

/// All loaded component classes, keyed by class name.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    classes: BTreeMap<String, ComponentDef>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition. Returns the previous definition when the class
    /// name was already registered (callers report the duplicate).
    pub fn insert(&mut self, def: ComponentDef) -> Option<ComponentDef> {
        self.classes.insert(def.name.clone(), def)
    }

    pub fn get(&self, name: &str) -> Option<&ComponentDef> {
        self.classes.get(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> impl Iterator<Item = &ComponentDef> {
        self.classes.values()
    }

    /// Definitions that render a dialog, in stable name order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentDef> {
        self.classes.values().filter(|c| c.is_component())
    }

    /// The inheritance chain for a class, most general ancestor first,
    /// the class itself last. Unknown parents and cycles end the walk.
    pub fn hierarchy(&self, name: &str) -> Vec<&ComponentDef> {
        let mut chain = Vec::new();
        let mut seen = Vec::new();
        let mut current = self.get(name);
        while let Some(def) = current {
            if seen.contains(&def.name.as_str()) {
                break;
            }
            seen.push(&def.name);
            chain.push(def);
            current = def.extends.as_deref().and_then(|p| self.get(p));
        }
        chain.reverse();
        chain
    }

    /// Whether `class` appears in the hierarchy of `context`. Ignore
    /// directives referencing classes outside the hierarchy never match.
    pub fn in_hierarchy(&self, context: &str, class: &str) -> bool {
        self.hierarchy(context).iter().any(|d| d.name == class)
    }
}
