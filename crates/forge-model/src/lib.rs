//! Definition model for dialogforge.
//!
//! Provides the component/field vocabulary ([`component::ComponentDef`]),
//! the closed widget enumeration ([`widget::WidgetDef`]), JCR-typed property
//! values ([`value::PropertyValue`]), generator configuration, and loading of
//! definition documents from disk.

pub mod component;
pub mod config;
pub mod storage;
pub mod value;
pub mod widget;

pub use component::{
    ComponentDef, ComponentRegistry, DependsOnRef, DependsOnRule, DialogLayout, ExtensionDef,
    FieldDef, HtmlAttributes, MemberRef, PlaceDef,
};
pub use config::ForgeConfig;
pub use value::PropertyValue;
pub use widget::{OptionDef, PanelDef, WidgetDef, WidgetKind};
