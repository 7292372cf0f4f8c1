//! Layered override merge for inherited field declarations.
//!
//! When a subclass re-declares a field that an ancestor already declared,
//! the declarations form ordered override layers, most general first. The
//! merge is later-wins per property, so a subclass can override a single
//! dialog-field property without repeating the whole declaration. The
//! handler chain then runs once against the merged result.

use forge_model::component::FieldDef;

/// Fold `layer` (the more derived declaration) onto `base` in place.
///
/// Later-wins rules: optional properties win when set, boolean flags win
/// when raised, collections replace when non-empty (property maps merge
/// per key).
pub fn merge_field_layer(base: &mut FieldDef, layer: &FieldDef) {
    if layer.label.is_some() {
        base.label = layer.label.clone();
    }
    if layer.description.is_some() {
        base.description = layer.description.clone();
    }
    if layer.default_value.is_some() {
        base.default_value = layer.default_value.clone();
    }
    if layer.rank.is_some() {
        base.rank = layer.rank;
    }
    if layer.place.is_some() {
        base.place = layer.place.clone();
    }
    if layer.replace.is_some() {
        base.replace = layer.replace.clone();
    }
    if layer.depends_on_ref.is_some() {
        base.depends_on_ref = layer.depends_on_ref.clone();
    }
    base.required |= layer.required;
    base.disabled |= layer.disabled;
    base.multiple |= layer.multiple;

    if !layer.widgets.is_empty() {
        base.widgets = layer.widgets.clone();
    }
    if !layer.depends_on.is_empty() {
        base.depends_on = layer.depends_on.clone();
    }
    if !layer.extensions.is_empty() {
        base.extensions = layer.extensions.clone();
    }
    base.ignore.extend(layer.ignore.iter().cloned());
    for (key, value) in &layer.properties {
        base.properties.insert(key.clone(), value.clone());
    }
    if layer.attributes.class_name.is_some() {
        base.attributes.class_name = layer.attributes.class_name.clone();
    }
    if layer.attributes.id.is_some() {
        base.attributes.id = layer.attributes.id.clone();
    }
    for (key, value) in &layer.attributes.data {
        base.attributes.data.insert(key.clone(), value.clone());
    }
}
