//! HTML attribute passthrough: granite:class, granite:id, and data-*.

use crate::source::Source;
use forge_target::Target;

use super::properties::{PRIMARY_TYPE, UNSTRUCTURED};

pub const DATA_CHILD: &str = "granite:data";

pub fn apply(source: &Source, node: &mut Target) {
    let attrs = &source.field.attributes;
    if attrs.is_empty() {
        return;
    }
    node.attribute_opt("granite:class", attrs.class_name.clone());
    node.attribute_opt("granite:id", attrs.id.clone());
    for (key, value) in &attrs.data {
        let data = data_child(node);
        data.attribute(format!("data-{key}"), value.clone());
    }
}

/// The granite:data child, created on first use. Shared with the depends-on
/// handler, which writes its expressions into the same node.
pub fn data_child(node: &mut Target) -> &mut Target {
    let data = node.get_or_create_child(DATA_CHILD);
    data.attribute(PRIMARY_TYPE, UNSTRUCTURED);
    data
}
