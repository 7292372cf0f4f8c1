//! Synthetic multi-field wrapping for `multiple` members.
//!
//! The rendered widget moves into a `field` child and the member node itself
//! becomes a multifield. Labels stay on the outer node so the repeating
//! group, not each instance, carries them.

use crate::context::RenderContext;
use crate::source::Source;
use forge_model::widget::WidgetKind;
use forge_target::Target;

use super::attributes::DATA_CHILD;
use super::properties::{PRIMARY_TYPE, RESOURCE_TYPE, UNSTRUCTURED};
use super::widgets;

const OUTER_ATTRIBUTES: [&str; 3] = [PRIMARY_TYPE, "fieldLabel", "fieldDescription"];

pub fn wrap(_source: &Source, _ctx: &RenderContext<'_>, node: &mut Target) {
    let moved_attributes = node.take_attributes_except(&OUTER_ATTRIBUTES);
    // granite:data stays on the repeating group, everything else moves.
    let (kept_data, moved_children): (Vec<Target>, Vec<Target>) = node
        .take_children()
        .into_iter()
        .partition(|child| child.name() == DATA_CHILD);

    let mut inner = Target::new("field");
    inner.attribute(PRIMARY_TYPE, UNSTRUCTURED);
    for (name, value) in moved_attributes {
        inner.attribute(name, value);
    }
    for child in moved_children {
        inner.add_child(child);
    }

    node.attribute(
        RESOURCE_TYPE,
        widgets::resource_type(WidgetKind::MultiField).unwrap_or_default(),
    );
    for data in kept_data {
        node.add_child(data);
    }
    node.add_child(inner);
}
