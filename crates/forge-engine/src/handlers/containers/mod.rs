//! Container recursion: tabs, accordions, field sets, and multi-fields.
//!
//! Containers pull members from a backing value class, bucket them into
//! panels, and render each member through the full handler chain again.
//! The section title of a `place` directive routes a member into a specific
//! bucket; everything else lands in the first declared bucket.

pub mod accordion;
pub mod fieldset;
pub mod multifield;
pub mod tabs;

use crate::context::RenderContext;
use crate::error::PluginError;
use crate::ordering;
use crate::source::Source;
use forge_model::PropertyValue;
use forge_model::widget::PanelDef;
use forge_target::Target;
use std::collections::BTreeMap;

use super::properties::{PRIMARY_TYPE, RESOURCE_TYPE, UNSTRUCTURED};
use super::widgets::CONTAINER_RT;

/// One panel of a bucketed container, with the members routed into it.
#[derive(Debug, Clone)]
pub struct ContainerBucket {
    pub title: String,
    pub attributes: BTreeMap<String, PropertyValue>,
    pub sources: Vec<Source>,
}

impl ContainerBucket {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            attributes: BTreeMap::new(),
            sources: Vec::new(),
        }
    }
}

/// Distribute `sources` over the declared panels.
///
/// Panel-inline members keep their declaration order; class members with a
/// matching `place.section` join the named bucket, the rest fall into the
/// first declared bucket. A bucket receiving members from both origins is
/// re-sorted as a whole so ranks stay meaningful across origins. With no
/// panels at all, every source is dropped (callers report beforehand).
pub fn partition(panels: &[PanelDef], class_name: &str, sources: Vec<Source>) -> Vec<ContainerBucket> {
    let mut buckets: Vec<ContainerBucket> = Vec::with_capacity(panels.len());
    let mut had_inline = vec![false; panels.len()];
    for (idx, panel) in panels.iter().enumerate() {
        let mut bucket = ContainerBucket::new(&panel.title);
        bucket.attributes = panel.attributes.clone();
        bucket.sources = panel
            .members
            .iter()
            .map(|field| Source::new(class_name, field.clone()))
            .collect();
        had_inline[idx] = !panel.members.is_empty();
        buckets.push(bucket);
    }
    if buckets.is_empty() {
        return buckets;
    }

    let mut had_placed = vec![false; buckets.len()];
    for source in sources {
        let section = source
            .field
            .place
            .as_ref()
            .and_then(|p| p.section.as_deref());
        let idx = section
            .and_then(|title| buckets.iter().position(|b| b.title == title))
            .unwrap_or(0);
        had_placed[idx] = true;
        buckets[idx].sources.push(source);
    }

    for (idx, bucket) in buckets.iter_mut().enumerate() {
        if had_inline[idx] && had_placed[idx] {
            ordering::sort_sources(&mut bucket.sources);
        }
    }
    buckets
}

/// Render one member as a child of `parent`, picking a sibling-unique node
/// name first.
pub fn render_member_node(
    source: &Source,
    ctx: &mut RenderContext<'_>,
    parent: &mut Target,
) -> Result<(), PluginError> {
    let name = forge_target::unique_name(
        &source.field.name,
        &ctx.config.naming.default_field_name,
        parent,
    );
    let mut node = Target::new(name);
    super::run_member(source, ctx, &mut node)?;
    parent.add_child(node);
    Ok(())
}

/// Render the bucket list as panel nodes under `node`'s items child.
pub fn render_buckets(
    buckets: Vec<ContainerBucket>,
    ctx: &mut RenderContext<'_>,
    node: &mut Target,
) -> Result<(), PluginError> {
    let mut items = Target::new("items");
    items.attribute(PRIMARY_TYPE, UNSTRUCTURED);
    for bucket in buckets {
        let name = forge_target::unique_name(&bucket.title, "tab", &items);
        let mut panel = Target::new(name);
        panel.attribute(PRIMARY_TYPE, UNSTRUCTURED);
        panel.attribute("jcr:title", bucket.title.clone());
        panel.attribute(RESOURCE_TYPE, CONTAINER_RT);
        for (attr, value) in &bucket.attributes {
            panel.attribute(attr.clone(), value.clone());
        }
        let mut panel_items = Target::new("items");
        panel_items.attribute(PRIMARY_TYPE, UNSTRUCTURED);
        for source in &bucket.sources {
            render_member_node(source, ctx, &mut panel_items)?;
        }
        panel.add_child(panel_items);
        items.add_child(panel);
    }
    node.add_child(items);
    Ok(())
}

/// Look up a container's backing value class and produce its ordered
/// members. Unknown and recursively nested classes are reported and yield
/// `None`; the container then renders without class members.
pub(super) fn resolve_class_sources(
    class: &str,
    extra_ignores: &[forge_model::component::MemberRef],
    ctx: &mut RenderContext<'_>,
) -> Result<Option<Vec<Source>>, PluginError> {
    if ctx.components.get(class).is_none() {
        ctx.reporter.handle(PluginError::InvalidSetting(format!(
            "container references unknown value class '{class}'"
        )))?;
        return Ok(None);
    }
    if ctx.class_stack.iter().any(|c| c == class) {
        ctx.reporter.handle(PluginError::InvalidSetting(format!(
            "container recursion into '{class}' detected"
        )))?;
        return Ok(None);
    }
    Ok(Some(ordering::ordered_sources(
        ctx.components,
        class,
        extra_ignores,
    )))
}
