//! The fixed member handler chain.
//!
//! Every member node passes through the same handler sequence; each handler
//! owns one attribute family and runs unconditionally, deciding internally
//! whether it has anything to contribute. Containers recurse through
//! [`containers`] from inside the widget handler.

pub mod attributes;
pub mod containers;
pub mod depends_on;
pub mod dialog_field;
pub mod extensions;
pub mod inheritance;
pub mod multiple;
pub mod properties;
pub mod widgets;

use crate::context::RenderContext;
use crate::error::PluginError;
use crate::registry;
use crate::source::Source;
use forge_target::Target;

/// Run the full chain for one member against its freshly created node.
pub fn run_member(
    source: &Source,
    ctx: &mut RenderContext<'_>,
    node: &mut Target,
) -> Result<(), PluginError> {
    let resolved = registry::resolve_widget(source, ctx)?;

    properties::apply_base(node);
    properties::apply_custom(source, node);
    attributes::apply(source, node);
    dialog_field::apply(source, resolved, ctx, node);
    widgets::render(source, resolved, ctx, node)?;
    depends_on::apply(source, node);
    extensions::apply(source, ctx, node)?;

    let is_container = resolved.is_some_and(|w| w.kind().is_container());
    if source.field.multiple && !is_container {
        multiple::wrap(source, ctx, node);
    }
    Ok(())
}
