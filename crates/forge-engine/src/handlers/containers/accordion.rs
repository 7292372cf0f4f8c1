//! Accordion container rendering. Unlike tabs, a panel-less accordion gets
//! no synthetic rescue: the problem is reported and the container renders
//! with an empty panel set.

use crate::context::RenderContext;
use crate::error::PluginError;
use crate::source::Source;
use forge_model::widget::AccordionDef;
use forge_target::Target;

use super::{partition, render_buckets, resolve_class_sources};

pub fn render(
    def: &AccordionDef,
    source: &Source,
    ctx: &mut RenderContext<'_>,
    node: &mut Target,
) -> Result<(), PluginError> {
    let class = def.value_class.as_deref();
    let sources = match class {
        Some(class) => {
            resolve_class_sources(class, &source.field.ignore, ctx)?.unwrap_or_default()
        }
        None => Vec::new(),
    };
    let class_name = class.unwrap_or_else(|| source.class_name());

    if def.panels.is_empty() {
        ctx.reporter.handle(PluginError::InvalidSetting(format!(
            "accordion container on '{class_name}' declares no panels"
        )))?;
    }
    let buckets = partition(&def.panels, class_name, sources);

    if let Some(class) = class {
        ctx.class_stack.push(class.to_string());
        let rendered = render_buckets(buckets, ctx, node);
        ctx.class_stack.pop();
        rendered
    } else {
        render_buckets(buckets, ctx, node)
    }
}
