//! Base node type and the free-form property bag.

use crate::source::Source;
use forge_target::Target;

pub const PRIMARY_TYPE: &str = "jcr:primaryType";
pub const UNSTRUCTURED: &str = "nt:unstructured";
pub const RESOURCE_TYPE: &str = "sling:resourceType";

/// Every member node is an unstructured JCR node.
pub fn apply_base(node: &mut Target) {
    node.attribute(PRIMARY_TYPE, UNSTRUCTURED);
}

/// Map the field's declared property bag verbatim onto the node. Runs after
/// the base handler, so an authored property can override any attribute the
/// chain would otherwise compute.
pub fn apply_custom(source: &Source, node: &mut Target) {
    for (name, value) in &source.field.properties {
        node.attribute(name.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_model::component::FieldDef;

    #[test]
    fn test_base_primary_type() {
        let mut node = Target::new("title");
        apply_base(&mut node);
        assert_eq!(
            node.attr(PRIMARY_TYPE).and_then(|v| v.as_plain_str()),
            Some(UNSTRUCTURED)
        );
    }

    #[test]
    fn test_custom_properties_can_override() {
        let mut field = FieldDef::new("title");
        field
            .properties
            .insert(PRIMARY_TYPE.to_string(), "cq:Widget".into());
        let source = Source::new("C", field);

        let mut node = Target::new("title");
        apply_base(&mut node);
        apply_custom(&source, &mut node);
        assert_eq!(
            node.attr(PRIMARY_TYPE).and_then(|v| v.as_plain_str()),
            Some("cq:Widget")
        );
    }
}
