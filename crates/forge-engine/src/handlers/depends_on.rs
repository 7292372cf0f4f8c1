//! Conditional-visibility expressions, written onto the granite:data child.

use crate::source::Source;
use forge_target::Target;

use super::attributes::data_child;

pub fn apply(source: &Source, node: &mut Target) {
    let rules = &source.field.depends_on;
    let reference = &source.field.depends_on_ref;
    if rules.is_empty() && reference.is_none() {
        return;
    }

    let data = data_child(node);

    if !rules.is_empty() {
        let queries: Vec<&str> = rules.iter().map(|r| r.query.as_str()).collect();
        data.attribute("dependson", queries.join(";"));

        // Actions align positionally with the queries; a rule without one
        // gets the implicit visibility action.
        if rules.iter().any(|r| r.action.is_some()) {
            let actions: Vec<&str> = rules
                .iter()
                .map(|r| r.action.as_deref().unwrap_or("visibility"))
                .collect();
            data.attribute("dependsonaction", actions.join(";"));
        }
        for rule in rules {
            let Some(action) = &rule.action else { continue };
            for (param, value) in &rule.params {
                data.attribute(format!("dependson-{action}-{param}"), value.clone());
            }
        }
    }

    if let Some(reference) = reference {
        let name = reference
            .name
            .clone()
            .unwrap_or_else(|| source.field.name.clone());
        data.attribute("dependsonref", name);
        data.attribute_opt("dependsonreftype", reference.ref_type.clone());
        if reference.lazy {
            data.attribute("dependsonreflazy", true);
        }
    }
}
