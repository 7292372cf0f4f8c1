//! The member abstraction the pipeline operates on.
//!
//! A [`Source`] wraps one declared field together with its inheritance
//! layers and the name prefix/postfix overlay active during container
//! recursion. Overlay adjustments produce derived Sources; nothing is
//! mutated through ambient state.

use crate::handlers::inheritance;
use forge_model::component::{FieldDef, MemberRef};

/// A field of a component class, as seen by the handler chain.
#[derive(Debug, Clone)]
pub struct Source {
    /// Declaring classes, most general first; the last is the most derived
    /// class that re-declared the field.
    layers: Vec<String>,
    /// The field definition with all inheritance layers merged (later wins).
    pub field: FieldDef,
    pub name_prefix: String,
    pub name_postfix: String,
    /// Rank inherited from a replaced member; takes precedence over the
    /// field's own (absent) rank.
    pub rank_override: Option<i64>,
}

impl Source {
    pub fn new(class_name: impl Into<String>, field: FieldDef) -> Self {
        Self {
            layers: vec![class_name.into()],
            field,
            name_prefix: String::new(),
            name_postfix: String::new(),
            rank_override: None,
        }
    }

    /// The most derived declaring class.
    pub fn class_name(&self) -> &str {
        self.layers.last().map_or("", String::as_str)
    }

    pub fn declared_in(&self, class: &str) -> bool {
        self.layers.iter().any(|c| c == class)
    }

    /// Merge a subclass re-declaration on top of the existing layers.
    pub fn add_layer(&mut self, class_name: impl Into<String>, layer: &FieldDef) {
        self.layers.push(class_name.into());
        inheritance::merge_field_layer(&mut self.field, layer);
    }

    /// Lower ranks order first; an unranked member counts as 0.
    pub fn effective_rank(&self) -> i64 {
        self.rank_override.or(self.field.rank).unwrap_or(0)
    }

    /// The field name with the active overlay applied.
    pub fn prefixed_name(&self) -> String {
        format!("{}{}{}", self.name_prefix, self.field.name, self.name_postfix)
    }

    /// Derived Source with an extended overlay, used by field sets.
    pub fn with_overlay(&self, prefix: &str, postfix: &str) -> Self {
        let mut derived = self.clone();
        derived.name_prefix = format!("{}{}", self.name_prefix, prefix);
        derived.name_postfix = format!("{}{}", postfix, self.name_postfix);
        derived
    }

    /// Derived Source whose field name loses its leading `./`, required
    /// inside composite multi-fields where doubly-relative names are
    /// disallowed by the target schema.
    pub fn with_stripped_relative(&self) -> Self {
        let mut derived = self.clone();
        if let Some(stripped) = derived.field.name.strip_prefix("./") {
            derived.field.name = stripped.to_string();
        }
        derived
    }

    /// Whether a directive reference points at this member. An absent class
    /// matches any declaring layer; a present class must be one of them.
    pub fn matches(&self, reference: &MemberRef) -> bool {
        if self.field.name != reference.member {
            return false;
        }
        match &reference.class {
            None => true,
            Some(class) => self.declared_in(class),
        }
    }
}
