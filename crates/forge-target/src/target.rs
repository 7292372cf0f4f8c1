//! The output node tree.
//!
//! A [`Target`] accumulates ordered attributes and ordered children during
//! dialog generation and is later serialized to XML. Sibling name uniqueness
//! is the caller's contract, enforced through [`crate::naming::unique_name`]
//! at creation time; the tree itself is singly owned and carries no parent
//! back-references — operations that need the parent take it explicitly.

use forge_model::PropertyValue;

/// One node of the output tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    name: String,
    attributes: Vec<(String, PropertyValue)>,
    children: Vec<Target>,
}

impl Target {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set an attribute, overwriting in place so the original position is
    /// kept when an inheritance layer re-declares a property.
    pub fn attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> &mut Self {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.attributes.push((name, value));
        }
        self
    }

    /// Set an attribute only when the value is present.
    pub fn attribute_opt(
        &mut self,
        name: impl Into<String>,
        value: Option<impl Into<PropertyValue>>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.attribute(name, value);
        }
        self
    }

    pub fn attr(&self, name: &str) -> Option<&PropertyValue> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<PropertyValue> {
        let idx = self.attributes.iter().position(|(n, _)| n == name)?;
        Some(self.attributes.remove(idx).1)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Drain all attributes except those named in `keep`, preserving order.
    /// Used by the multiplicity wrapper when attributes move to a child node.
    pub fn take_attributes_except(&mut self, keep: &[&str]) -> Vec<(String, PropertyValue)> {
        let (kept, taken): (Vec<_>, Vec<_>) = std::mem::take(&mut self.attributes)
            .into_iter()
            .partition(|(n, _)| keep.contains(&n.as_str()));
        self.attributes = kept;
        taken
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.children.iter().any(|c| c.name == name)
    }

    pub fn child(&self, name: &str) -> Option<&Target> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Target> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// Append a child node and return a mutable reference to it.
    pub fn add_child(&mut self, child: Target) -> &mut Target {
        self.children.push(child);
        self.children.last_mut().expect("child was just pushed")
    }

    pub fn get_or_create_child(&mut self, name: &str) -> &mut Target {
        if let Some(idx) = self.children.iter().position(|c| c.name == name) {
            &mut self.children[idx]
        } else {
            self.add_child(Target::new(name))
        }
    }

    pub fn children(&self) -> &[Target] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Target] {
        &mut self.children
    }

    pub fn take_children(&mut self) -> Vec<Target> {
        std::mem::take(&mut self.children)
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Total node count of this subtree, itself included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Target::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_overwrite_keeps_position() {
        let mut node = Target::new("field");
        node.attribute("first", "a");
        node.attribute("second", "b");
        node.attribute("first", "c");

        let names: Vec<&str> = node.attributes().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(node.attr("first"), Some(&PropertyValue::from("c")));
    }

    #[test]
    fn test_get_or_create_child() {
        let mut node = Target::new("items");
        node.get_or_create_child("tab").attribute("x", "1");
        node.get_or_create_child("tab").attribute("y", "2");

        assert_eq!(node.children().len(), 1);
        let tab = node.child("tab").unwrap();
        assert!(tab.attr("x").is_some());
        assert!(tab.attr("y").is_some());
    }

    #[test]
    fn test_take_attributes_except() {
        let mut node = Target::new("field");
        node.attribute("jcr:primaryType", "nt:unstructured");
        node.attribute("name", "./title");
        node.attribute("fieldLabel", "Title");

        let taken = node.take_attributes_except(&["jcr:primaryType"]);
        assert_eq!(taken.len(), 2);
        assert!(node.attr("jcr:primaryType").is_some());
        assert!(node.attr("name").is_none());
    }

    #[test]
    fn test_node_count() {
        let mut root = Target::new("root");
        root.add_child(Target::new("a")).add_child(Target::new("b"));
        assert_eq!(root.node_count(), 3);
    }
}
