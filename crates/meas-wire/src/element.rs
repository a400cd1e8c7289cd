//! Owned element tree.

use indexmap::IndexMap;

use crate::error::WireError;

/// A node of an observation document.
///
/// Names are stored as prefixed qualified names (`"swe:field"`); attributes
/// keep their insertion order so encoded output is stable.
///
/// ```
/// use meas_wire::Element;
///
/// let quantity = Element::new("swe:Quantity")
///     .with_child(Element::new("swe:uom").with_attr("code", "Cel"))
///     .with_child(Element::new("swe:value").with_text("21.5"));
///
/// assert_eq!(quantity.child("swe:uom").and_then(|u| u.attr("code")), Some("Cel"));
/// assert_eq!(quantity.child_text("swe:value"), Some("21.5"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    name: String,
    attributes: IndexMap<String, String>,
    children: Vec<Element>,
    text: Option<String>,
}

impl Element {
    /// Create an empty element with the given qualified name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    // ── Builders ────────────────────────────────────────────────

    /// Set an attribute, consuming and returning the element.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set the text content, consuming and returning the element.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Append a child, consuming and returning the element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    // ── Accessors ───────────────────────────────────────────────

    /// Qualified name, including the prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without its prefix.
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Iterate attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Text content, if any was set.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Text content, or `""` when none was set.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// All children in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First child, whatever its name.
    pub fn first_child(&self) -> Option<&Element> {
        self.children.first()
    }

    /// First child with the given qualified name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Every child with the given qualified name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first child with the given name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(Element::text)
    }

    /// Follow a path of child names from this element.
    pub fn descend(&self, path: &[&str]) -> Option<&Element> {
        path.iter().try_fold(self, |node, name| node.child(name))
    }

    /// First child with the given name, or [`WireError::MissingElement`].
    pub fn require_child(&self, name: &str) -> Result<&Element, WireError> {
        self.child(name).ok_or_else(|| WireError::MissingElement {
            parent: self.name.clone(),
            child: name.to_string(),
        })
    }

    /// Attribute value, or [`WireError::MissingAttribute`].
    pub fn require_attr(&self, name: &str) -> Result<&str, WireError> {
        self.attr(name).ok_or_else(|| WireError::MissingAttribute {
            element: self.name.clone(),
            attribute: name.to_string(),
        })
    }

    // ── Mutation ────────────────────────────────────────────────

    /// Set or replace an attribute.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Set or replace the text content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Append a child and return a handle to it.
    pub fn push_child(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Mutable handle to the first child with the given name.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// Mutable handle to the first child with the given name, appending an
    /// empty one first if there is none.
    ///
    /// Existing children are never replaced, so several writers can extend
    /// the same subtree in turn.
    pub fn child_or_insert(&mut self, name: &str) -> &mut Element {
        match self.children.iter().position(|c| c.name == name) {
            Some(idx) => &mut self.children[idx],
            None => self.push_child(Element::new(name)),
        }
    }

    /// Visit this element and every descendant, depth first.
    pub fn walk(&self, visit: &mut dyn FnMut(&Element)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("swe:DataRecord")
            .with_child(Element::new("swe:field").with_attr("name", "a"))
            .with_child(Element::new("swe:field").with_attr("name", "b"))
            .with_child(Element::new("swe:description").with_text("d"))
    }

    #[test]
    fn local_name_strips_prefix() {
        assert_eq!(Element::new("gml:TimeInstant").local_name(), "TimeInstant");
        assert_eq!(Element::new("code").local_name(), "code");
    }

    #[test]
    fn children_named_preserves_order() {
        let rec = sample();
        let names: Vec<_> = rec
            .children_named("swe:field")
            .filter_map(|f| f.attr("name"))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn require_child_reports_parent_and_child() {
        let rec = sample();
        match rec.require_child("swe:quality") {
            Err(WireError::MissingElement { parent, child }) => {
                assert_eq!(parent, "swe:DataRecord");
                assert_eq!(child, "swe:quality");
            }
            other => panic!("expected MissingElement, got {other:?}"),
        }
    }

    #[test]
    fn require_attr_reports_missing_attribute() {
        let err = Element::new("swe:uom").require_attr("code").unwrap_err();
        assert!(matches!(err, WireError::MissingAttribute { .. }));
    }

    #[test]
    fn child_or_insert_extends_existing_child() {
        let mut root = Element::new("gml:domainSet");
        root.child_or_insert("tsml:TimePositionList").set_text("x");
        root.child_or_insert("tsml:TimePositionList")
            .set_attr("gml:id", "ts");
        assert_eq!(root.children().len(), 1);
        let list = root.child("tsml:TimePositionList").unwrap();
        assert_eq!(list.text(), Some("x"));
        assert_eq!(list.attr("gml:id"), Some("ts"));
    }

    #[test]
    fn descend_follows_path() {
        let root = Element::new("a").with_child(
            Element::new("b").with_child(Element::new("c").with_text("deep")),
        );
        assert_eq!(root.descend(&["b", "c"]).and_then(Element::text), Some("deep"));
        assert!(root.descend(&["b", "x"]).is_none());
        assert_eq!(root.descend(&[]).map(Element::name), Some("a"));
    }

    #[test]
    fn walk_visits_every_node() {
        let mut count = 0;
        sample().walk(&mut |_| count += 1);
        assert_eq!(count, 4);
    }
}
