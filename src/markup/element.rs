//! Element: one parsed markup node.

/// A parsed markup element.
///
/// Attributes keep document order and have unique keys (the loader rejects
/// repeats). `text` is the raw character data that appears before the first
/// child element, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name, e.g. `"button"`.
    pub tag: String,
    attributes: Vec<(String, String)>,
    /// Child elements in document order.
    pub children: Vec<Element>,
    /// Leading character data.
    pub text: Option<String>,
}

impl Element {
    /// Create an element with no attributes, children, or text.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Set an attribute (builder). Replaces an existing value for the same key.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Append a child element (builder).
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Set the leading text (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set an attribute, replacing any existing value for `key`.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Look up an attribute value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attr(key).is_some()
    }

    /// All attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The `id` attribute, if declared.
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Direct children with the given tag.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Leading text with surrounding whitespace removed, or `None` when the
    /// element has no meaningful content.
    pub fn content(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_lookup() {
        let el = Element::new("button")
            .with_attr("text", "OK")
            .with_attr("row", "1");
        assert_eq!(el.tag, "button");
        assert_eq!(el.attr("text"), Some("OK"));
        assert_eq!(el.attr("column"), None);
        assert!(el.has_attr("row"));
    }

    #[test]
    fn set_attr_replaces_in_place() {
        let el = Element::new("x")
            .with_attr("a", "1")
            .with_attr("b", "2")
            .with_attr("a", "3");
        let attrs: Vec<_> = el.attributes().collect();
        assert_eq!(attrs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn children_named_filters_by_tag() {
        let el = Element::new("combobox")
            .with_child(Element::new("value").with_text("a"))
            .with_child(Element::new("label"))
            .with_child(Element::new("value").with_text("b"));
        let texts: Vec<_> = el
            .children_named("value")
            .filter_map(|v| v.text.as_deref())
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn content_ignores_whitespace_only_text() {
        assert_eq!(Element::new("frame").with_text("\n   ").content(), None);
        assert_eq!(Element::new("message").with_text("  hi \n").content(), Some("hi"));
        assert_eq!(Element::new("message").content(), None);
    }
}
