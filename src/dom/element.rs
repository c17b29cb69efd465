use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Tags whose text is captured directly instead of through their children
pub const CELL_TAGS: [&str; 2] = ["td", "th"];

/// Tags that may hold table rows
pub const SECTION_TAGS: [&str; 4] = ["tbody", "thead", "tfoot", "table"];

/// Represents a DOM element node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// HTML tag name, lower-case (e.g. "table", "tr", "td")
    pub tag_name: String,

    /// Element attributes in document order
    #[serde(default)]
    pub attributes: IndexMap<String, String>,

    /// Rendered text of the element; only captured for cells
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,

    /// Child elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into().to_ascii_lowercase(),
            attributes: IndexMap::new(),
            text_content: None,
            children: Vec::new(),
        }
    }

    /// Builder method: set text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Builder method: set children
    pub fn with_children(mut self, children: Vec<ElementNode>) -> Self {
        self.children = children;
        self
    }

    /// Builder method: add one attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(key, value);
        self
    }

    /// Add a single attribute
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Add a child element
    pub fn add_child(&mut self, child: ElementNode) {
        self.children.push(child);
    }

    /// Get attribute value by key
    pub fn get_attribute(&self, key: &str) -> Option<&String> {
        self.attributes.get(key)
    }

    /// Get element ID
    pub fn id(&self) -> Option<&String> {
        self.attributes.get("id")
    }

    /// Check if element is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    pub fn is_cell(&self) -> bool {
        CELL_TAGS.iter().any(|&tag| self.is_tag(tag))
    }

    pub fn is_table_section(&self) -> bool {
        SECTION_TAGS.iter().any(|&tag| self.is_tag(tag))
    }

    /// Text of this element: the captured text if present, otherwise the
    /// concatenated text of its descendants
    pub fn text(&self) -> String {
        match &self.text_content {
            Some(text) => text.clone(),
            None => self.children.iter().map(ElementNode::text).collect(),
        }
    }

    /// Descendants with the given tag in document order, without entering
    /// nested tables below this element
    pub fn descendants_by_tag<'a>(&'a self, tag: &str) -> Vec<&'a ElementNode> {
        let mut found = Vec::new();
        for child in &self.children {
            child.collect_by_tag(tag, &mut found);
        }
        found
    }

    fn collect_by_tag<'a>(&'a self, tag: &str, found: &mut Vec<&'a ElementNode>) {
        if self.is_tag(tag) {
            found.push(self);
        }
        if self.is_tag("table") {
            return;
        }
        for child in &self.children {
            child.collect_by_tag(tag, found);
        }
    }

    /// Cell children of a row
    pub fn cells(&self) -> impl Iterator<Item = &ElementNode> {
        self.children.iter().filter(|child| child.is_cell())
    }
}
