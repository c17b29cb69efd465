use crate::dom::element::ElementNode;
use crate::error::{ExportError, Result};
use headless_chrome::Tab;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use std::sync::Arc;

/// A captured table subtree together with the position of the element the
/// user selected inside it
#[derive(Debug, Clone, PartialEq)]
pub struct DomTree {
    /// Nearest enclosing table of the selection, or the selection itself
    pub root: ElementNode,

    /// Child indices leading from `root` to the selected element
    pub selected_path: Vec<usize>,
}

/// Shape of the JSON string returned by `capture_table.js`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CaptureResponse {
    Captured { root: ElementNode, selected_path: Vec<usize> },
    Failed { error: String },
}

impl DomTree {
    /// Tree whose root is the selected element
    pub fn new(root: ElementNode) -> Self {
        Self {
            root,
            selected_path: Vec::new(),
        }
    }

    /// Builder method: set the path to the selected element
    pub fn with_selected_path(mut self, path: Vec<usize>) -> Self {
        self.selected_path = path;
        self
    }

    /// Capture the table around the element matching `selector` in a browser tab
    pub fn from_tab(tab: &Arc<Tab>, selector: &str) -> Result<Self> {
        let script = format!("({})({})", include_str!("capture_table.js"), serde_json::to_string(selector)?);

        let result = tab
            .evaluate(&script, false)
            .map_err(|e| ExportError::EvaluationFailed(format!("Failed to execute table capture script: {}", e)))?;

        let json_value = result
            .value
            .ok_or_else(|| ExportError::DomParseFailed("No value returned from table capture".to_string()))?;

        // The script returns a JSON string rather than an object
        let json_str: String = serde_json::from_value(json_value)
            .map_err(|e| ExportError::DomParseFailed(format!("Failed to get JSON string: {}", e)))?;

        Self::from_capture_json(&json_str, selector)
    }

    fn from_capture_json(json_str: &str, selector: &str) -> Result<Self> {
        let response: CaptureResponse = serde_json::from_str(json_str)
            .map_err(|e| ExportError::DomParseFailed(format!("Failed to parse captured table JSON: {}", e)))?;

        match response {
            CaptureResponse::Captured { root, selected_path } => {
                let tree = Self { root, selected_path };
                log::debug!(
                    "Captured <{}> around '{}' ({} elements)",
                    tree.root.tag_name,
                    selector,
                    tree.count_elements()
                );
                Ok(tree)
            }
            CaptureResponse::Failed { error } => Err(ExportError::ElementNotFound(format!(
                "No element matches '{}' ({})",
                selector, error
            ))),
        }
    }

    /// Capture the table around the first element matching `selector` in an
    /// HTML document
    pub fn from_html(html: &str, selector: &str) -> Result<Self> {
        let parsed = Selector::parse(selector)
            .map_err(|e| ExportError::InvalidParams(format!("Invalid CSS selector '{}': {}", selector, e)))?;

        let document = Html::parse_document(html);
        let selected = document
            .select(&parsed)
            .next()
            .ok_or_else(|| ExportError::ElementNotFound(format!("No element matches '{}'", selector)))?;

        let root = std::iter::once(selected)
            .chain(selected.ancestors().filter_map(ElementRef::wrap))
            .find(|el| el.value().name().eq_ignore_ascii_case("table"))
            .unwrap_or(selected);

        let mut path = Vec::new();
        let mut selected_path = None;
        let root_node = convert_element(root, selected, &mut path, &mut selected_path);

        let tree = Self {
            root: root_node,
            selected_path: selected_path.unwrap_or_default(),
        };
        log::debug!("Parsed <{}> around '{}' from HTML", tree.root.tag_name, selector);
        Ok(tree)
    }

    /// The element the capture was made for
    pub fn selected(&self) -> Option<&ElementNode> {
        self.selected_path
            .iter()
            .try_fold(&self.root, |node, &index| node.children.get(index))
    }

    /// Nearest `table` at or above the selected element
    pub fn enclosing_table(&self) -> Option<&ElementNode> {
        let mut chain = vec![&self.root];
        let mut node = &self.root;
        for &index in &self.selected_path {
            node = node.children.get(index)?;
            chain.push(node);
        }
        chain.into_iter().rev().find(|node| node.is_tag("table"))
    }

    /// Count total elements in the tree
    pub fn count_elements(&self) -> usize {
        Self::count_elements_recursive(&self.root)
    }

    fn count_elements_recursive(node: &ElementNode) -> usize {
        1 + node.children.iter().map(Self::count_elements_recursive).sum::<usize>()
    }

    /// Serialize the captured tree for debugging
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }
}

fn convert_element(
    element: ElementRef<'_>,
    selected: ElementRef<'_>,
    path: &mut Vec<usize>,
    selected_path: &mut Option<Vec<usize>>,
) -> ElementNode {
    if element == selected {
        *selected_path = Some(path.clone());
    }

    let mut node = ElementNode::new(element.value().name());
    for (key, value) in element.value().attrs() {
        node.add_attribute(key, value);
    }

    if node.is_cell() {
        node.text_content = Some(element.text().collect());
    }

    for (index, child) in element.children().filter_map(ElementRef::wrap).enumerate() {
        path.push(index);
        node.add_child(convert_element(child, selected, path, selected_path));
        path.pop();
    }

    node
}
