//! DOM capture
//!
//! This module turns the selected part of a page into an owned tree that the
//! table extractors can walk without holding on to the browser:
//! - ElementNode: serializable element with attributes, cell text and children
//! - DomTree: captured subtree plus the path to the selected element

pub mod element;
pub mod tree;

pub use element::ElementNode;
pub use tree::DomTree;

use crate::error::Result;
use headless_chrome::Tab;
use std::sync::Arc;

/// Capture the table around `selector` from a browser tab
pub fn capture_table(tab: &Arc<Tab>, selector: &str) -> Result<DomTree> {
    DomTree::from_tab(tab, selector)
}

/// Capture the table around `selector` from an HTML document
pub fn capture_table_from_html(html: &str, selector: &str) -> Result<DomTree> {
    DomTree::from_html(html, selector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_from_html_export() {
        let tree = capture_table_from_html("<table><tbody><tr><td>1</td></tr></tbody></table>", "tbody").unwrap();
        assert_eq!(tree.root.tag_name, "table");
    }

    #[test]
    fn test_dom_tree_export() {
        let tree = DomTree::new(ElementNode::new("tbody"));
        assert_eq!(tree.root.tag_name, "tbody");
    }
}
