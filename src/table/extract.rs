use crate::dom::{DomTree, ElementNode};
use crate::error::{ExportError, Result};
use crate::table::snapshot::{HeaderSnapshot, Row, TableSnapshot};

/// Cell texts of every row in a table section.
///
/// Rows are the `tr` descendants of `section` (nested tables are not
/// entered) and cells are the `td`/`th` children of each row. Text is
/// trimmed at both ends; whitespace inside a cell is left as is.
pub fn extract_rows(section: &ElementNode) -> Result<TableSnapshot> {
    if !section.is_table_section() {
        return Err(ExportError::NotATableSection {
            tag: section.tag_name.clone(),
        });
    }

    let rows: Vec<Row> = section.descendants_by_tag("tr").into_iter().map(row_texts).collect();

    log::debug!("Extracted {} rows from <{}>", rows.len(), section.tag_name);
    Ok(TableSnapshot::new(rows))
}

/// Row extraction applied to the selected element of a capture
pub fn extract_selected_rows(tree: &DomTree) -> Result<TableSnapshot> {
    let section = tree
        .selected()
        .ok_or_else(|| ExportError::ElementNotFound("Selected element is not part of the capture".to_string()))?;
    extract_rows(section)
}

/// Header cell texts of the nearest enclosing table, one sequence per
/// header row
pub fn extract_header_rows(tree: &DomTree) -> Result<Vec<Row>> {
    let table = tree.enclosing_table().ok_or(ExportError::NoEnclosingTable)?;

    let head = table
        .children
        .iter()
        .find(|child| child.is_tag("thead"))
        .or_else(|| table.descendants_by_tag("thead").into_iter().next())
        .ok_or(ExportError::MissingHeaderSection)?;

    Ok(head.descendants_by_tag("tr").into_iter().map(row_texts).collect())
}

/// Header cell texts of the nearest enclosing table, flattened in document
/// order
pub fn extract_headers(tree: &DomTree) -> Result<HeaderSnapshot> {
    let rows = extract_header_rows(tree)?;
    let headers = HeaderSnapshot::from_rows(&rows);

    log::debug!("Extracted {} header cells from {} header rows", headers.len(), rows.len());
    Ok(headers)
}

fn row_texts(row: &ElementNode) -> Row {
    row.cells().map(|cell| trim_cell(&cell.text()).to_string()).collect()
}

/// `str::trim` plus U+FEFF, which browsers render as nothing but Rust does
/// not count as whitespace
fn trim_cell(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(text: &str) -> ElementNode {
        ElementNode::new("td").with_text(text)
    }

    fn tr(cells: Vec<ElementNode>) -> ElementNode {
        ElementNode::new("tr").with_children(cells)
    }

    fn texts(snapshot: &TableSnapshot) -> Vec<Vec<String>> {
        snapshot.rows.iter().map(|row| row.0.clone()).collect()
    }

    #[test]
    fn test_rows_are_trimmed_in_order() {
        let tbody = ElementNode::new("tbody").with_children(vec![
            tr(vec![cell(" A "), cell("B")]),
            tr(vec![cell("C"), cell("\n  D\t")]),
        ]);

        let snapshot = extract_rows(&tbody).unwrap();
        assert_eq!(texts(&snapshot), vec![vec!["A", "B"], vec!["C", "D"]]);
    }

    #[test]
    fn test_zero_rows_is_empty() {
        let snapshot = extract_rows(&ElementNode::new("tbody")).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_internal_whitespace_preserved() {
        let tbody = ElementNode::new("tbody").with_children(vec![tr(vec![cell("  7  "), cell("  New  York ")])]);

        let snapshot = extract_rows(&tbody).unwrap();
        assert_eq!(texts(&snapshot), vec![vec!["7", "New  York"]]);
    }

    #[test]
    fn test_byte_order_mark_is_trimmed() {
        let tbody = ElementNode::new("tbody")
            .with_children(vec![tr(vec![cell("\u{feff} 7 \u{feff}"), cell("\u{feff}DAL")])]);

        let snapshot = extract_rows(&tbody).unwrap();
        assert_eq!(texts(&snapshot), vec![vec!["7", "DAL"]]);
    }

    #[test]
    fn test_non_section_is_rejected() {
        let result = extract_rows(&ElementNode::new("div"));
        match result {
            Err(ExportError::NotATableSection { tag }) => assert_eq!(tag, "div"),
            other => panic!("Expected NotATableSection, got {:?}", other),
        }
    }

    #[test]
    fn test_th_cells_in_body_rows() {
        let tbody = ElementNode::new("tbody").with_children(vec![tr(vec![
            ElementNode::new("th").with_text("1"),
            cell("Dak Prescott"),
        ])]);

        let snapshot = extract_rows(&tbody).unwrap();
        assert_eq!(texts(&snapshot), vec![vec!["1", "Dak Prescott"]]);
    }

    #[test]
    fn test_nested_table_rows_are_skipped() {
        let nested = ElementNode::new("table").with_children(vec![tr(vec![cell("inner")])]);
        let tbody = ElementNode::new("tbody").with_children(vec![tr(vec![
            ElementNode::new("td").with_text("outer").with_children(vec![nested]),
        ])]);

        let snapshot = extract_rows(&tbody).unwrap();
        assert_eq!(texts(&snapshot), vec![vec!["outer"]]);
    }

    fn table_with_head(head_rows: Vec<ElementNode>) -> ElementNode {
        ElementNode::new("table").with_children(vec![
            ElementNode::new("thead").with_children(head_rows),
            ElementNode::new("tbody").with_children(vec![tr(vec![cell("1"), cell("2"), cell("3")])]),
        ])
    }

    fn th(text: &str) -> ElementNode {
        ElementNode::new("th").with_text(text)
    }

    #[test]
    fn test_headers_from_sibling_thead() {
        let table = table_with_head(vec![tr(vec![th("X"), th(" Y "), th("Z")])]);
        let tree = DomTree::new(table).with_selected_path(vec![1]);

        let headers = extract_headers(&tree).unwrap();
        assert_eq!(headers.headers, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_header_rows_grouped() {
        let table = table_with_head(vec![
            tr(vec![th(""), th("Passing")]),
            tr(vec![th("Player"), th("Cmp"), th("Att")]),
        ]);
        let tree = DomTree::new(table).with_selected_path(vec![1]);

        let rows = extract_header_rows(&tree).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(HeaderSnapshot::from_last_row(&rows).headers, vec!["Player", "Cmp", "Att"]);
        assert_eq!(extract_headers(&tree).unwrap().len(), 5);
    }

    #[test]
    fn test_missing_thead() {
        let table = ElementNode::new("table").with_children(vec![ElementNode::new("tbody")]);
        let tree = DomTree::new(table).with_selected_path(vec![0]);

        assert!(matches!(extract_headers(&tree), Err(ExportError::MissingHeaderSection)));
    }

    #[test]
    fn test_no_enclosing_table() {
        let tree = DomTree::new(ElementNode::new("tbody"));
        assert!(matches!(extract_headers(&tree), Err(ExportError::NoEnclosingTable)));
    }

    #[test]
    fn test_extract_selected_rows() {
        let table = table_with_head(vec![tr(vec![th("X")])]);
        let tree = DomTree::new(table).with_selected_path(vec![1]);

        let snapshot = extract_selected_rows(&tree).unwrap();
        assert_eq!(texts(&snapshot), vec![vec!["1", "2", "3"]]);
    }
}
