//! Implicit closure of unclosed table and form scopes.
//!
//! HTML permits omitting certain end tags: a second `<td>` closes the one
//! before it, a `<tr>` closes the previous row, a nested `<form>` closes
//! the outer form. The resolver here decides, for an incoming tag, whether
//! the new element attaches to the current insertion point or to the
//! parent of some ancestor that the tag implicitly closes.
//!
//! The whole decision is a pure function over an explicitly built ancestor
//! chain, so it can be tested without running the builder.

use magpie_dom::{Document, NodeId};

/// Find the implied parent for an incoming tag, if it differs from the
/// current insertion point.
///
/// `ancestors` is the chain from the current insertion point (first
/// element, inclusive) up to the root. The scan is bounded per tag:
///
/// - `form`: the whole chain; a `form` ancestor is closed.
/// - `td`: up to (not including) the nearest `tr`; a `td` in that prefix
///   is closed.
/// - `tr`: up to the nearest `table`, `thead`, or `tbody`; a `tr` in that
///   prefix is closed. `tfoot` is deliberately not a boundary, so a row
///   opened under `tfoot` closes a row found above it.
/// - `thead`/`tbody`/`tfoot`: up to the nearest `table`; a section of the
///   same name is closed.
///
/// `None` means no implicit closure: the caller keeps its insertion point.
/// A match with no parent (the synthetic root) also resolves to `None`.
#[must_use]
pub fn implied_parent(doc: &Document, ancestors: &[NodeId], tag: &str) -> Option<NodeId> {
    let closed = match tag {
        "form" => find_target(doc, ancestors, "form", |_| false),
        "td" => find_target(doc, ancestors, "td", |name| name == "tr"),
        "tr" => find_target(doc, ancestors, "tr", |name| {
            matches!(name, "table" | "thead" | "tbody")
        }),
        "thead" | "tbody" | "tfoot" => find_target(doc, ancestors, tag, |name| name == "table"),
        _ => None,
    }?;
    doc.parent(closed)
}

/// Walk the chain looking for an element named `target`, stopping before
/// any element whose name satisfies `boundary`.
fn find_target(
    doc: &Document,
    ancestors: &[NodeId],
    target: &str,
    boundary: impl Fn(&str) -> bool,
) -> Option<NodeId> {
    for &id in ancestors {
        let Some(element) = doc.as_element(id) else {
            continue;
        };
        if boundary(&element.tag_name) {
            return None;
        }
        if element.tag_name == target {
            return Some(id);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use magpie_dom::{ElementData, NodeType};

    fn element(name: &str) -> NodeType {
        NodeType::Element(ElementData {
            tag_name: name.to_string(),
            attrs: Vec::new(),
        })
    }

    /// Chain from `from` to the root, `from` included.
    fn chain(doc: &Document, from: NodeId) -> Vec<NodeId> {
        let mut out = vec![from];
        out.extend(doc.ancestors(from));
        out
    }

    #[test]
    fn td_closes_open_cell_within_row() {
        let mut doc = Document::new();
        let table = doc.append(NodeId::ROOT, element("table"));
        let tr = doc.append(table, element("tr"));
        let td = doc.append(tr, element("td"));

        assert_eq!(implied_parent(&doc, &chain(&doc, td), "td"), Some(tr));
    }

    #[test]
    fn td_search_stops_at_row_boundary() {
        let mut doc = Document::new();
        let outer_tr = doc.append(NodeId::ROOT, element("tr"));
        let outer_td = doc.append(outer_tr, element("td"));
        let inner_tr = doc.append(outer_td, element("tr"));

        // The outer td is beyond the nearest tr, so nothing closes.
        assert_eq!(implied_parent(&doc, &chain(&doc, inner_tr), "td"), None);
    }

    #[test]
    fn tr_closes_open_row_but_stops_at_table() {
        let mut doc = Document::new();
        let table = doc.append(NodeId::ROOT, element("table"));
        let tr = doc.append(table, element("tr"));
        let td = doc.append(tr, element("td"));

        assert_eq!(implied_parent(&doc, &chain(&doc, td), "tr"), Some(table));
        // From the table itself there is no row to close.
        assert_eq!(implied_parent(&doc, &chain(&doc, table), "tr"), None);
    }

    #[test]
    fn tr_walks_through_tfoot() {
        // tfoot is not in the tr boundary set: a row under tfoot closes a
        // row found above it.
        let mut doc = Document::new();
        let table = doc.append(NodeId::ROOT, element("table"));
        let tr = doc.append(table, element("tr"));
        let tfoot = doc.append(tr, element("tfoot"));

        assert_eq!(implied_parent(&doc, &chain(&doc, tfoot), "tr"), Some(table));
    }

    #[test]
    fn form_scans_the_whole_chain() {
        let mut doc = Document::new();
        let form = doc.append(NodeId::ROOT, element("form"));
        let table = doc.append(form, element("table"));
        let tr = doc.append(table, element("tr"));
        let td = doc.append(tr, element("td"));

        assert_eq!(
            implied_parent(&doc, &chain(&doc, td), "form"),
            Some(NodeId::ROOT)
        );
    }

    #[test]
    fn sections_close_their_own_kind_within_table() {
        let mut doc = Document::new();
        let table = doc.append(NodeId::ROOT, element("table"));
        let thead = doc.append(table, element("thead"));
        let tr = doc.append(thead, element("tr"));

        assert_eq!(
            implied_parent(&doc, &chain(&doc, tr), "thead"),
            Some(table)
        );
        // A different section does not close thead.
        assert_eq!(implied_parent(&doc, &chain(&doc, tr), "tbody"), None);
    }

    #[test]
    fn ordinary_tags_never_imply_closure() {
        let mut doc = Document::new();
        let div = doc.append(NodeId::ROOT, element("div"));
        let inner = doc.append(div, element("div"));

        assert_eq!(implied_parent(&doc, &chain(&doc, inner), "div"), None);
        assert_eq!(implied_parent(&doc, &chain(&doc, inner), "p"), None);
    }
}
