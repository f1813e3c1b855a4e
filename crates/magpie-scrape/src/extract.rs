//! Tree-walking record extraction.
//!
//! Candidate paragraphs are `p` elements anywhere under an element with
//! class `entry-content`. A candidate's direct children are gated on
//! shape (node count, link count, a "Video " label, exactly one text
//! node) before anything is extracted, so navigation and prose paragraphs
//! fall through silently.

use magpie_dom::{Document, NodeId, NodeType};

use crate::record::Lesson;

/// The label prefix that marks a lesson's video link.
const VIDEO_PREFIX: &str = "Video ";

/// Extract all lesson records from a parsed page, in document order.
#[must_use]
pub fn extract_lessons(doc: &Document) -> Vec<Lesson> {
    doc.descendants(doc.root())
        .filter(|&id| is_candidate_paragraph(doc, id))
        .filter_map(|id| lesson_from_paragraph(doc, id))
        .collect()
}

/// A `p` element with an `entry-content`-classed ancestor.
fn is_candidate_paragraph(doc: &Document, id: NodeId) -> bool {
    let Some(element) = doc.as_element(id) else {
        return false;
    };
    if element.tag_name != "p" {
        return false;
    }
    doc.ancestors(id).any(|ancestor| {
        doc.as_element(ancestor)
            .is_some_and(|e| e.classes().contains("entry-content"))
    })
}

/// Direct children that matter for the shape gate: elements, and text
/// nodes that are not blank.
fn content_children(doc: &Document, id: NodeId) -> Vec<NodeId> {
    doc.children(id)
        .iter()
        .copied()
        .filter(|&child| match doc.get(child).map(|n| &n.node_type) {
            Some(NodeType::Element(_)) => true,
            Some(NodeType::Text(text)) => !text.trim().is_empty(),
            _ => false,
        })
        .collect()
}

fn is_link(doc: &Document, id: NodeId) -> bool {
    doc.as_element(id).is_some_and(|e| e.tag_name == "a")
}

/// First text descendant of a node, depth-first.
fn first_text_descendant(doc: &Document, id: NodeId) -> Option<&str> {
    doc.descendants(id).find_map(|d| doc.as_text(d))
}

/// Gate a candidate's children and pull out the record fields.
///
/// Validity: 2 to 4 content children, 1 to 3 of them links, at least one
/// link labeled "Video ...", exactly one text node. A paragraph that
/// passes the gate but lacks an `href` or a usable label yields no record
/// rather than failing the scrape.
fn lesson_from_paragraph(doc: &Document, id: NodeId) -> Option<Lesson> {
    let children = content_children(doc, id);
    if !(2..=4).contains(&children.len()) {
        return None;
    }

    let links: Vec<NodeId> = children
        .iter()
        .copied()
        .filter(|&c| is_link(doc, c))
        .collect();
    if !(1..=3).contains(&links.len()) {
        return None;
    }

    let has_video_label = links.iter().any(|&link| {
        first_text_descendant(doc, link)
            .is_some_and(|text| text.trim_start().starts_with(VIDEO_PREFIX))
    });
    if !has_video_label {
        return None;
    }

    let text_nodes: Vec<&str> = children
        .iter()
        .filter_map(|&c| doc.as_text(c))
        .collect();
    let [topic] = text_nodes.as_slice() else {
        return None;
    };

    let number = first_text_descendant(doc, links[0])?
        .trim_start()
        .strip_prefix(VIDEO_PREFIX)?
        .to_string();

    let hrefs: Vec<&str> = links
        .iter()
        .map(|&link| doc.as_element(link).and_then(|e| e.get("href")))
        .collect::<Option<Vec<&str>>>()?;

    Some(Lesson {
        number,
        topic: topic.trim().to_string(),
        video_url: hrefs[0].to_string(),
        practice_url: hrefs.get(1).map(|s| (*s).to_string()),
        textbook_url: hrefs.get(2).map(|s| (*s).to_string()),
        match_percent: None,
    })
}
