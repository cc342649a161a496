// ABOUTME: Newline and space normalization with East-Asian-width-aware boundaries.
// ABOUTME: Collapses whitespace runs, dropping spaces entirely next to wide glyphs.

use ego_tree::{NodeId, Tree};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Node};

use crate::dom::visit::{
    next_visible_text_node, prev_visible_text_node, NeighborPolicy,
};
use crate::dom::{insert_boundary_slots, is_opaque_container, node_text, prune_empty_text, set_text};
use crate::unicode::{
    has_ascii_whitespace_head, has_ascii_whitespace_tail, should_reserve_space,
    should_reserve_space_between_texts, trim_ascii_whitespace,
};

/// An ASCII whitespace run containing at least one newline. These runs come
/// from source formatting (soft wrapping, indentation) and collapse away
/// entirely unless a space must be reserved between the characters they
/// separated.
static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\t\n\f\r ]*\n[\t\n\f\r ]*").unwrap());

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\t\n\f\r ]+").unwrap());

const POLICY: NeighborPolicy = NeighborPolicy::SiblingBounded;

/// Collapses newline-bearing whitespace runs, including runs spanning element
/// boundaries.
///
/// Each level first gets a transient empty text slot between every pair of
/// adjacent sibling elements, so boundary spacing has a node to land in. Text
/// payloads are then rebuilt left to right against the nearest visible text
/// neighbors, a space surviving at a boundary only when both facing
/// characters are narrow. Empty leftovers, slots included, are pruned before
/// the level is done.
pub fn normalize_newlines(html: &mut Html) {
    let tree = &mut html.tree;
    let mut work = vec![tree.root().id()];

    while let Some(parent) = work.pop() {
        if is_opaque_container(tree.get(parent).expect("node id in arena")) {
            continue;
        }
        normalize_level(tree, parent, &mut work);
    }
}

fn normalize_level(tree: &mut Tree<Node>, parent: NodeId, work: &mut Vec<NodeId>) {
    insert_boundary_slots(tree, parent);

    let child_ids: Vec<NodeId> = tree
        .get(parent)
        .expect("node id in arena")
        .children()
        .map(|n| n.id())
        .collect();

    // Rebuild text payloads first, in document order. Lookups read the live
    // tree: earlier siblings at this level are already rewritten, the
    // interiors of child elements are still untouched.
    for &id in &child_ids {
        let rebuilt = {
            let node = tree.get(id).expect("node id in arena");
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let data = text.to_string();
            let prev = prev_visible_text_node(node, POLICY)
                .and_then(node_text)
                .map(str::to_string);
            let next = next_visible_text_node(node, POLICY)
                .and_then(node_text)
                .map(str::to_string);
            rebuild_text(&data, prev.as_deref(), next.as_deref())
        };
        set_text(tree, id, &rebuilt);
    }

    // Then queue child elements for their own levels.
    for &id in &child_ids {
        if tree.get(id).expect("node id in arena").value().is_element() {
            work.push(id);
        }
    }

    prune_empty_text(tree, parent);
}

/// Computes the replacement payload for one text node given the payloads of
/// its visible text neighbors.
fn rebuild_text(data: &str, prev: Option<&str>, next: Option<&str>) -> String {
    let mut out = String::new();

    let has_content =
        !data.is_empty() && (!trim_ascii_whitespace(data).is_empty() || !data.contains('\n'));

    if has_content {
        if let Some(prev) = prev {
            if (has_ascii_whitespace_tail(prev) || has_ascii_whitespace_head(data))
                && should_reserve_space_between_texts(prev, data)
            {
                out.push(' ');
            }
        }

        for fragment in NEWLINE_RUN.split(data).filter(|t| !t.is_empty()) {
            if !out.is_empty()
                && should_reserve_space(out.chars().next_back(), fragment.chars().next())
            {
                out.push(' ');
            }
            out.push_str(fragment);
        }

        if let Some(next) = next {
            if (has_ascii_whitespace_tail(data) || has_ascii_whitespace_head(next))
                && should_reserve_space_between_texts(data, next)
            {
                out.push(' ');
            }
        }
    } else if let (Some(prev), Some(next)) = (prev, next) {
        // Whitespace-only (with a newline) or an empty boundary slot: the
        // node collapses to at most one space between its neighbors.
        if (has_ascii_whitespace_tail(prev) || has_ascii_whitespace_head(next) || !data.is_empty())
            && should_reserve_space_between_texts(prev, next)
        {
            out.push(' ');
        }
    }

    WHITESPACE_RUN.replace_all(&out, " ").into_owned()
}
