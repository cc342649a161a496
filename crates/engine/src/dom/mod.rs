// ABOUTME: Tree mutation passes and the plumbing they share.
// ABOUTME: Slot insertion between sibling elements, empty-text pruning, payload accessors.

//! DOM mutation passes.
//!
//! The passes mutate a parsed [`scraper::Html`] tree in place through
//! [`ego_tree`] arena handles. Traversal is worklist-based (no native
//! recursion) and every loop snapshots the next sibling id before mutating,
//! so insertions and removals never invalidate the walk.

pub mod comments;
pub mod newlines;
pub mod spacing;
pub mod visit;
pub mod whitespace;

use ego_tree::{NodeId, NodeRef, Tree};
use scraper::node::Text;
use scraper::Node;

use crate::dom::visit::is_metadata_element;

pub(crate) fn empty_text() -> Node {
    Node::Text(Text { text: "".into() })
}

pub(crate) fn text_node(data: &str) -> Node {
    Node::Text(Text { text: data.into() })
}

pub(crate) fn node_text<'a>(node: NodeRef<'a, Node>) -> Option<&'a str> {
    node.value().as_text().map(|t| &**t)
}

/// Rewrites the payload of a text node. A non-text id is a caller bug.
pub(crate) fn set_text(tree: &mut Tree<Node>, id: NodeId, data: &str) {
    let mut node = tree.get_mut(id).expect("node id in arena");
    match node.value() {
        Node::Text(text) => text.text = data.into(),
        other => panic!("set_text on non-text node: {:?}", other),
    }
}

/// Elements whose contents the passes never touch: metadata elements and
/// preformatted text.
pub(crate) fn is_opaque_container(node: NodeRef<'_, Node>) -> bool {
    node.value()
        .as_element()
        .is_some_and(|el| is_metadata_element(el.name()) || el.name() == "pre")
}

/// Inserts a transient empty text node between every pair of adjacent sibling
/// elements under `parent`. The slots give boundary decisions a uniform place
/// to land (a space, a marker) without special-casing "insert between two
/// elements"; whatever stays empty is pruned at the end of the pass.
pub(crate) fn insert_boundary_slots(tree: &mut Tree<Node>, parent: NodeId) {
    let mut cursor = tree
        .get(parent)
        .expect("node id in arena")
        .first_child()
        .map(|n| n.id());

    while let Some(id) = cursor {
        let (next, needs_slot) = {
            let node = tree.get(id).expect("node id in arena");
            let next = node.next_sibling().map(|n| n.id());
            let needs_slot = node.value().is_element()
                && node
                    .next_sibling()
                    .is_some_and(|sibling| sibling.value().is_element());
            (next, needs_slot)
        };
        cursor = next;
        if needs_slot {
            tree.get_mut(id)
                .expect("node id in arena")
                .insert_after(empty_text());
        }
    }
}

/// Detaches every empty-payload text node directly under `parent`.
pub(crate) fn prune_empty_text(tree: &mut Tree<Node>, parent: NodeId) {
    let mut cursor = tree
        .get(parent)
        .expect("node id in arena")
        .first_child()
        .map(|n| n.id());

    while let Some(id) = cursor {
        let (next, is_empty_text) = {
            let node = tree.get(id).expect("node id in arena");
            let next = node.next_sibling().map(|n| n.id());
            let is_empty_text = node.value().as_text().is_some_and(|t| t.is_empty());
            (next, is_empty_text)
        };
        cursor = next;
        if is_empty_text {
            tree.get_mut(id).expect("node id in arena").detach();
        }
    }
}
