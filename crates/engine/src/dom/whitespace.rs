// ABOUTME: Inter-element whitespace removal per the HTML rendering model.
// ABOUTME: Whitespace-only text between siblings collapses to one space or disappears.

use ego_tree::{NodeId, NodeRef, Tree};
use scraper::{Html, Node};

use crate::dom::is_opaque_container;
use crate::dom::visit::is_phrasing_element;
use crate::unicode::trim_ascii_whitespace;

/// Collapses or deletes whitespace-only text nodes sitting between sibling
/// elements.
///
/// A whitespace-only payload becomes a single space. The space survives when
/// the node is the sole content of its parent, or when both its immediate
/// siblings are phrasing elements (it renders as meaningful inter-inline
/// spacing); otherwise the node is detached. Text with any non-whitespace
/// content is left alone. Idempotent.
pub fn remove_inter_element_whitespace(html: &mut Html) {
    let tree = &mut html.tree;
    let mut work = vec![tree.root().id()];

    while let Some(parent) = work.pop() {
        if is_opaque_container(tree.get(parent).expect("node id in arena")) {
            continue;
        }
        strip_level(tree, parent, &mut work);
    }
}

enum Action {
    Recurse,
    Keep,
    CollapseToSpace,
    Delete,
}

fn strip_level(tree: &mut Tree<Node>, parent: NodeId, work: &mut Vec<NodeId>) {
    let mut cursor = tree
        .get(parent)
        .expect("node id in arena")
        .first_child()
        .map(|n| n.id());

    while let Some(id) = cursor {
        let (next, action) = {
            let node = tree.get(id).expect("node id in arena");
            (node.next_sibling().map(|n| n.id()), classify(node))
        };
        cursor = next;

        match action {
            Action::Recurse => work.push(id),
            Action::Keep => {}
            Action::CollapseToSpace => super::set_text(tree, id, " "),
            Action::Delete => tree.get_mut(id).expect("node id in arena").detach(),
        }
    }
}

fn classify(node: NodeRef<'_, Node>) -> Action {
    let Some(text) = node.value().as_text() else {
        return Action::Recurse;
    };

    if !trim_ascii_whitespace(text).is_empty() {
        return Action::Keep;
    }

    // Sole content of its parent: keep the canonical single space.
    if node.prev_sibling().is_none() && node.next_sibling().is_none() {
        return Action::CollapseToSpace;
    }

    // Between two phrasing elements the space is rendered, so it stays.
    let phrasing = |n: Option<NodeRef<'_, Node>>| {
        n.and_then(|n| n.value().as_element().map(|el| is_phrasing_element(el.name())))
            .unwrap_or(false)
    };
    if phrasing(node.prev_sibling()) && phrasing(node.next_sibling()) {
        return Action::CollapseToSpace;
    }

    Action::Delete
}
