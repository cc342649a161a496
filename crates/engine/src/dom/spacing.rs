// ABOUTME: Thin-space marker insertion at wide/narrow script boundaries.
// ABOUTME: Splits text at width transitions and plants clones of a caller-supplied element.

use ego_tree::{NodeId, Tree};
use scraper::{Html, Node};

use crate::dom::visit::{first_char_after, last_char_before, NeighborPolicy};
use crate::dom::{insert_boundary_slots, is_opaque_container, prune_empty_text, text_node};
use crate::unicode::should_have_thin_space;

const POLICY: NeighborPolicy = NeighborPolicy::SiblingBounded;

/// Inserts a clone of `marker` at every transition between wide (CJK) and
/// narrow text, including transitions across element boundaries.
///
/// Text nodes are split at internal transitions; the boundary slots between
/// adjacent sibling elements (see [`insert_boundary_slots`]) catch the
/// transitions that happen across markup. Every insertion is a deep clone of
/// the template: the marker instances share nothing with it and remain
/// ordinary, independently removable elements.
pub fn insert_thin_space_markers(html: &mut Html, marker: &Node) {
    let tree = &mut html.tree;
    let mut work = vec![tree.root().id()];

    while let Some(parent) = work.pop() {
        if is_opaque_container(tree.get(parent).expect("node id in arena")) {
            continue;
        }
        space_level(tree, parent, &mut work, marker);
    }
}

fn space_level(tree: &mut Tree<Node>, parent: NodeId, work: &mut Vec<NodeId>, marker: &Node) {
    insert_boundary_slots(tree, parent);

    let mut cursor = tree
        .get(parent)
        .expect("node id in arena")
        .first_child()
        .map(|n| n.id());

    while let Some(id) = cursor {
        let plan = {
            let node = tree.get(id).expect("node id in arena");
            let next = node.next_sibling().map(|n| n.id());
            match node.value().as_text() {
                None => {
                    cursor = next;
                    work.push(id);
                    continue;
                }
                Some(text) => {
                    let tokens = split_at_transitions(text);
                    let before = last_char_before(node, POLICY);
                    let after = first_char_after(node, POLICY);
                    (next, tokens, before, after)
                }
            }
        };
        let (next, tokens, before, after) = plan;
        cursor = next;

        tree.get_mut(id).expect("node id in arena").detach();

        // Re-insert at the original position: tokens in order, a marker
        // clone at every boundary where the thin-space rule holds.
        let mut insert = |value: Node| {
            match next {
                Some(next_id) => {
                    tree.get_mut(next_id)
                        .expect("node id in arena")
                        .insert_before(value);
                }
                None => {
                    tree.get_mut(parent)
                        .expect("node id in arena")
                        .append(value);
                }
            };
        };

        if tokens.is_empty() {
            // An empty boundary slot: the transition, if any, is between the
            // neighbors on either side.
            if should_have_thin_space(before, after) {
                insert(marker.clone());
            }
        } else {
            if should_have_thin_space(before, tokens[0].chars().next()) {
                insert(marker.clone());
            }
            for (i, token) in tokens.iter().enumerate() {
                if i > 0 {
                    insert(marker.clone());
                }
                insert(text_node(token));
            }
            let last = tokens[tokens.len() - 1].chars().next_back();
            if should_have_thin_space(last, after) {
                insert(marker.clone());
            }
        }
    }

    prune_empty_text(tree, parent);
}

/// Cuts `data` into tokens at every internal wide/narrow transition. Empty
/// input yields no tokens; otherwise the tokens concatenate back to `data`.
fn split_at_transitions(data: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;

    for (i, c) in data.char_indices() {
        if should_have_thin_space(prev, Some(c)) {
            tokens.push(data[start..i].to_string());
            start = i;
        }
        prev = Some(c);
    }
    if start < data.len() {
        tokens.push(data[start..].to_string());
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_at_width_transitions() {
        assert_eq!(split_at_transitions(""), Vec::<String>::new());
        assert_eq!(split_at_transitions("foo"), vec!["foo"]);
        assert_eq!(split_at_transitions("fooあ"), vec!["foo", "あ"]);
        assert_eq!(split_at_transitions("fooあbar"), vec!["foo", "あ", "bar"]);
        assert_eq!(split_at_transitions("あい"), vec!["あい"]);
        // Space and punctuation suppress the cut.
        assert_eq!(split_at_transitions("foo あ"), vec!["foo あ"]);
        assert_eq!(split_at_transitions("foo(あ"), vec!["foo(あ"]);
    }

    #[test]
    fn tokens_concatenate_to_input() {
        let data = "漢字とlatinが混ざるtext。";
        assert_eq!(split_at_transitions(data).concat(), data);
    }
}
