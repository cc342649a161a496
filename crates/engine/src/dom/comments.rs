// ABOUTME: Comment removal with text-node merging.
// ABOUTME: Runs before the whitespace passes so comments never split a text run.

use ego_tree::Tree;
use scraper::{Html, Node};

use crate::dom::{node_text, set_text};

/// Removes every comment node from the tree.
///
/// When a removed comment sat directly between two text siblings, the two are
/// merged into one node, so later passes always see a text run as a single
/// payload.
pub fn remove_comments(html: &mut Html) {
    let tree = &mut html.tree;
    let mut work = vec![tree.root().id()];

    while let Some(parent) = work.pop() {
        let mut cursor = tree
            .get(parent)
            .expect("node id in arena")
            .first_child()
            .map(|n| n.id());

        while let Some(id) = cursor {
            let (mut next, is_comment, prev) = {
                let node = tree.get(id).expect("node id in arena");
                (
                    node.next_sibling().map(|n| n.id()),
                    node.value().is_comment(),
                    node.prev_sibling().map(|n| n.id()),
                )
            };

            if !is_comment {
                if tree.get(id).expect("node id in arena").value().is_element() {
                    work.push(id);
                }
                cursor = next;
                continue;
            }

            tree.get_mut(id).expect("node id in arena").detach();

            // Merge the two text nodes the comment was separating.
            if let (Some(prev_id), Some(next_id)) = (prev, next) {
                let merged = merge_payload(tree, prev_id, next_id);
                if let Some(data) = merged {
                    set_text(tree, prev_id, &data);
                    next = tree
                        .get(next_id)
                        .expect("node id in arena")
                        .next_sibling()
                        .map(|n| n.id());
                    tree.get_mut(next_id).expect("node id in arena").detach();
                }
            }

            cursor = next;
        }
    }
}

fn merge_payload(
    tree: &Tree<Node>,
    prev_id: ego_tree::NodeId,
    next_id: ego_tree::NodeId,
) -> Option<String> {
    let prev = tree.get(prev_id).expect("node id in arena");
    let next = tree.get(next_id).expect("node id in arena");
    match (node_text(prev), node_text(next)) {
        (Some(a), Some(b)) => Some(format!("{}{}", a, b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn apply(input: &str) -> String {
        let mut doc = Html::parse_fragment(input);
        remove_comments(&mut doc);
        let html = doc.html();
        html.strip_prefix("<html>")
            .and_then(|s| s.strip_suffix("</html>"))
            .expect("fragment wrapper")
            .to_string()
    }

    #[test]
    fn strips_comments() {
        assert_eq!(apply("<p>foo<!-- note --></p>"), "<p>foo</p>");
        assert_eq!(apply("<!--a--><p><!--b-->x<!--c--></p>"), "<p>x</p>");
    }

    #[test]
    fn merges_split_text_runs() {
        let mut doc = Html::parse_fragment("<p>foo<!--x-->bar</p>");
        remove_comments(&mut doc);
        let texts: Vec<String> = doc
            .tree
            .root()
            .descendants()
            .filter_map(|n| n.value().as_text().map(|t| t.to_string()))
            .collect();
        assert_eq!(texts, vec!["foobar".to_string()]);
    }

    #[test]
    fn keeps_non_adjacent_text_apart() {
        assert_eq!(
            apply("<p>foo<!--x--><b>y</b>bar</p>"),
            "<p>foo<b>y</b>bar</p>"
        );
    }
}
