// ABOUTME: Visible-neighbor navigation across sibling and element boundaries.
// ABOUTME: Finds the nearest rendered text around a node without crossing block elements.

//! Visible-neighbor search.
//!
//! "Visible" means reachable in document order without crossing a
//! non-phrasing (block-level) element boundary: phrasing elements are
//! transparent to the search, block elements are opaque. The passes use this
//! to make spacing decisions that look across inline markup like
//! `foo<b>あ</b>`.

use ego_tree::NodeRef;
use once_cell::sync::Lazy;
use scraper::Node;
use std::collections::HashSet;

/// Phrasing (inline) elements per the HTML standard's phrasing content list.
const PHRASING_ELEMENT_NAMES: &[&str] = &[
    "a", "abbr", "area", "audio", "b", "bdi", "bdo", "br", "button", "canvas", "cite", "code",
    "data", "datalist", "del", "dfn", "em", "embed", "i", "iframe", "img", "input", "ins", "kbd",
    "label", "link", "map", "mark", "math", "meta", "meter", "noscript", "object", "output",
    "picture", "progress", "q", "ruby", "s", "samp", "script", "select", "slot", "small", "span",
    "strong", "sub", "sup", "svg", "template", "textarea", "time", "u", "var", "video", "wbr",
];

/// Metadata elements whose contents are never rendered as flowed text.
const METADATA_ELEMENT_NAMES: &[&str] = &[
    "base", "link", "meta", "noscript", "script", "style", "template", "title",
];

static PHRASING_ELEMENTS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| PHRASING_ELEMENT_NAMES.iter().copied().collect());

static METADATA_ELEMENTS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| METADATA_ELEMENT_NAMES.iter().copied().collect());

pub fn is_phrasing_element(name: &str) -> bool {
    PHRASING_ELEMENTS.contains(name)
}

pub fn is_metadata_element(name: &str) -> bool {
    METADATA_ELEMENTS.contains(name)
}

/// What to do when a node has no sibling on the searched side.
///
/// `SiblingBounded` stops the search at the parent's fence; boundary
/// decisions at an element boundary are then owned by the pass iteration at
/// the parent level, which can see down into child elements but never the
/// reverse. `AscendAncestors` climbs until some ancestor has a sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborPolicy {
    SiblingBounded,
    AscendAncestors,
}

/// The next node in document order that is not hidden behind a non-phrasing
/// element boundary, or `None` when the search hits such a boundary.
pub fn next_visible_node<'a>(
    node: NodeRef<'a, Node>,
    policy: NeighborPolicy,
) -> Option<NodeRef<'a, Node>> {
    let mut cur = match policy {
        NeighborPolicy::SiblingBounded => node.next_sibling()?,
        NeighborPolicy::AscendAncestors => {
            let mut n = node;
            loop {
                if let Some(sibling) = n.next_sibling() {
                    break sibling;
                }
                n = n.parent()?;
            }
        }
    };

    // Descend to the first visible descendant.
    loop {
        if let Some(el) = cur.value().as_element() {
            if !is_phrasing_element(el.name()) {
                return None;
            }
        }
        match cur.first_child() {
            Some(child) => cur = child,
            None => break,
        }
    }

    Some(cur)
}

/// Mirror of [`next_visible_node`], descending into last children.
pub fn prev_visible_node<'a>(
    node: NodeRef<'a, Node>,
    policy: NeighborPolicy,
) -> Option<NodeRef<'a, Node>> {
    let mut cur = match policy {
        NeighborPolicy::SiblingBounded => node.prev_sibling()?,
        NeighborPolicy::AscendAncestors => {
            let mut n = node;
            loop {
                if let Some(sibling) = n.prev_sibling() {
                    break sibling;
                }
                n = n.parent()?;
            }
        }
    };

    loop {
        if let Some(el) = cur.value().as_element() {
            if !is_phrasing_element(el.name()) {
                return None;
            }
        }
        match cur.last_child() {
            Some(child) => cur = child,
            None => break,
        }
    }

    Some(cur)
}

/// The nearest following non-empty text node, or `None` if the search is
/// exhausted first.
pub fn next_visible_text_node<'a>(
    node: NodeRef<'a, Node>,
    policy: NeighborPolicy,
) -> Option<NodeRef<'a, Node>> {
    let mut cur = node;
    loop {
        cur = next_visible_node(cur, policy)?;
        if let Some(text) = cur.value().as_text() {
            if !text.is_empty() {
                return Some(cur);
            }
        }
    }
}

/// The nearest preceding non-empty text node.
pub fn prev_visible_text_node<'a>(
    node: NodeRef<'a, Node>,
    policy: NeighborPolicy,
) -> Option<NodeRef<'a, Node>> {
    let mut cur = node;
    loop {
        cur = prev_visible_node(cur, policy)?;
        if let Some(text) = cur.value().as_text() {
            if !text.is_empty() {
                return Some(cur);
            }
        }
    }
}

/// First scalar of the nearest following visible text, `None` if there is none.
pub fn first_char_after(node: NodeRef<'_, Node>, policy: NeighborPolicy) -> Option<char> {
    let text = next_visible_text_node(node, policy)?;
    text.value().as_text()?.chars().next()
}

/// Last scalar of the nearest preceding visible text.
pub fn last_char_before(node: NodeRef<'_, Node>, policy: NeighborPolicy) -> Option<char> {
    let text = prev_visible_text_node(node, policy)?;
    text.value().as_text()?.chars().next_back()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first_text<'a>(doc: &'a Html, needle: &str) -> NodeRef<'a, Node> {
        doc.tree
            .root()
            .descendants()
            .find(|n| n.value().as_text().map(|t| &**t) == Some(needle))
            .expect("text node present")
    }

    #[test]
    fn sees_into_phrasing_siblings() {
        let doc = Html::parse_fragment("<p>foo<b><i>あ</i></b></p>");
        let node = first_text(&doc, "foo");
        assert_eq!(
            first_char_after(node, NeighborPolicy::SiblingBounded),
            Some('あ')
        );
    }

    #[test]
    fn blocked_by_non_phrasing_elements() {
        let doc = Html::parse_fragment("<div>foo<p>bar</p></div>");
        let node = first_text(&doc, "foo");
        assert_eq!(first_char_after(node, NeighborPolicy::SiblingBounded), None);
        assert_eq!(
            first_char_after(node, NeighborPolicy::AscendAncestors),
            None
        );
    }

    #[test]
    fn sibling_bounded_stops_at_parent_fence() {
        let doc = Html::parse_fragment("<p>foo<b>bar</b>baz</p>");
        let inner = first_text(&doc, "bar");
        assert_eq!(last_char_before(inner, NeighborPolicy::SiblingBounded), None);
        assert_eq!(first_char_after(inner, NeighborPolicy::SiblingBounded), None);
    }

    #[test]
    fn ascend_policy_climbs_to_outer_siblings() {
        let doc = Html::parse_fragment("<p>foo<b>bar</b>baz</p>");
        let inner = first_text(&doc, "bar");
        assert_eq!(
            last_char_before(inner, NeighborPolicy::AscendAncestors),
            Some('o')
        );
        assert_eq!(
            first_char_after(inner, NeighborPolicy::AscendAncestors),
            Some('b')
        );
    }

    #[test]
    fn skips_childless_elements_and_comments() {
        let doc = Html::parse_fragment("<p>foo<wbr><!--c-->bar</p>");
        let node = first_text(&doc, "foo");
        assert_eq!(
            first_char_after(node, NeighborPolicy::SiblingBounded),
            Some('b')
        );
    }

    #[test]
    fn element_vocabularies() {
        assert!(is_phrasing_element("span"));
        assert!(is_phrasing_element("code"));
        assert!(!is_phrasing_element("p"));
        assert!(!is_phrasing_element("li"));
        assert!(is_metadata_element("script"));
        assert!(!is_metadata_element("pre"));
    }
}
