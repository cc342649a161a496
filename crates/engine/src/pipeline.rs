// ABOUTME: The fixed pass sequence and marker template construction.
// ABOUTME: Comments, inter-element whitespace, newlines, thin-space markers, in that order.

use scraper::{Html, Node};

use crate::dom::comments::remove_comments;
use crate::dom::newlines::normalize_newlines;
use crate::dom::spacing::insert_thin_space_markers;
use crate::dom::whitespace::remove_inter_element_whitespace;
use crate::error::EngineError;

/// Runs the full post-processing sequence over a parsed document.
///
/// The order is significant: comment removal merges split text runs, the
/// whitespace remover flattens inter-element gaps, the newline normalizer
/// collapses what remains, and only then are thin-space markers planted at
/// the surviving wide/narrow boundaries.
pub fn postprocess(html: &mut Html, marker: &Node) {
    remove_comments(html);
    remove_inter_element_whitespace(html);
    normalize_newlines(html);
    insert_thin_space_markers(html, marker);
}

/// Builds a marker template from an HTML fragment, e.g.
/// `<span class="thin-space"></span>`.
///
/// The returned node is the first element in the fragment, detached from any
/// tree; [`insert_thin_space_markers`] deep-clones it per insertion. Children
/// of the element are ignored: a marker is always inserted empty.
pub fn marker_template(fragment: &str) -> Result<Node, EngineError> {
    let parsed = Html::parse_fragment(fragment);
    for node in parsed.tree.root().descendants() {
        if let Some(el) = node.value().as_element() {
            // Skip the synthetic fragment wrapper.
            if el.name() != "html" {
                return Ok(node.value().clone());
            }
        }
    }
    Err(EngineError::EmptyMarkerTemplate(fragment.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn marker_template_takes_first_element() {
        let marker = marker_template(r#"<span class="thin-space"></span>"#).unwrap();
        let el = marker.as_element().unwrap();
        assert_eq!(el.name(), "span");
        assert_eq!(el.attr("class"), Some("thin-space"));
    }

    #[test]
    fn marker_template_rejects_elementless_fragments() {
        assert!(matches!(
            marker_template("just text"),
            Err(EngineError::EmptyMarkerTemplate(_))
        ));
        assert!(matches!(
            marker_template(""),
            Err(EngineError::EmptyMarkerTemplate(_))
        ));
    }

    #[test]
    fn postprocess_runs_all_passes() {
        let marker = marker_template("<dummy-space></dummy-space>").unwrap();
        let mut doc = Html::parse_fragment("<p>foo<!-- note --> \n あ</p>");
        postprocess(&mut doc, &marker);
        let html = doc.html();
        assert_eq!(
            html,
            "<html><p>foo<dummy-space></dummy-space>あ</p></html>"
        );
    }
}
