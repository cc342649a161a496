// ABOUTME: Main library entry point for the mojispace HTML post-processor.
// ABOUTME: Re-exports the passes, pipeline, navigation policy, and error type.

//! mojispace - whitespace normalization and thin-space insertion for HTML.
//!
//! This crate post-processes a parsed HTML tree for rendering: it removes
//! inter-element whitespace the way browsers collapse it, normalizes
//! newline-bearing whitespace runs with East-Asian-width-aware rules, and
//! inserts a caller-supplied marker element at every transition between wide
//! (CJK) and narrow (Latin) text. All passes mutate the tree in place; the
//! parser and serializer come from [`scraper`].
//!
//! # Example
//!
//! ```
//! use mojispace_engine::{marker_template, postprocess, Html};
//!
//! let mut doc = Html::parse_fragment("<p>code点</p>");
//! let marker = marker_template(r#"<span class="thin-space"></span>"#).unwrap();
//! postprocess(&mut doc, &marker);
//! assert!(doc.html().contains(r#"<span class="thin-space"></span>"#));
//! ```

pub mod dom;
pub mod error;
pub mod pipeline;
pub mod unicode;

pub use crate::dom::comments::remove_comments;
pub use crate::dom::newlines::normalize_newlines;
pub use crate::dom::spacing::insert_thin_space_markers;
pub use crate::dom::visit::NeighborPolicy;
pub use crate::dom::whitespace::remove_inter_element_whitespace;
pub use crate::error::EngineError;
pub use crate::pipeline::{marker_template, postprocess};

pub use scraper::{Html, Node};
