//! Class names and markers used by the reference site's markup
//!
//! Everything the extractors look for is named here so that a markup change
//! upstream is a one-file edit.

/// Section header of the accordion index (one per category)
pub const SECTION_HEADER: &str = "tv-accordion__section-header";

/// Section body following each header; holds the item links
pub const SECTION_BODY: &str = "tv-accordion__section-body";

/// Content region of a dedicated detail page
pub const ITEM_CONTENT: &str = "tv-pine-reference-item__content";

/// Paragraph-style text block inside a detail block
pub const ITEM_TEXT: &str = "tv-pine-reference-item__text";

/// Sub-header inside a detail block ("Syntax", "Arguments", ...)
pub const SUB_HEADER: &str = "tv-pine-reference-item__sub-header";

/// Pre-formatted syntax block
pub const SYNTAX: &str = "tv-pine-reference-item__syntax";

/// Span carrying `name(type)` for one argument
pub const ARG_TYPE: &str = "tv-pine-reference-item__arg-type";

/// Modifier marking the syntax variant currently shown
pub const SELECTED: &str = "selected";

/// Modifier marking a syntax block that lists every overload
pub const WITH_OVERLOADS: &str = "with-overloads";

/// CSS marker signalling the index accordion has rendered
pub fn index_marker() -> String {
    format!("div.{}", SECTION_HEADER)
}

/// CSS marker signalling a dedicated detail page has rendered
pub fn content_marker() -> String {
    format!("div.{}", ITEM_CONTENT)
}

/// CSS marker for the element whose id equals `fragment`
///
/// Reference ids contain dots (`fun_ta.sma`), so an attribute selector is used
/// instead of `#id`.
pub fn fragment_marker(fragment: &str) -> String {
    let escaped = fragment.replace('\\', "\\\\").replace('"', "\\\"");
    format!("[id=\"{}\"]", escaped)
}
