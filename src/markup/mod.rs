//! Markup query layer
//!
//! DOM-style lookups over an already-parsed document snapshot. Every lookup is
//! pure, and "not found" is always an empty result (`None` or an empty `Vec`),
//! never an error: the extractors chain these lookups through fallbacks and
//! rely on absence being cheap to test.
//!
//! A `tag` argument of `"*"` matches any element name.

pub mod selectors;

use crate::ScrapeError;
use scraper::{ElementRef, Html, Selector};

/// Wildcard tag for lookups that only care about classes or text
pub const ANY_TAG: &str = "*";

/// Checks whether an element has the given tag name and class
pub fn is_element(element: &ElementRef<'_>, tag: &str, class: &str) -> bool {
    tag_matches(element, tag) && has_class(element, class)
}

/// Checks whether an element carries a class
pub fn has_class(element: &ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

fn tag_matches(element: &ElementRef<'_>, tag: &str) -> bool {
    tag == ANY_TAG || element.value().name().eq_ignore_ascii_case(tag)
}

/// Iterates `root` and all of its element descendants in document order
fn elements<'a>(root: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    root.descendants().filter_map(ElementRef::wrap)
}

/// Finds the first element of `tag` whose trimmed text equals `text` exactly
pub fn find_by_tag_and_text<'a>(
    root: ElementRef<'a>,
    tag: &str,
    text: &str,
) -> Option<ElementRef<'a>> {
    elements(root).find(|e| tag_matches(e, tag) && text_content(*e) == text)
}

/// Finds the first element of `tag` carrying `class`
pub fn find_by_class<'a>(root: ElementRef<'a>, tag: &str, class: &str) -> Option<ElementRef<'a>> {
    elements(root).find(|e| is_element(e, tag, class))
}

/// Finds the first element of `tag` carrying every class in `classes`
pub fn find_by_classes<'a>(
    root: ElementRef<'a>,
    tag: &str,
    classes: &[&str],
) -> Option<ElementRef<'a>> {
    elements(root).find(|e| tag_matches(e, tag) && classes.iter().all(|c| has_class(e, c)))
}

/// Finds every element of `tag` carrying `class`, in document order
pub fn find_all_by_class<'a>(root: ElementRef<'a>, tag: &str, class: &str) -> Vec<ElementRef<'a>> {
    elements(root).filter(|e| is_element(e, tag, class)).collect()
}

/// Finds every element named `tag`, in document order
pub fn find_all_by_tag<'a>(root: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    elements(root).filter(|e| tag_matches(e, tag)).collect()
}

/// Finds the element whose `id` attribute equals `id`
pub fn find_by_id<'a>(root: ElementRef<'a>, id: &str) -> Option<ElementRef<'a>> {
    elements(root).find(|e| e.value().id() == Some(id))
}

/// Lazily iterates the following element siblings of `node`
pub fn next_element_siblings<'a>(node: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    node.next_siblings().filter_map(ElementRef::wrap)
}

/// Lazily iterates the following siblings of `node` matching `tag` and `class`
///
/// Non-matching siblings are skipped, not treated as a boundary.
pub fn next_siblings_by_class<'a>(
    node: ElementRef<'a>,
    tag: &'a str,
    class: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> {
    next_element_siblings(node).filter(move |e| is_element(e, tag, class))
}

/// Returns the closest preceding element sibling of `node`
pub fn previous_element_sibling(node: ElementRef<'_>) -> Option<ElementRef<'_>> {
    node.prev_siblings().find_map(ElementRef::wrap)
}

/// Returns the concatenated text of `node`, trimmed
pub fn text_content(node: ElementRef<'_>) -> String {
    node.text().collect::<String>().trim().to_string()
}

/// Returns the markup of the children of `node`
pub fn inner_markup(node: ElementRef<'_>) -> String {
    node.inner_html()
}

/// Returns the markup of `node` itself, tag included
pub fn outer_markup(node: ElementRef<'_>) -> String {
    node.html()
}

/// Checks whether a CSS selector matches anything in `markup`
///
/// Page sources use this to evaluate wait markers against a snapshot.
pub fn matches_selector(markup: &str, css: &str) -> Result<bool, ScrapeError> {
    let selector = Selector::parse(css).map_err(|_| ScrapeError::InvalidSelector(css.to_string()))?;
    let document = Html::parse_document(markup);
    let found = document.select(&selector).next().is_some();
    Ok(found)
}
