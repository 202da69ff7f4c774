//! Ordered fallback rules for single-valued detail fields
//!
//! Each field is described by a slice of [`Rule`]s. [`first_match`] tries them
//! in order and keeps the first non-empty text, so the fallback chain of every
//! field is readable at a glance in the constants below.

use crate::markup::selectors::{ITEM_TEXT, SELECTED, SUB_HEADER, SYNTAX, WITH_OVERLOADS};
use crate::markup::{
    find_all_by_class, find_by_classes, find_by_tag_and_text, has_class, next_siblings_by_class,
    previous_element_sibling, text_content, ANY_TAG,
};
use scraper::ElementRef;

/// A single way of locating a text field inside a detail block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Text of the first `tag` element carrying all of `classes`
    FirstWithClasses {
        tag: &'static str,
        classes: &'static [&'static str],
    },

    /// Text of the item-text block immediately preceding the first sub-header
    /// whose text starts with `prefix`
    BeforeSubHeader { prefix: &'static str },

    /// Text of the first item-text block following the `div` whose text is
    /// exactly `label`
    AfterLabel { label: &'static str },
}

impl Rule {
    /// Applies the rule to a content block
    ///
    /// Returns `None` when the anchor is missing or the located text is empty.
    pub fn apply(&self, content: ElementRef<'_>) -> Option<String> {
        let text = match *self {
            Rule::FirstWithClasses { tag, classes } => {
                find_by_classes(content, tag, classes).map(text_content)
            }
            Rule::BeforeSubHeader { prefix } => {
                find_all_by_class(content, ANY_TAG, SUB_HEADER)
                    .into_iter()
                    .find(|header| text_content(*header).starts_with(prefix))
                    .and_then(previous_element_sibling)
                    .filter(|block| has_class(block, ITEM_TEXT))
                    .map(text_content)
            }
            Rule::AfterLabel { label } => find_by_tag_and_text(content, "div", label)
                .and_then(|anchor| next_siblings_by_class(anchor, "div", ITEM_TEXT).next())
                .map(text_content),
        };

        text.filter(|t| !t.is_empty())
    }
}

/// Tries each rule in order and returns the first non-empty result
///
/// Returns an empty string when no rule matches.
pub fn first_match(content: ElementRef<'_>, rules: &[Rule]) -> String {
    rules
        .iter()
        .find_map(|rule| rule.apply(content))
        .unwrap_or_default()
}

pub const FUNCTION_DESCRIPTION: &[Rule] = &[
    Rule::FirstWithClasses {
        tag: "div",
        classes: &[ITEM_TEXT],
    },
    Rule::BeforeSubHeader { prefix: "Syntax" },
];

pub const VARIABLE_DESCRIPTION: &[Rule] = &[
    Rule::FirstWithClasses {
        tag: "div",
        classes: &[ITEM_TEXT],
    },
    Rule::BeforeSubHeader { prefix: "Type" },
];

pub const FUNCTION_SYNTAX: &[Rule] = &[
    Rule::FirstWithClasses {
        tag: "pre",
        classes: &[SYNTAX, SELECTED, WITH_OVERLOADS],
    },
    Rule::FirstWithClasses {
        tag: "pre",
        classes: &[SYNTAX, SELECTED],
    },
];

pub const FUNCTION_RETURNS: &[Rule] = &[Rule::AfterLabel { label: "Returns" }];

pub const VARIABLE_TYPE: &[Rule] = &[Rule::AfterLabel { label: "Type" }];
