//! Detail extraction for functions and variables
//!
//! A stub is turned into a detail record in three steps: a gate slot is taken,
//! the item's detail markup is retrieved through the page source, and the
//! kind-specific field rules run against the item's content block. Retrieval
//! failures are isolated to the item: the stub fields are kept, the detail
//! fields stay empty, and the error is handed back alongside the record.

use crate::crawler::ConcurrencyGate;
use crate::extract::rules::{
    first_match, FUNCTION_DESCRIPTION, FUNCTION_RETURNS, FUNCTION_SYNTAX, VARIABLE_DESCRIPTION,
    VARIABLE_TYPE,
};
use crate::markup::selectors::{
    content_marker, fragment_marker, ARG_TYPE, ITEM_CONTENT, ITEM_TEXT, SUB_HEADER,
};
use crate::markup::{
    find_by_class, find_by_id, find_by_tag_and_text, has_class, inner_markup,
    next_element_siblings, outer_markup, text_content,
};
use crate::model::{
    Argument, DetailKind, FunctionDetail, FunctionRecord, ItemStub, Record, VariableDetail,
    VariableRecord,
};
use crate::source::PageSource;
use crate::ScrapeError;
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// How an item's detail block is located
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLocator {
    /// The item lives on the index page under the element whose id is the
    /// stub's fragment; wait for that element to render
    #[default]
    Fragment,

    /// The item has a dedicated page; wait for its content region
    Page,
}

impl DetailLocator {
    /// Returns the CSS marker to wait for before the detail markup is usable
    pub fn marker(self, stub: &ItemStub) -> Result<String, ScrapeError> {
        match self {
            DetailLocator::Page => Ok(content_marker()),
            DetailLocator::Fragment => stub
                .fragment
                .as_deref()
                .map(fragment_marker)
                .ok_or_else(|| ScrapeError::MissingFragment {
                    name: stub.name.clone(),
                }),
        }
    }

    /// Locates the item's content block in a rendered document
    pub fn content_block<'a>(self, document: &'a Html, stub: &ItemStub) -> Option<ElementRef<'a>> {
        let root = document.root_element();
        match self {
            DetailLocator::Page => find_by_class(root, "div", ITEM_CONTENT),
            DetailLocator::Fragment => stub
                .fragment
                .as_deref()
                .and_then(|fragment| find_by_id(root, fragment)),
        }
    }
}

/// Result of extracting one item
#[derive(Debug)]
pub struct DetailOutcome {
    /// The record, with empty detail fields if retrieval failed
    pub record: Record,

    /// Why retrieval failed, if it did
    pub error: Option<ScrapeError>,
}

/// Extracts the detail record of one item
///
/// Blocks on the gate until a slot is free, then waits up to `timeout` for the
/// locator's marker. A timeout or any other retrieval failure is logged and
/// reported in [`DetailOutcome::error`]; it never propagates.
pub async fn extract_detail<P: PageSource + ?Sized>(
    source: &P,
    gate: &ConcurrencyGate,
    locator: DetailLocator,
    kind: DetailKind,
    stub: ItemStub,
    timeout: Duration,
) -> DetailOutcome {
    let slot = match gate.acquire().await {
        Ok(slot) => slot,
        Err(e) => {
            return DetailOutcome {
                record: empty_record(kind, stub),
                error: Some(e),
            }
        }
    };

    let outcome = match fetch_detail_markup(source, locator, &stub, timeout).await {
        Ok(markup) => {
            tracing::debug!("Extracting detail for {}", stub.name);
            DetailOutcome {
                record: build_record(kind, stub, &markup, locator),
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!("Detail for '{}' left empty: {}", stub.name, e);
            DetailOutcome {
                record: empty_record(kind, stub),
                error: Some(e),
            }
        }
    };

    slot.release();
    outcome
}

async fn fetch_detail_markup<P: PageSource + ?Sized>(
    source: &P,
    locator: DetailLocator,
    stub: &ItemStub,
    timeout: Duration,
) -> Result<String, ScrapeError> {
    let marker = locator.marker(stub)?;
    let url = Url::parse(&stub.url)?;

    source
        .render(&url, &marker, timeout)
        .await?
        .ok_or_else(|| ScrapeError::DetailTimeout {
            name: stub.name.clone(),
            url: stub.url.clone(),
        })
}

/// Builds a record from retrieved markup
///
/// If the content block cannot be located the record keeps empty details.
pub fn build_record(
    kind: DetailKind,
    stub: ItemStub,
    markup: &str,
    locator: DetailLocator,
) -> Record {
    let document = Html::parse_document(markup);
    let Some(content) = locator.content_block(&document, &stub) else {
        tracing::warn!("No content block found for '{}'", stub.name);
        return empty_record(kind, stub);
    };

    match kind {
        DetailKind::Function => Record::Function(FunctionRecord {
            detail: extract_function_detail(content),
            stub,
        }),
        DetailKind::Variable => Record::Variable(VariableRecord {
            detail: extract_variable_detail(content),
            stub,
        }),
    }
}

fn empty_record(kind: DetailKind, stub: ItemStub) -> Record {
    match kind {
        DetailKind::Function => Record::Function(FunctionRecord {
            stub,
            detail: FunctionDetail::default(),
        }),
        DetailKind::Variable => Record::Variable(VariableRecord {
            stub,
            detail: VariableDetail::default(),
        }),
    }
}

/// Applies the function field rules to a content block
pub fn extract_function_detail(content: ElementRef<'_>) -> FunctionDetail {
    let syntax = first_match(content, FUNCTION_SYNTAX);

    FunctionDetail {
        info: outer_markup(content),
        description: first_match(content, FUNCTION_DESCRIPTION),
        return_type: split_return_type(&syntax),
        syntax,
        returns: first_match(content, FUNCTION_RETURNS),
        arguments: extract_arguments(content),
    }
}

/// Applies the variable field rules to a content block
pub fn extract_variable_detail(content: ElementRef<'_>) -> VariableDetail {
    VariableDetail {
        info: outer_markup(content),
        description: first_match(content, VARIABLE_DESCRIPTION),
        type_name: first_match(content, VARIABLE_TYPE),
        remarks: extract_remarks(content),
    }
}

/// Returns the trimmed text after the last `→` of a syntax line
pub fn split_return_type(syntax: &str) -> String {
    syntax
        .rsplit_once('→')
        .map(|(_, ret)| ret.trim().to_string())
        .unwrap_or_default()
}

/// Collects the argument list following the "Arguments" sub-header
///
/// The scan covers the contiguous run of item-text blocks carrying an
/// argument-type span; the first sibling that is anything else ends it.
pub fn extract_arguments(content: ElementRef<'_>) -> Vec<Argument> {
    let Some(header) = find_by_tag_and_text(content, "div", "Arguments") else {
        return Vec::new();
    };

    let mut arguments = Vec::new();
    for block in next_element_siblings(header) {
        if !has_class(&block, ITEM_TEXT) {
            break;
        }
        let Some(marker) = find_by_class(block, "span", ARG_TYPE) else {
            break;
        };
        if let Some(argument) = parse_argument(&text_content(marker)) {
            arguments.push(argument);
        }
    }

    arguments
}

/// Parses `name(type)`; returns `None` when there is no `(`
pub fn parse_argument(marker: &str) -> Option<Argument> {
    let (name, rest) = marker.split_once('(')?;
    let rest = rest.trim();
    let type_name = rest.strip_suffix(')').unwrap_or(rest).trim();

    Some(Argument {
        name: name.trim().to_string(),
        type_name: type_name.to_string(),
    })
}

/// Collects the markup of the remark paragraphs following the "Remarks" label
///
/// Stops at the next sub-header; other blocks in between are skipped.
pub fn extract_remarks(content: ElementRef<'_>) -> Vec<String> {
    let Some(label) = find_by_tag_and_text(content, "div", "Remarks") else {
        return Vec::new();
    };

    next_element_siblings(label)
        .take_while(|block| !has_class(block, SUB_HEADER))
        .filter(|block| has_class(block, ITEM_TEXT))
        .map(inner_markup)
        .collect()
}
