//! Index discovery
//!
//! The reference index is an accordion: one section header per category,
//! each followed by a section body holding one link per item.

use crate::markup::selectors::{index_marker, SECTION_BODY, SECTION_HEADER};
use crate::markup::{find_all_by_class, find_all_by_tag, next_siblings_by_class, text_content};
use crate::model::{Category, ItemStub, Version};
use crate::source::PageSource;
use crate::ScrapeError;
use scraper::{ElementRef, Html};
use std::time::Duration;
use url::Url;

/// Retrieves a version's index and lists the stubs of one category
///
/// # Arguments
///
/// * `source` - Page source used to render the index
/// * `index_url` - Index page of the version
/// * `version` - The version being crawled (for error reporting)
/// * `category` - The category whose section is wanted
/// * `timeout` - How long to wait for the accordion to render
///
/// # Returns
///
/// * `Ok(Vec<ItemStub>)` - Stubs in document order (possibly empty)
/// * `Err(ScrapeError::RenderTimeout)` - The accordion never rendered
/// * `Err(ScrapeError::CategoryNotFound)` - No section for this category
pub async fn discover<P: PageSource + ?Sized>(
    source: &P,
    index_url: &Url,
    version: Version,
    category: Category,
    timeout: Duration,
) -> Result<Vec<ItemStub>, ScrapeError> {
    // Each discovery starts from a fresh index; detail retrievals of this
    // category may then reuse it
    source.forget(index_url).await;

    let markup = source
        .render(index_url, &index_marker(), timeout)
        .await?
        .ok_or_else(|| ScrapeError::RenderTimeout {
            version,
            url: index_url.to_string(),
        })?;

    parse_index(&markup, index_url, category)
        .ok_or(ScrapeError::CategoryNotFound { version, category })
}

/// Lists the stubs of `category` in rendered index markup
///
/// Returns `None` when the category's header (or the body after it) is absent.
/// Hrefs are resolved against `base`; the fragment is only kept for categories
/// that receive detail extraction.
pub fn parse_index(markup: &str, base: &Url, category: Category) -> Option<Vec<ItemStub>> {
    let document = Html::parse_document(markup);

    let header = find_all_by_class(document.root_element(), "div", SECTION_HEADER)
        .into_iter()
        .find(|header| text_content(*header) == category.title())?;

    let body = next_siblings_by_class(header, "div", SECTION_BODY).next()?;

    let stubs = find_all_by_tag(body, "a")
        .into_iter()
        .filter_map(|link| stub_from_link(link, base, category))
        .collect();

    Some(stubs)
}

fn stub_from_link(link: ElementRef<'_>, base: &Url, category: Category) -> Option<ItemStub> {
    let Some(href) = link.value().attr("href").map(str::trim) else {
        tracing::debug!("Skipping link without href: {}", text_content(link));
        return None;
    };

    let url = match base.join(href) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Skipping unresolvable link {}: {}", href, e);
            return None;
        }
    };

    let fragment = if category.captures_fragment() {
        url.fragment().map(str::to_string)
    } else {
        None
    };

    Some(ItemStub {
        name: text_content(link),
        url: url.to_string(),
        fragment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r##"
        <html><body><div class="tv-accordion">
            <div class="tv-accordion__section-header"> Variables </div>
            <div class="tv-accordion__section-body">
                <a href="#var_close">close</a>
            </div>
            <div class="tv-accordion__section-header">Functions</div>
            <div class="tv-accordion__section-body">
                <a href="#fun_ta.sma">ta.sma</a>
                <a href="#fun_ta.ema">ta.ema</a>
                <a>no href</a>
            </div>
            <div class="tv-accordion__section-header">Constants</div>
            <div class="tv-accordion__section-body">
                <a href="#const_color.red">color.red</a>
            </div>
            <div class="tv-accordion__section-header">Types</div>
            <div class="tv-accordion__section-body"></div>
        </div></body></html>
    "##;

    fn base() -> Url {
        Url::parse("https://www.tradingview.com/pine-script-reference/v6/").unwrap()
    }

    #[test]
    fn test_functions_in_document_order_with_fragments() {
        let stubs = parse_index(INDEX, &base(), Category::Functions).unwrap();
        assert_eq!(stubs.len(), 2);
        assert_eq!(stubs[0].name, "ta.sma");
        assert_eq!(
            stubs[0].url,
            "https://www.tradingview.com/pine-script-reference/v6/#fun_ta.sma"
        );
        assert_eq!(stubs[0].fragment.as_deref(), Some("fun_ta.sma"));
        assert_eq!(stubs[1].name, "ta.ema");
    }

    #[test]
    fn test_header_text_is_trimmed() {
        let stubs = parse_index(INDEX, &base(), Category::Variables).unwrap();
        assert_eq!(stubs.len(), 1);
        assert_eq!(stubs[0].fragment.as_deref(), Some("var_close"));
    }

    #[test]
    fn test_generic_category_has_no_fragment() {
        let stubs = parse_index(INDEX, &base(), Category::Constants).unwrap();
        assert_eq!(stubs.len(), 1);
        assert_eq!(stubs[0].fragment, None);
        assert!(stubs[0].url.ends_with("#const_color.red"));
    }

    #[test]
    fn test_empty_section_is_empty_not_missing() {
        let stubs = parse_index(INDEX, &base(), Category::Types).unwrap();
        assert!(stubs.is_empty());
    }

    #[test]
    fn test_link_without_href_is_skipped() {
        let stubs = parse_index(INDEX, &base(), Category::Functions).unwrap();
        assert!(stubs.iter().all(|s| s.name != "no href"));
    }

    #[test]
    fn test_missing_section() {
        assert!(parse_index(INDEX, &base(), Category::Keywords).is_none());
    }
}
