use scraper::{ElementRef, Selector};

pub mod classify;
pub(crate) mod match_detail;
pub(crate) mod match_list;

pub use classify::{classify_form, classify_scheduled, classify_status, StyleTag};
pub use match_detail::extract_match_detail;
pub use match_list::extract_match_list;

/// Parses a selector known at compile time.
pub(crate) fn sel(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|_| unreachable!("static selector: {css}"))
}

/// Trimmed text content of an element.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first matching descendant; empty string when nothing
/// matches.
pub(crate) fn select_text(scope: &ElementRef<'_>, selector: &Selector) -> String {
    scope
        .select(selector)
        .next()
        .map(text_of)
        .unwrap_or_default()
}

/// Closest ancestor matching `selector` — the DOM `closest()`, minus the
/// element itself.
pub(crate) fn closest<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| selector.matches(ancestor))
}

/// Ordered extraction strategies for one field: the first selector that
/// matches anything wins.
pub(crate) fn resolve<'a>(
    scope: ElementRef<'a>,
    strategies: &[Selector],
) -> Option<ElementRef<'a>> {
    strategies
        .iter()
        .find_map(|strategy| scope.select(strategy).next())
}

/// Like [`resolve`], for fields that repeat (form bullets, scorer rows).
pub(crate) fn resolve_all<'a>(
    scope: ElementRef<'a>,
    strategies: &[Selector],
) -> Vec<ElementRef<'a>> {
    for strategy in strategies {
        let found: Vec<_> = scope.select(strategy).collect();
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}
