//! Shared selector probing utilities for site parsers

use scraper::{ElementRef, Html, Selector};

/// Text content of an element with whitespace collapsed to single spaces.
pub fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapsed text of the first element matching `selector`, if non-empty.
pub fn first_text(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .next()
        .map(collapsed_text)
        .filter(|text| !text.is_empty())
}

/// Attribute value of the first element matching `selector`, if non-empty.
pub fn first_attr(doc: &Html, selector: &Selector, attr: &str) -> Option<String> {
    doc.select(selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(str::to_string)
        .filter(|value| !value.is_empty())
}

/// Probe an ordered fallback list of selectors, taking the first non-empty
/// text. Sites move their price markup around; parsers list every known
/// location and the first hit wins.
pub fn probe_text(doc: &Html, probes: &[&Selector]) -> Option<String> {
    probes.iter().find_map(|selector| first_text(doc, selector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static PRIMARY: Lazy<Selector> = Lazy::new(|| Selector::parse("span.primary").unwrap());
    static FALLBACK: Lazy<Selector> = Lazy::new(|| Selector::parse("span.fallback").unwrap());

    #[test]
    fn collapses_whitespace_across_nested_nodes() {
        let doc = Html::parse_document("<span class='primary'>  EUR\n  29,99\t</span>");
        assert_eq!(first_text(&doc, &PRIMARY).unwrap(), "EUR 29,99");
    }

    #[test]
    fn empty_elements_do_not_count_as_hits() {
        let doc = Html::parse_document("<span class='primary'>   </span>");
        assert_eq!(first_text(&doc, &PRIMARY), None);
    }

    #[test]
    fn probing_takes_the_first_non_empty_location() {
        let doc = Html::parse_document(
            "<span class='primary'></span><span class='fallback'>12,99</span>",
        );
        assert_eq!(probe_text(&doc, &[&PRIMARY, &FALLBACK]).unwrap(), "12,99");
    }

    #[test]
    fn missing_attribute_yields_none() {
        let doc = Html::parse_document("<span class='primary' content=''>x</span>");
        assert_eq!(first_attr(&doc, &PRIMARY, "content"), None);
        assert_eq!(first_attr(&doc, &PRIMARY, "data-price"), None);
    }
}
