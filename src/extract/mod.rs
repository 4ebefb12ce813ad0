//! Rules that turn matched markup subtrees into typed records.
//!
//! Every lookup is lenient: a missing element or attribute yields an empty
//! value instead of an error, so one malformed subtree never costs the rest
//! of the record.

pub mod media;
pub mod profile;
pub mod text;
pub mod time;
pub mod tweet;

use scraper::{ElementRef, Selector};

pub use profile::{extract_profile, ProfileUpdate};
pub use tweet::extract_tweet;

/// Value of `name` on `element`, or an empty string.
#[must_use]
pub fn attr(element: ElementRef<'_>, name: &str) -> String {
    element.value().attr(name).unwrap_or_default().to_string()
}

/// Value of `name` on the first descendant matching `selector`, or an empty string.
#[must_use]
pub fn child_attr(element: ElementRef<'_>, selector: &Selector, name: &str) -> String {
    element
        .select(selector)
        .next()
        .map(|child| attr(child, name))
        .unwrap_or_default()
}

/// Text of every descendant matching `selector`, concatenated and trimmed.
#[must_use]
pub fn child_text(element: ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .flat_map(|child| child.text())
        .collect::<String>()
        .trim()
        .to_string()
}

#[must_use]
pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Whether any ancestor of `element` carries `class`.
#[must_use]
pub fn inside_class(element: ElementRef<'_>, class: &str) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| has_class(ancestor, class))
}

/// Resolve a site-relative path against `base`.
///
/// An empty path resolves to an empty string rather than the bare origin.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    fn sel(css: &str) -> Selector {
        Selector::parse(css).unwrap()
    }

    #[test]
    fn test_child_helpers() {
        let html = Html::parse_fragment(
            r#"<div id="root" class="card big">
                <span class="name"> Jane </span><span class="name">Doe </span>
                <img class="pic" src="a.png"><img class="pic" src="b.png">
                <p class="inner"><b class="deep">x</b></p>
            </div>"#,
        );
        let root = html.select(&sel("#root")).next().unwrap();

        assert_eq!(child_text(root, &sel(".name")), "Jane Doe");
        assert_eq!(child_text(root, &sel(".missing")), "");
        assert_eq!(child_attr(root, &sel(".pic"), "src"), "a.png");
        assert_eq!(child_attr(root, &sel(".pic"), "alt"), "");
        assert_eq!(attr(root, "id"), "root");
        assert!(has_class(root, "big"));
        assert!(!has_class(root, "small"));

        let deep = root.select(&sel(".deep")).next().unwrap();
        assert!(inside_class(deep, "inner"));
        assert!(inside_class(deep, "card"));
        assert!(!inside_class(deep, "deep"));
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://twitter.com", "/fyko/status/1"),
            "https://twitter.com/fyko/status/1"
        );
        assert_eq!(
            join_url("https://twitter.com/", "fyko"),
            "https://twitter.com/fyko"
        );
        assert_eq!(join_url("https://twitter.com", ""), "");
    }
}
