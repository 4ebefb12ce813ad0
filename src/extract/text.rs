//! Cleanup for tweet body text.

use std::sync::LazyLock;

use regex::Regex;

/// Inline media links appended to tweets that carry attachments.
static PIC_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)pic\.twitter\.com/\w+").unwrap());

const LINK_PREFIX: &str = "http";

/// Normalize raw tweet text: split links that were glued to the preceding
/// word, then drop `pic.twitter.com/...` media links.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let spaced = space_links(raw);
    strip_media_links(&spaced)
}

/// Insert a space before every `http` that directly follows a non-whitespace
/// character.
#[must_use]
pub fn space_links(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 8);
    let mut rest = raw;

    while let Some(pos) = rest.find(LINK_PREFIX) {
        out.push_str(&rest[..pos]);
        if out.chars().next_back().is_some_and(|c| !c.is_whitespace()) {
            out.push(' ');
        }
        out.push_str(LINK_PREFIX);
        rest = &rest[pos + LINK_PREFIX.len()..];
    }
    out.push_str(rest);

    out
}

/// Remove every `pic.twitter.com/<token>` fragment, leaving the surrounding
/// text untouched. Fragments formed by a removal are removed too.
#[must_use]
pub fn strip_media_links(text: &str) -> String {
    let mut out = text.to_string();
    while PIC_LINK.is_match(&out) {
        out = PIC_LINK.replace_all(&out, "").into_owned();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_links() {
        assert_eq!(
            space_links("read thishttps://t.co/abc"),
            "read this https://t.co/abc"
        );
        assert_eq!(
            space_links("onehttps://t.co/a twohttps://t.co/bhttp://x.y"),
            "one https://t.co/a two https://t.co/b http://x.y"
        );
    }

    #[test]
    fn test_space_links_leaves_separated_links() {
        let text = "see https://t.co/abc\nand\thttp://example.com";
        assert_eq!(space_links(text), text);
        assert_eq!(space_links("https://t.co/abc"), "https://t.co/abc");
    }

    #[test]
    fn test_strip_media_links() {
        assert_eq!(
            strip_media_links("look at this pic.twitter.com/AbC123"),
            "look at this "
        );
        assert_eq!(
            strip_media_links("PIC.Twitter.com/xyz and more"),
            " and more"
        );
        assert_eq!(strip_media_links("nothing here"), "nothing here");
    }

    #[test]
    fn test_strip_media_links_nested() {
        assert_eq!(
            strip_media_links("see pic.twitter.compic.twitter.com/X/abc"),
            "see "
        );
        assert!(!PIC_LINK.is_match(&normalize("see pic.twitter.compic.twitter.com/X/abc")));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize("new posthttps://t.co/xyzpic.twitter.com/q1w2e3"),
            "new post https://t.co/xyz"
        );
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "plain text",
            "http",
            "httphttphttp",
            "ahttpbhttpc",
            "linkhttps://t.co/1 pic.twitter.com/abc trailing",
            "xpic.twitter.com/abchttps://t.co/2",
            "  http://already spaced  ",
            "ünïcödehttps://t.co/ü",
            "see pic.twitter.compic.twitter.com/X/abc",
            "ahtpic.twitter.com/X.tp://t.co/9",
            "pic.twitter.com/pic.twitter.com/a/b/c",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "input: {sample:?}");
            assert!(!PIC_LINK.is_match(&once), "input: {sample:?}");
        }
    }

    #[test]
    fn test_normalize_only_removes_media_fragment() {
        let text = "before pic.twitter.com/Tok3n after";
        assert_eq!(normalize(text), "before  after");
    }
}
