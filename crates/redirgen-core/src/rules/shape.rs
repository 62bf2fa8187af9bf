//! URL shape predicates.
//!
//! Both patterns are ASCII-only and case-insensitive; the character classes
//! spell out both cases so Unicode case folding never widens them.

use regex::Regex;
use std::sync::LazyLock;

/// Path segments, query and fragment shared by both patterns.
const URL_TAIL: &str = r"(/[-a-zA-Z0-9%_.~+]*)*(\?[;&a-zA-Z0-9%_.~+=-]*)?(#[-a-zA-Z0-9_]*)?$";

static RELATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^/[-a-zA-Z0-9%_.~+]*{URL_TAIL}")).expect("relative URL pattern")
});

// `(https?://)+` accepts a doubled scheme such as `https://https://host.com`.
static ABSOLUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^([hH][tT][tT][pP][sS]?://)+((([a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])*)\.)+[a-zA-Z]{{2,}}){URL_TAIL}"
    ))
    .expect("absolute URL pattern")
});

/// True if `url` is a site-relative path like `/blog/post?x=1#top`.
pub fn is_relative_url(url: &str) -> bool {
    RELATIVE.is_match(url)
}

/// True if `url` is an absolute http(s) URL like `https://example.com/a`.
pub fn is_absolute_url(url: &str) -> bool {
    ABSOLUTE.is_match(url)
}
