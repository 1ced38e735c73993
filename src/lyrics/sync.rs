use std::sync::LazyLock;

use regex::Regex;

/// A line that opens with a `[mm:ss]`, `[mm:ss.xx]` or `[mm:ss:xx]` tag.
static TIMESTAMP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\[\d{1,3}:\d{1,2}(?:[.:]\d{1,3})?\]").unwrap()
});

/// Whether `text` is time-tagged (LRC style) rather than plain lyrics.
pub fn is_synchronized(text: &str) -> bool {
    TIMESTAMP_LINE.is_match(text)
}
