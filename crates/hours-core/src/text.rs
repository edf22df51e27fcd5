//! Small text helpers shared by the extractors.

use std::ops::Range;

/// True if `span` is preceded and followed by whitespace or a string boundary.
pub(crate) fn is_word_bounded(text: &str, span: &Range<usize>) -> bool {
    let before = text[..span.start].chars().next_back();
    let after = text[span.end..].chars().next();
    before.is_none_or(char::is_whitespace) && after.is_none_or(char::is_whitespace)
}

/// Removes every span from `text`, then collapses whitespace runs to a single
/// space and trims the result.
///
/// Spans may overlap or arrive in any order.
pub(crate) fn strip_spans(text: &str, spans: &[Range<usize>]) -> String {
    let mut spans = spans.to_vec();
    spans.sort_by_key(|span| span.start);

    let mut kept = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in spans {
        if span.start > cursor {
            kept.push_str(&text[cursor..span.start]);
            // Keep the removed token as a word break.
            kept.push(' ');
        }
        cursor = cursor.max(span.end);
    }
    kept.push_str(&text[cursor..]);

    collapse_whitespace(&kept)
}

/// Removes every literal occurrence of each needle from `text`, collapsing
/// whitespace after each pass.
///
/// Runs until nothing changes, since collapsing can line up a needle that
/// contains a space. Each removal shortens the text, so this terminates.
pub(crate) fn remove_literals(text: &str, needles: &[&str]) -> String {
    let mut current = collapse_whitespace(text);
    loop {
        let mut next = current.clone();
        for needle in needles.iter().filter(|n| !n.is_empty()) {
            next = next.replace(needle, " ");
        }
        let next = collapse_whitespace(&next);
        if next == current {
            return current;
        }
        current = next;
    }
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
