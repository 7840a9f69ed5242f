//! SQL text helpers for the `SQLite` task repository.

/// Escape character paired with patterns from [`like_pattern`].
pub(super) const LIKE_ESCAPE: char = '\\';

/// Builds a `LIKE` pattern matching `text` anywhere in a column.
///
/// `%`, `_` and the escape character itself are escaped so they match
/// literally. Use together with `ESCAPE '\'`.
#[must_use]
pub(super) fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
