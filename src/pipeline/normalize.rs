//! Whitespace normalization and character budgets.

/// Collapse all whitespace runs to single spaces, trim, and cap at `max_chars`.
///
/// Pure and total: any input yields a valid result, and an input of only whitespace
/// yields the empty string. The cap counts characters, not bytes, so multi-byte text
/// is never split mid-character.
pub fn normalize(text: &str, max_chars: Option<usize>) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match max_chars {
        Some(limit) => truncate_chars(collapsed, limit),
        None => collapsed,
    }
}

fn truncate_chars(mut text: String, limit: usize) -> String {
    if let Some((offset, _)) = text.char_indices().nth(limit) {
        text.truncate(offset);
    }
    text
}
