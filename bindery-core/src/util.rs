#[macro_export]
/// Returns a `String` holding at most 497 bytes from the start of the input
/// followed by `...` when truncation occurred. The input is evaluated once.
///
/// # Examples
/// ```ignore
/// use bindery_core::truncate_long;
/// assert_eq!(truncate_long!("Alice"), "Alice");
/// let long = format!("'{}'", "X".repeat(600));
/// assert!(truncate_long!(long).ends_with("..."));
/// ```
macro_rules! truncate_long {
    ($text:expr) => {{
        let text = $text;
        format!(
            "{}{}",
            &text[..$crate::floor_char_boundary(&text, 497)].trim(),
            if text.len() > 497 { "..." } else { "" },
        )
    }};
}

/// Largest char boundary of `text` that is not greater than `index`.
pub fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    (0..=index)
        .rev()
        .find(|i| text.is_char_boundary(*i))
        .unwrap_or(0)
}
