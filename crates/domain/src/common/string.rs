//! String normalization helpers.

/// Trims `value`, returning `None` when nothing but whitespace remains.
///
/// # Examples
///
/// ```
/// use clark_domain::common::non_blank;
///
/// assert_eq!(non_blank("  Intro to Testing "), Some("Intro to Testing"));
/// assert_eq!(non_blank("   "), None);
/// assert_eq!(non_blank(""), None);
/// ```
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Trims an owned string, reusing the allocation when nothing was trimmed.
pub fn trimmed(value: String) -> String {
    if value.trim().len() == value.len() {
        value
    } else {
        value.trim().to_string()
    }
}
