//! Tag search-string helpers.

/// The token completion applies to: the last whitespace-delimited word of the
/// search input. `None` when the input is empty or ends in a space (nothing
/// to complete).
pub fn completion_token(input: &str) -> Option<&str> {
    if input.is_empty() || input.ends_with(' ') {
        return None;
    }
    Some(match input.rfind(' ') {
        Some(i) => &input[i + 1..],
        None => input,
    })
}

/// Build the full replacement search strings for a set of candidate tags,
/// keeping everything before the completed token intact.
pub fn replace_last_token(input: &str, candidates: &[String]) -> Vec<String> {
    let prefix = match input.rfind(' ') {
        Some(i) => &input[..=i],
        None => "",
    };
    candidates
        .iter()
        .map(|tag| format!("{prefix}{tag}"))
        .collect()
}
