//! Story title derivation.

pub const DEFAULT_TITLE: &str = "Generated Story";
const MAX_TITLE_WORDS: usize = 5;

/// Title-cased first words of `prompt`, or [`DEFAULT_TITLE`] when it has none.
///
/// ```
/// assert_eq!(story_generator::derive_title("a primary button, with icon"), "A Primary Button With Icon");
/// assert_eq!(story_generator::derive_title("  !!  "), "Generated Story");
/// ```
pub fn derive_title(prompt: &str) -> String {
    let words: Vec<String> = prompt
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .take(MAX_TITLE_WORDS)
        .map(capitalize)
        .collect();
    if words.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        words.join(" ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
