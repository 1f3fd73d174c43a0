/// At most this many words go into an image query.
pub const MAX_QUERY_WORDS: usize = 3;

/// Words need strictly more than this many characters to count as keywords.
pub const MIN_KEYWORD_EXCLUSIVE: usize = 3;

/// Image-search query for a caption: the first few long words, in order.
///
/// Falls back to `default_query` when no word qualifies.
pub fn image_query(text: &str, default_query: &str) -> String {
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| w.chars().count() > MIN_KEYWORD_EXCLUSIVE)
        .take(MAX_QUERY_WORDS)
        .collect();
    if words.is_empty() {
        default_query.to_owned()
    } else {
        words.join(" ")
    }
}
