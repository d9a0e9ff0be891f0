use crate::error::ValidationError;

/// Greedily pack whitespace-separated words into segments of at most `limit`
/// characters, joined by single spaces.
///
/// Lengths are counted in Unicode scalar values. A word that on its own is
/// longer than `limit` fails the whole split: it cannot be sent in one call
/// without breaking it mid-word. Empty or whitespace-only input yields no
/// segments.
pub fn split(text: &str, limit: usize) -> Result<Vec<String>, ValidationError> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if word_len > limit {
            return Err(ValidationError::WordTooLong {
                len: word_len,
                limit,
            });
        }

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= limit {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            segments.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    Ok(segments)
}
