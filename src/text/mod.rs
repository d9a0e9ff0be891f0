pub mod chunker;

pub use chunker::split;

/// Character count as shown to the user and enforced by the endpoint.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}
