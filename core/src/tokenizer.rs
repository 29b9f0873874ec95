/// Splits raw text into terms. The index and the query parser share one instance.
pub trait Tokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Splits on ASCII spaces only; runs of spaces never yield empty terms.
///
/// Other whitespace is not a separator: control characters such as tabs and
/// newlines are rejected by validation before tokenization ever happens.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split(' ').filter(|t| !t.is_empty()).collect()
    }
}

/// True when `text` contains a character below U+0020.
pub fn has_control_chars(text: &str) -> bool {
    text.chars().any(|c| c < ' ')
}
