use crate::index::SearchServer;
use crate::tokenizer::{has_control_chars, Tokenizer};
use crate::{Result, SearchError};
use std::collections::BTreeSet;

/// Structured query: required ("plus") and excluded ("minus") terms, stop words removed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
    is_stop: bool,
}

impl<T: Tokenizer> SearchServer<T> {
    /// Validates `text` and splits it into plus and minus terms.
    ///
    /// Rejected: control characters, a bare `-`, and terms starting with `--`.
    pub fn parse_query(&self, text: &str) -> Result<Query> {
        if has_control_chars(text) {
            return Err(invalid_query(text, "query contains control characters"));
        }
        let mut query = Query::default();
        for token in self.tokenizer.tokenize(text) {
            let word = self.parse_query_word(token).map_err(|reason| invalid_query(text, reason))?;
            if word.is_stop {
                continue;
            }
            if word.is_minus {
                query.minus_words.insert(word.data.to_string());
            } else {
                query.plus_words.insert(word.data.to_string());
            }
        }
        Ok(query)
    }

    fn parse_query_word<'a>(&self, token: &'a str) -> std::result::Result<QueryWord<'a>, &'static str> {
        let (data, is_minus) = match token.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (token, false),
        };
        if is_minus && data.is_empty() {
            return Err("'-' must be followed by a term");
        }
        if data.starts_with('-') {
            return Err("double minus before a term");
        }
        Ok(QueryWord { data, is_minus, is_stop: self.is_stop_word(data) })
    }
}

fn invalid_query(text: &str, reason: &str) -> SearchError {
    tracing::debug!(query = text, reason, "query rejected");
    SearchError::InvalidQuery(format!("{reason} in {text:?}"))
}
