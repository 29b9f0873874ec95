use crate::tokenizer::{has_control_chars, Tokenizer, WhitespaceTokenizer};
use crate::{DocumentStatus, Result, SearchError};
use std::collections::{BTreeMap, HashMap, HashSet};

pub type DocId = i32;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DocMeta {
    pub(crate) rating: i32,
    pub(crate) status: DocumentStatus,
    /// Term frequencies of this document; they sum to 1.0.
    pub(crate) word_freqs: BTreeMap<String, f64>,
}

/// Posting lists plus per-document metadata.
#[derive(Debug, Default, Clone)]
pub(crate) struct InvertedIndex {
    pub(crate) postings: HashMap<String, BTreeMap<DocId, f64>>, // postings sorted by doc_id
    pub(crate) docs: HashMap<DocId, DocMeta>,
    /// Insertion order of document ids.
    pub(crate) doc_order: Vec<DocId>,
}

impl InvertedIndex {
    pub(crate) fn new() -> Self { Self::default() }

    pub(crate) fn num_docs(&self) -> usize { self.docs.len() }

    pub(crate) fn postings(&self, term: &str) -> Option<&BTreeMap<DocId, f64>> { self.postings.get(term) }
}

/// In-memory TF-IDF index over documents with a rating and a status.
///
/// Documents are added once and never updated. Queries are scored against the
/// current document count, so adding a document shifts the IDF of every term
/// for subsequent queries.
#[derive(Debug, Clone)]
pub struct SearchServer<T = WhitespaceTokenizer> {
    pub(crate) tokenizer: T,
    pub(crate) stop_words: HashSet<String>,
    pub(crate) index: InvertedIndex,
}

impl SearchServer {
    /// Builds an empty index. Each entry is split into words, so `["и в", "на"]`
    /// yields three stop words.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_tokenizer(WhitespaceTokenizer, stop_words)
    }

    /// Stop words given as one space separated string.
    pub fn from_stop_words_text(text: &str) -> Result<Self> { Self::new([text]) }
}

impl<T: Tokenizer> SearchServer<T> {
    pub fn with_tokenizer<I, S>(tokenizer: T, stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = HashSet::new();
        for entry in stop_words {
            let entry = entry.as_ref();
            if has_control_chars(entry) {
                return Err(SearchError::InvalidArgument(format!(
                    "stop word {entry:?} contains control characters"
                )));
            }
            words.extend(tokenizer.tokenize(entry).into_iter().map(str::to_string));
        }
        Ok(Self { tokenizer, stop_words: words, index: InvertedIndex::new() })
    }

    /// Indexes `text` under `document_id`. Either the whole document is stored or
    /// nothing changes.
    pub fn add_document(&mut self, document_id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        let reject = |reason: &str| {
            tracing::debug!(document_id, reason, "document rejected");
            Err(SearchError::InvalidDocument { id: document_id, reason: reason.to_string() })
        };
        if document_id < 0 {
            return reject("negative id");
        }
        if self.index.docs.contains_key(&document_id) {
            return reject("duplicate id");
        }
        if has_control_chars(text) {
            return reject("text contains control characters");
        }
        let words = self.split_into_words_no_stop(text);
        if words.is_empty() {
            return reject("no indexable terms");
        }

        // TF is normalized by the stop-word filtered length.
        let total = words.len() as f64;
        let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
        for word in words {
            *counts.entry(word).or_insert(0) += 1;
        }
        let word_freqs: BTreeMap<String, f64> = counts
            .into_iter()
            .map(|(word, n)| (word.to_string(), f64::from(n) / total))
            .collect();
        for (word, tf) in &word_freqs {
            self.index.postings.entry(word.clone()).or_default().insert(document_id, *tf);
        }

        let rating = compute_average_rating(ratings);
        tracing::debug!(document_id, terms = word_freqs.len(), rating, %status, "indexed document");
        self.index.docs.insert(document_id, DocMeta { rating, status, word_freqs });
        self.index.doc_order.push(document_id);
        Ok(())
    }

    pub fn document_count(&self) -> usize { self.index.num_docs() }

    /// Id of the document added at zero-based `position`.
    pub fn document_id_at(&self, position: usize) -> Result<DocId> {
        self.index
            .doc_order
            .get(position)
            .copied()
            .ok_or(SearchError::OutOfRange { position, count: self.index.doc_order.len() })
    }

    /// Document ids in insertion order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ { self.index.doc_order.iter().copied() }

    pub fn word_frequencies(&self, document_id: DocId) -> Option<&BTreeMap<String, f64>> {
        self.index.docs.get(&document_id).map(|meta| &meta.word_freqs)
    }

    pub fn is_stop_word(&self, word: &str) -> bool { self.stop_words.contains(word) }

    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.tokenizer.tokenize(text).into_iter().filter(|w| !self.is_stop_word(w)).collect()
    }
}

/// Mean of `ratings` truncated toward zero; 0 when there are none.
fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}
