use crate::index::{DocId, SearchServer};
use crate::query::Query;
use crate::tokenizer::Tokenizer;
use crate::{Document, DocumentStatus, Result, SearchError};
use std::collections::BTreeMap;

pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
/// Relevance values closer than this are ranked by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Caller-supplied filter applied to every scored candidate.
pub trait DocumentPredicate {
    fn matches(&self, document_id: DocId, status: DocumentStatus, rating: i32) -> bool;
}

impl<F> DocumentPredicate for F
where
    F: Fn(DocId, DocumentStatus, i32) -> bool,
{
    fn matches(&self, document_id: DocId, status: DocumentStatus, rating: i32) -> bool {
        self(document_id, status, rating)
    }
}

/// A bare status keeps only documents with exactly that status.
impl DocumentPredicate for DocumentStatus {
    fn matches(&self, _document_id: DocId, status: DocumentStatus, _rating: i32) -> bool { *self == status }
}

impl<T: Tokenizer> SearchServer<T> {
    /// Top documents with status ACTUAL.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, status)
    }

    /// Ranks documents by TF-IDF, best first, at most [`MAX_RESULT_DOCUMENT_COUNT`].
    ///
    /// Documents whose relevance differs by less than [`RELEVANCE_EPSILON`] are
    /// ordered by rating, highest first. Remaining ties keep ascending id order.
    pub fn find_top_documents_with<P: DocumentPredicate>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>> {
        let query = self.parse_query(raw_query)?;
        let mut matched = self.find_all_documents(&query, &predicate);
        sort_by_relevance(&mut matched);
        matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
        Ok(matched)
    }

    /// Plus terms of `raw_query` present in the document, sorted, with its status.
    /// Any minus term present in the document empties the list.
    pub fn match_document(&self, raw_query: &str, document_id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
        let query = self.parse_query(raw_query)?;
        let meta = self.index.docs.get(&document_id).ok_or(SearchError::NotFound(document_id))?;

        let contains = |word: &String| meta.word_freqs.contains_key(word);
        if query.minus_words.iter().any(contains) {
            return Ok((Vec::new(), meta.status));
        }
        // BTreeSet iteration is already lexicographic.
        let words = query.plus_words.iter().filter(|w| contains(*w)).cloned().collect();
        Ok((words, meta.status))
    }

    fn find_all_documents<P: DocumentPredicate>(&self, query: &Query, predicate: &P) -> Vec<Document> {
        let mut document_to_relevance: BTreeMap<DocId, f64> = BTreeMap::new();
        for word in &query.plus_words {
            let Some(postings) = self.index.postings(word) else { continue };
            let idf = self.inverse_document_freq(postings.len());
            for (&doc_id, &tf) in postings {
                *document_to_relevance.entry(doc_id).or_insert(0.0) += tf * idf;
            }
        }

        for word in &query.minus_words {
            let Some(postings) = self.index.postings(word) else { continue };
            for doc_id in postings.keys() {
                document_to_relevance.remove(doc_id);
            }
        }

        document_to_relevance
            .into_iter()
            .filter_map(|(doc_id, relevance)| {
                let meta = self.index.docs.get(&doc_id)?;
                predicate
                    .matches(doc_id, meta.status, meta.rating)
                    .then(|| Document::new(doc_id, relevance, meta.rating))
            })
            .collect()
    }

    fn inverse_document_freq(&self, docs_with_term: usize) -> f64 {
        (self.document_count() as f64 / docs_with_term as f64).ln()
    }
}

/// Relevance descending; runs within epsilon of their leading entry are then
/// ordered by rating descending. Both sorts are stable.
fn sort_by_relevance(docs: &mut [Document]) {
    docs.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    let mut start = 0;
    while start < docs.len() {
        let head = docs[start].relevance;
        let end = start
            + docs[start..]
                .iter()
                .take_while(|d| (head - d.relevance).abs() < RELEVANCE_EPSILON)
                .count();
        docs[start..end].sort_by(|a, b| b.rating.cmp(&a.rating));
        start = end;
    }
}
