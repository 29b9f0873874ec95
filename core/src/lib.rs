//! In-memory TF-IDF document index.
//!
//! Documents carry a rating and a [`DocumentStatus`]; queries are free text with
//! optional `-term` exclusions. Results can be split into pages with
//! [`paginate`] or routed through a [`RequestQueue`] that tracks empty-result
//! requests over a sliding window.

pub mod document;
pub mod error;
pub mod index;
pub mod paginator;
pub mod query;
pub mod request_queue;
pub mod search;
pub mod tokenizer;

pub use document::{Document, DocumentStatus};
pub use error::{Result, SearchError};
pub use index::{DocId, SearchServer};
pub use paginator::{paginate, Page, Pages, Paginator};
pub use query::Query;
pub use request_queue::{QueryOutcome, RequestQueue, MINUTES_IN_DAY};
pub use search::{DocumentPredicate, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
pub use tokenizer::{Tokenizer, WhitespaceTokenizer};
