use proptest::prelude::*;
use search_core::{paginate, DocumentStatus, RequestQueue, SearchServer, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};

const VOCAB: &[&str] = &["кот", "пёс", "хвост", "ошейник", "скворец", "глаза", "и"];

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCAB), 1..8).prop_map(|words| words.join(" "))
}

fn status() -> impl Strategy<Value = DocumentStatus> {
    prop_oneof![
        Just(DocumentStatus::Actual),
        Just(DocumentStatus::Irrelevant),
        Just(DocumentStatus::Banned),
        Just(DocumentStatus::Removed),
    ]
}

fn corpus() -> impl Strategy<Value = Vec<(String, Vec<i32>, DocumentStatus)>> {
    prop::collection::vec((text(), prop::collection::vec(-10i32..10, 0..4), status()), 1..24)
}

fn build(corpus: &[(String, Vec<i32>, DocumentStatus)]) -> SearchServer {
    let mut server = SearchServer::new(["и"]).unwrap();
    for (id, (text, ratings, status)) in corpus.iter().enumerate() {
        // All-stop-word texts are rejected; the rest must be accepted.
        let result = server.add_document(id as i32, text, *status, ratings);
        let only_stop_words = text.split(' ').all(|w| w == "и");
        assert_eq!(result.is_err(), only_stop_words);
    }
    server
}

proptest! {
    #[test]
    fn term_frequencies_sum_to_one(corpus in corpus()) {
        let server = build(&corpus);
        for id in server.document_ids() {
            let sum: f64 = server.word_frequencies(id).unwrap().values().sum();
            prop_assert!((sum - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn results_are_capped_and_ordered(corpus in corpus(), query in text()) {
        let server = build(&corpus);
        let docs = server.find_top_documents_with(&query, |_: i32, _: DocumentStatus, _: i32| true).unwrap();
        prop_assert!(docs.len() <= MAX_RESULT_DOCUMENT_COUNT);
        for pair in docs.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if (a.relevance - b.relevance).abs() < RELEVANCE_EPSILON {
                prop_assert!(a.rating >= b.rating);
            } else {
                prop_assert!(a.relevance > b.relevance);
            }
        }
    }

    #[test]
    fn minus_word_always_excludes(corpus in corpus(), plus in text(), minus in prop::sample::select(VOCAB)) {
        let server = build(&corpus);
        let query = format!("{plus} -{minus}");
        let docs = server.find_top_documents_with(&query, |_: i32, _: DocumentStatus, _: i32| true).unwrap();
        for doc in docs {
            prop_assert!(!server.word_frequencies(doc.id).unwrap().contains_key(minus));
        }
    }

    #[test]
    fn pages_reassemble_the_sequence(items in prop::collection::vec(any::<u16>(), 0..64), page_size in 1usize..10) {
        let pages = paginate(&items, page_size).unwrap();
        prop_assert_eq!(pages.len(), items.len().div_ceil(page_size));
        let page_count = pages.len();
        for (i, page) in pages.iter().enumerate() {
            prop_assert_eq!(page.capacity(), page_size);
            if i + 1 < page_count {
                prop_assert_eq!(page.len(), page_size);
            }
        }
        let joined: Vec<u16> = pages.iter().flat_map(|p| p.iter().copied()).collect();
        prop_assert_eq!(joined, items);
    }

    #[test]
    fn window_never_exceeds_its_size(window in 1usize..20, requests in prop::collection::vec(text(), 0..60)) {
        let server = build(&[("кот пёс".to_string(), vec![1], DocumentStatus::Actual)]);
        let mut queue = RequestQueue::with_window(&server, window).unwrap();
        for request in &requests {
            queue.add_find_request(request).unwrap();
        }
        prop_assert!(queue.len() <= window);
        prop_assert_eq!(queue.len(), requests.len().min(window));
        let empties = queue.outcomes().filter(|o| o.is_empty).count();
        prop_assert_eq!(queue.no_result_requests(), empties);
    }
}

#[test]
fn first_empty_request_slides_out_of_the_window() {
    let server = build(&[("кот".to_string(), vec![], DocumentStatus::Actual)]);
    let mut queue = RequestQueue::new(&server);
    queue.add_find_request("жираф").unwrap();
    for _ in 0..search_core::MINUTES_IN_DAY {
        queue.add_find_request("кот").unwrap();
    }
    assert_eq!(queue.no_result_requests(), 0);
}
