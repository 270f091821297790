//! Concurrency tests: the engine is shared across threads with no locking.

use std::sync::Arc;
use std::thread;

use noteseek::{Candidate, SearchEngine, embed, embed_many, rank};

fn texts() -> Vec<String> {
    (0..64).map(|i| format!("concurrent note {i}")).collect()
}

#[test]
fn concurrent_embed_matches_serial() {
    let texts = Arc::new(texts());
    let serial = embed_many(texts.as_slice());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let texts = Arc::clone(&texts);
            thread::spawn(move || texts.iter().map(|t| embed(t)).collect::<Vec<_>>())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), serial);
    }
}

#[test]
fn concurrent_search_over_shared_engine() {
    let engine = SearchEngine::default();
    let candidates: Vec<_> = texts()
        .iter()
        .enumerate()
        .map(|(i, text)| Candidate::new(i, embed(text)))
        .collect();
    let expected = engine.search("concurrent note 5", &candidates).unwrap();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| engine.search("concurrent note 5", &candidates).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn ties_are_stable_under_concurrent_ranking() {
    // Many identical vectors: every score ties, so order must equal input order.
    let tie = embed("same vector");
    let candidates: Vec<_> = (0..200).map(|i| Candidate::new(i, tie.clone())).collect();
    let query = embed("query");

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| rank(&query, &candidates, 200, -1.0).unwrap()))
            .collect();
        for handle in handles {
            let ids: Vec<i32> = handle.join().unwrap().ids().copied().collect();
            assert_eq!(ids, (0..200).collect::<Vec<_>>());
        }
    });
}
