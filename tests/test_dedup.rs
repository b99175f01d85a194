//! Deduplicated sourcing: uniqueness within and across calls.

mod common;

use std::collections::HashSet;

use common::{sample_cards, FailingSource, ScriptedSource};
use tcg_vault::{fetch_unique_cards, SourceCard, StaticCardSource, TcgError, UsedCardIds};

fn ids(cards: &[SourceCard]) -> Vec<String> {
    cards.iter().map(|c| c.id.clone()).collect()
}

#[test]
fn over_fetches_twice_the_requested_count() {
    let source = ScriptedSource::new(vec![sample_cards("c", 10)]);
    let mut used = UsedCardIds::new();

    let cards = fetch_unique_cards(&source, 5, &mut used).unwrap();
    assert_eq!(source.requests(), vec![10]);
    assert_eq!(ids(&cards), vec!["c-1", "c-2", "c-3", "c-4", "c-5"]);
}

#[test]
fn skips_ids_already_used() {
    let source = ScriptedSource::new(vec![sample_cards("c", 6)]);
    let mut used: UsedCardIds = ["c-1", "c-3"].into_iter().collect();

    let cards = fetch_unique_cards(&source, 3, &mut used).unwrap();
    assert_eq!(ids(&cards), vec!["c-2", "c-4", "c-5"]);
}

#[test]
fn drops_duplicates_within_one_response() {
    let mut batch = sample_cards("c", 3);
    batch.insert(1, batch[0].clone());
    batch.push(batch[2].clone());
    let source = ScriptedSource::new(vec![batch]);
    let mut used = UsedCardIds::new();

    let cards = fetch_unique_cards(&source, 4, &mut used).unwrap();
    assert_eq!(ids(&cards), vec!["c-1", "c-2", "c-3"]);
}

#[test]
fn used_set_grows_by_exactly_the_returned_ids() {
    let mut batch = sample_cards("c", 8);
    batch.push(batch[0].clone());
    let source = ScriptedSource::new(vec![batch]);
    let mut used: UsedCardIds = ["c-2", "other"].into_iter().collect();
    let before = used.clone();

    let cards = fetch_unique_cards(&source, 4, &mut used).unwrap();

    let returned: HashSet<String> = ids(&cards).into_iter().collect();
    assert_eq!(returned.len(), cards.len(), "no two returned cards share an id");
    assert!(returned.iter().all(|id| !before.contains(id)));

    let mut expected = before.clone();
    for id in &returned {
        expected.insert(id.clone());
    }
    assert_eq!(used, expected);
    assert_eq!(used.len(), before.len() + cards.len());
}

#[test]
fn sequential_calls_share_one_pool() {
    let source = StaticCardSource::with_seed(sample_cards("p", 40), 7);
    let mut used = UsedCardIds::new();

    let first = fetch_unique_cards(&source, 10, &mut used).unwrap();
    let second = fetch_unique_cards(&source, 10, &mut used).unwrap();

    let first_ids: HashSet<_> = ids(&first).into_iter().collect();
    assert!(ids(&second).iter().all(|id| !first_ids.contains(id)));
    assert_eq!(used.len(), first.len() + second.len());
}

#[test]
fn short_result_when_source_runs_dry() {
    let source = ScriptedSource::new(vec![sample_cards("c", 3)]);
    let mut used = UsedCardIds::new();

    let cards = fetch_unique_cards(&source, 5, &mut used).unwrap();
    assert_eq!(cards.len(), 3);
    assert_eq!(used.len(), 3);
}

#[test]
fn zero_count_does_not_touch_the_source() {
    let source = ScriptedSource::new(vec![sample_cards("c", 3)]);
    let mut used = UsedCardIds::new();

    let cards = fetch_unique_cards(&source, 0, &mut used).unwrap();
    assert!(cards.is_empty());
    assert!(source.requests().is_empty());
}

#[test]
fn source_error_is_returned_and_set_untouched() {
    let mut used: UsedCardIds = ["keep"].into_iter().collect();

    let err = fetch_unique_cards(&FailingSource, 5, &mut used).unwrap_err();
    assert!(matches!(err, TcgError::SourceUnavailable(_)));
    assert_eq!(used.len(), 1);
}
