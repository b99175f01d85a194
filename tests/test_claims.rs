//! Booster claims: exclusivity, ordering races and the failure taxonomy.

mod common;

use std::thread;

use common::{alice, bob, create_booster, setup_ledger};
use tcg_vault::{Address, BoosterState, ClaimOutcome, ContractError, Operation, VaultClient};

// ---------------------------------------------------------------------------
// Happy path and second claimant
// ---------------------------------------------------------------------------

#[test]
fn first_claim_wins_and_second_fails() {
    let (_ledger, admin) = setup_ledger();
    create_booster(&admin, "1");

    let details = admin.boosters().get_booster_details("1").unwrap();
    assert!(details.owner.is_zero());
    assert_eq!(details.cards.as_ref().map(Vec::len), Some(5));

    let outcome = admin.signed_by(alice()).claims().claim("1");
    match &outcome {
        ClaimOutcome::Claimed(booster) => {
            assert_eq!(booster.state, BoosterState::Claimed { by: alice() });
            assert!(booster.cards.iter().all(|c| c.owner == alice()));
        }
        other => panic!("expected a successful claim, got {other:?}"),
    }

    let details = admin.boosters().get_booster_details("1").unwrap();
    assert_eq!(details.owner, alice());

    let second = admin.signed_by(bob()).claims().claim("1");
    assert_eq!(
        second,
        ClaimOutcome::AlreadyClaimed {
            booster_id: "1".to_string(),
            owner: Some(alice()),
        }
    );
    assert_eq!(admin.boosters().get_booster_details("1").unwrap().owner, alice());
}

#[test]
fn claimer_cannot_claim_twice() {
    let (_ledger, admin) = setup_ledger();
    create_booster(&admin, "1");
    let player = admin.signed_by(alice());

    assert!(player.claims().claim("1").is_claimed());
    assert!(matches!(
        player.claims().claim("1"),
        ClaimOutcome::AlreadyClaimed { .. }
    ));
}

// ---------------------------------------------------------------------------
// Races: enforcement at execution time
// ---------------------------------------------------------------------------

#[test]
fn racing_submissions_are_decided_by_ledger_order() {
    let (_ledger, admin) = setup_ledger();
    create_booster(&admin, "1");
    let a = admin.signed_by(alice());
    let b = admin.signed_by(bob());

    // Both pass the advisory read and the preflight: the booster is still
    // unclaimed when each is submitted.
    let first = a.claims().submit_claim("1").unwrap();
    let second = b.claims().submit_claim("1").unwrap();
    assert!(first.sequence() < second.sequence());

    // Awaiting the later one first still executes in submission order.
    let b_outcome = second.finish();
    let a_outcome = first.finish();

    assert!(a_outcome.is_claimed());
    assert_eq!(
        b_outcome,
        ClaimOutcome::AlreadyClaimed {
            booster_id: "1".to_string(),
            owner: Some(alice()),
        }
    );
    assert_eq!(admin.boosters().get_booster_details("1").unwrap().owner, alice());
}

#[test]
fn concurrent_claimers_yield_exactly_one_owner() {
    let (_ledger, admin) = setup_ledger();
    create_booster(&admin, "1");

    let players: Vec<VaultClient> = (1..=16u8)
        .map(|i| admin.signed_by(Address::repeat_byte(i)))
        .collect();

    let outcomes: Vec<(Address, ClaimOutcome)> = thread::scope(|s| {
        let handles: Vec<_> = players
            .iter()
            .map(|p| s.spawn(move || (p.signer().unwrap(), p.claims().claim("1"))))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let winners: Vec<Address> = outcomes
        .iter()
        .filter(|(_, o)| o.is_claimed())
        .map(|(who, _)| *who)
        .collect();
    assert_eq!(winners.len(), 1);

    let owner = admin.boosters().get_booster_details("1").unwrap().owner;
    assert_eq!(owner, winners[0]);

    for (_, outcome) in outcomes.iter().filter(|(_, o)| !o.is_claimed()) {
        assert!(
            matches!(outcome, ClaimOutcome::AlreadyClaimed { owner: Some(o), .. } if *o == owner),
            "loser saw {outcome:?}"
        );
    }
}

#[test]
fn rejected_claim_without_preflight_reports_the_revert() {
    let (ledger, admin) = setup_ledger();
    create_booster(&admin, "1");
    assert!(admin.signed_by(alice()).claims().claim("1").is_claimed());

    // Skip the advisory read and preflight by submitting straight to the ledger.
    let pending = ledger.submit(bob(), Operation::ClaimBooster { booster_id: "1".into() });
    let receipt = pending.wait().unwrap();
    assert!(!receipt.is_success());
    assert_eq!(
        receipt.revert,
        Some(ContractError::AlreadyClaimed {
            booster_id: "1".to_string(),
            owner: alice(),
        })
    );
}

#[test]
fn zero_address_claim_is_reverted_and_leaves_the_booster_claimable() {
    let (ledger, admin) = setup_ledger();
    create_booster(&admin, "1");

    let receipt = ledger
        .submit(Address::ZERO, Operation::ClaimBooster { booster_id: "1".into() })
        .wait()
        .unwrap();
    assert!(!receipt.is_success());
    assert!(receipt.outcome.is_none());
    assert_eq!(receipt.revert, Some(ContractError::ZeroAddressClaimer));

    let cards = admin.boosters().get_cards_in_booster("1").unwrap();
    assert!(cards.iter().all(|c| c.owner.is_zero()));

    let outcome = admin.signed_by(Address::ZERO).claims().claim("1");
    assert!(matches!(outcome, ClaimOutcome::EstimationFailed { .. }));

    assert!(admin.signed_by(alice()).claims().claim("1").is_claimed());
    assert_eq!(admin.boosters().get_booster_details("1").unwrap().owner, alice());
}

// ---------------------------------------------------------------------------
// Failure taxonomy
// ---------------------------------------------------------------------------

#[test]
fn unknown_booster_fails_estimation() {
    let (_ledger, admin) = setup_ledger();

    let outcome = admin.signed_by(alice()).claims().claim("404");
    assert!(matches!(outcome, ClaimOutcome::EstimationFailed { .. }));
}

#[test]
fn unknown_booster_without_preflight_is_rejected() {
    let (ledger, _admin) = setup_ledger();
    let player = VaultClient::builder(ledger).signer(alice()).preflight(false).build();

    let outcome = player.claims().claim("404");
    match outcome {
        ClaimOutcome::Rejected { reason, .. } => assert!(reason.contains("404")),
        other => panic!("expected a rejection, got {other:?}"),
    }
}

#[test]
fn evicted_claim_is_an_unclassified_failure() {
    let (ledger, admin) = setup_ledger();
    create_booster(&admin, "1");

    let alice_client = admin.signed_by(alice());
    let pending = alice_client.claims().submit_claim("1").unwrap();
    assert!(ledger.evict(pending.sequence()));

    let outcome = pending.finish();
    assert!(matches!(outcome, ClaimOutcome::Failed { .. }));
    assert!(admin.boosters().get_booster_details("1").unwrap().owner.is_zero());
}

#[test]
fn read_only_client_claim_fails() {
    let (ledger, admin) = setup_ledger();
    create_booster(&admin, "1");
    let reader = VaultClient::builder(ledger).build();

    assert!(matches!(reader.claims().claim("1"), ClaimOutcome::Failed { .. }));
}

#[test]
fn each_outcome_has_a_distinct_message() {
    let id = "1".to_string();
    let messages = [
        ClaimOutcome::AlreadyClaimed { booster_id: id.clone(), owner: None }.user_message(),
        ClaimOutcome::EstimationFailed { booster_id: id.clone(), reason: "r".into() }.user_message(),
        ClaimOutcome::Rejected { booster_id: id.clone(), reason: "r".into() }.user_message(),
        ClaimOutcome::Failed { booster_id: id, message: "m".into() }.user_message(),
    ];
    for (i, a) in messages.iter().enumerate() {
        for b in &messages[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
