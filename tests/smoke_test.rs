//! Live smoke test against the public Pokémon TCG API.
//!
//! Seeds an in-memory ledger with real cards and claims a booster.
//!
//! Run with:
//! ```sh
//! POKEMON_TCG_API_KEY=... cargo test --test smoke_test -- --ignored --nocapture
//! ```

use std::collections::HashSet;
use std::time::Duration;

use tcg_vault::{Address, Ledger, PokemonTcgSource, SeedConfig, SeedingPipeline, VaultClient};

#[test]
#[ignore]
fn seed_and_claim_against_live_api() {
    let source = PokemonTcgSource::new(Duration::from_secs(60)).unwrap();
    let config = SeedConfig::default();

    let deployer = Address::repeat_byte(0xd0);
    let ledger = Ledger::deploy(deployer, config.booster_card_count);
    let admin = VaultClient::builder(ledger).signer(deployer).build();

    let report = SeedingPipeline::new(&admin, &source, &config).run().unwrap();
    for c in &report.collections {
        eprintln!("  [{}] {} -- {}/{} cards", c.id, c.name, c.minted, c.declared);
    }
    eprintln!("  boosters: {:?} (skipped {:?})", report.boosters_created, report.boosters_skipped);

    let mut seen = HashSet::new();
    for view in admin.view().fetch_collections() {
        for card in view.cards {
            assert!(seen.insert(card.id));
        }
    }

    if let Some(id) = report.boosters_created.first() {
        let outcome = admin.signed_by(Address::repeat_byte(0xa1)).claims().claim(id);
        eprintln!("  {}", outcome.user_message());
        assert!(outcome.is_claimed());
    }
}
