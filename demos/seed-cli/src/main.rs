use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tcg_vault::{
    Address, CardSource, DedupScope, Ledger, PokemonTcgSource, SeedConfig, SeedingPipeline,
    StaticCardSource, VaultClient,
};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum Dedup {
    Global,
    PerCollection,
}

/// Seed an in-memory vault ledger, list its contents and claim boosters.
#[derive(Parser)]
struct Args {
    /// Use a built-in synthetic catalog instead of the public card API.
    #[arg(long)]
    offline: bool,

    /// Seed configuration file (JSON). Defaults to the platform config dir.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the dedup scope from the configuration.
    #[arg(long, value_enum)]
    dedup: Option<Dedup>,

    /// Booster ids to claim after seeding, each by a fresh account.
    #[arg(long = "claim")]
    claims: Vec<String>,

    /// HTTP timeout for the card API, in seconds.
    #[arg(long, default_value_t = 60)]
    timeout: u64,
}

/// A distinct, never-zero account for the `index`-th claimer.
fn player_address(index: u64) -> Address {
    let mut bytes = [0xa0u8; 20];
    bytes[12..].copy_from_slice(&index.to_be_bytes());
    Address::new(bytes)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SeedConfig::load(path).with_context(|| format!("reading {}", path.display()))?,
        None => SeedConfig::load_default()?,
    };
    if let Some(dedup) = args.dedup {
        config.dedup_scope = match dedup {
            Dedup::Global => DedupScope::Global,
            Dedup::PerCollection => DedupScope::PerCollection,
        };
    }

    let source: Box<dyn CardSource> = if args.offline {
        Box::new(StaticCardSource::fixture(250))
    } else {
        Box::new(PokemonTcgSource::new(Duration::from_secs(args.timeout))?)
    };

    let deployer = Address::repeat_byte(0xd0);
    let ledger = Ledger::deploy(deployer, config.booster_card_count);
    let admin = VaultClient::builder(ledger).signer(deployer).build();
    eprintln!("Seeding with {admin}...");

    let report = SeedingPipeline::new(&admin, &*source, &config)
        .run()
        .context("seeding failed")?;
    for short in report.short_collections() {
        eprintln!(
            "warning: collection '{}' holds {} of {} declared cards",
            short.name, short.minted, short.declared
        );
    }

    for collection in admin.view().fetch_collections() {
        println!("{} [{}]", collection.name, collection.card_count);
        for card in &collection.cards {
            println!("  {:<12} {}", card.id, card.title);
        }
    }
    for booster in admin.view().fetch_boosters() {
        let owner = booster
            .owner
            .map(|o| o.to_string())
            .unwrap_or_else(|| "unclaimed".to_string());
        println!("Booster {} ({} cards) owned by: {}", booster.booster_id, booster.cards.len(), owner);
    }

    for (i, booster_id) in args.claims.iter().enumerate() {
        let player = admin.signed_by(player_address(i as u64));
        let outcome = player.view().claim_booster(booster_id);
        println!("{} -> {}", player.signer().map(|s| s.to_string()).unwrap_or_default(), outcome.user_message());
    }

    Ok(())
}
