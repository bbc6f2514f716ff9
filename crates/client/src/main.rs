//! Card battle client binary.
//!
//! Composition root that assembles:
//! 1. Content (battle rules and roster) via ContentFactory
//! 2. Runtime (battle worker and event bus) via RuntimeBuilder
//! 3. Terminal input and narration
//!
//! # Examples
//!
//! ```bash
//! # Interactive battle against the default opponent
//! cargo run -p battle-client
//!
//! # Watch Merlin fight the Orc Warlord with a fixed seed
//! BATTLE_PLAYER=merlin BATTLE_ENEMY=orc BATTLE_SEED=3 BATTLE_AUTOPLAY=1 cargo run -p battle-client
//! ```

mod config;
mod logging;
mod terminal;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Mutex;

use battle_content::ContentFactory;
use battle_core::{BattleOutcome, BattleSnapshot, CombatantId};
use battle_runtime::{AlwaysAttackProvider, Runtime, RuntimeConfig, RuntimeError, Topic};

use config::ClientConfig;
use terminal::{Narrated, Narrator, StdinChoiceProvider};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let session_dir = logging::setup_logging(config.session_id.as_deref())?;
    tracing::info!(?config, "Starting battle client");

    // 1. Content
    let factory = ContentFactory::new(&config.data_dir);
    let mut battle_config = factory
        .load_config()
        .with_context(|| format!("loading rules from {}", config.data_dir.display()))?;
    if let Some(seed) = config.seed {
        battle_config.seed = seed;
    }
    let roster = factory.load_roster()?;
    let player = roster.spawn(&config.player, CombatantId::PLAYER)?;
    let enemy = roster.spawn(&config.enemy, CombatantId::ENEMY)?;
    tracing::info!(
        player = player.name(),
        enemy = enemy.name(),
        seed = battle_config.seed,
        "Encounter assembled"
    );

    // 2. Runtime
    let mut runtime = Runtime::builder()
        .config(RuntimeConfig {
            battle_config,
            max_rounds: config.max_rounds,
            ..RuntimeConfig::default()
        })
        .player(player)
        .enemy(enemy)
        .build()
        .await?;

    // 3. Input and narration
    let narrator = Arc::new(Mutex::new(Narrator::new(
        runtime.subscribe(Topic::Log),
        config.show_debug,
    )));
    if config.autoplay {
        runtime.set_player_provider(Narrated::new(AlwaysAttackProvider, narrator.clone()));
    } else {
        runtime.set_player_provider(Narrated::new(StdinChoiceProvider::new(), narrator.clone()));
    }

    let result = runtime.run().await;
    narrator.lock().await.drain();
    let snapshot = runtime.handle().query_snapshot().await?;

    match result {
        Ok(outcome) => {
            println!("\n{}", banner(outcome, &snapshot));
            tracing::info!(%outcome, rounds = snapshot.round, "Battle finished");
        }
        Err(RuntimeError::ProviderClosed(reason)) => {
            println!("\nBattle abandoned ({reason}).");
            tracing::info!(%reason, "Input closed before the battle finished");
        }
        Err(error) => {
            tracing::error!(%error, "Battle aborted");
            runtime.shutdown().await?;
            return Err(error.into());
        }
    }

    let summary = session_dir.join("summary.json");
    std::fs::write(&summary, serde_json::to_string_pretty(&snapshot)?)
        .with_context(|| format!("writing {}", summary.display()))?;
    tracing::info!("Summary written to {}", summary.display());

    runtime.shutdown().await?;
    Ok(())
}

fn banner(outcome: BattleOutcome, snapshot: &BattleSnapshot) -> String {
    let player = &snapshot.player;
    match outcome {
        BattleOutcome::Win => format!(
            "Victory! {} defeated {} in {} rounds (level {}, {} exp).",
            player.name(),
            snapshot.enemy.name(),
            snapshot.round,
            player.level,
            player.experience
        ),
        BattleOutcome::Loss => format!(
            "Defeat. {} fell to {} after {} rounds.",
            player.name(),
            snapshot.enemy.name(),
            snapshot.round
        ),
        BattleOutcome::Draw => format!("Both combatants fell in round {}.", snapshot.round),
    }
}
