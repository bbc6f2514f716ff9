//! Terminal narration and stdin choice input.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::{Mutex, broadcast};

use battle_core::{BattleSnapshot, Combatant, PlayerChoice, Tone};
use battle_runtime::{ChoiceProvider, Event, Result, RuntimeError};

/// Prints battle narration received on the log topic.
pub struct Narrator {
    rx: broadcast::Receiver<Event>,
    show_debug: bool,
}

impl Narrator {
    pub fn new(rx: broadcast::Receiver<Event>, show_debug: bool) -> Self {
        Self { rx, show_debug }
    }

    /// Prints everything published since the last call.
    pub fn drain(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(Event::Log(event)) => {
                    if event.entry.tone == Tone::Debug && !self.show_debug {
                        continue;
                    }
                    println!("{} {}", marker(event.entry.tone), event.entry.message);
                }
                Ok(Event::Battle(_)) => {}
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    println!("   ({skipped} log lines skipped)");
                }
                Err(_) => break,
            }
        }
    }
}

fn marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Info => "  ",
        Tone::Success => " +",
        Tone::Warning => " !",
        Tone::Danger => " x",
        Tone::Debug => " .",
    }
}

/// Flushes narration before delegating to `inner`.
pub struct Narrated<P> {
    inner: P,
    narrator: Arc<Mutex<Narrator>>,
}

impl<P> Narrated<P> {
    pub fn new(inner: P, narrator: Arc<Mutex<Narrator>>) -> Self {
        Self { inner, narrator }
    }
}

#[async_trait]
impl<P: ChoiceProvider> ChoiceProvider for Narrated<P> {
    async fn provide_choice(&self, snapshot: &BattleSnapshot) -> Result<PlayerChoice> {
        self.narrator.lock().await.drain();
        self.inner.provide_choice(snapshot).await
    }
}

/// Reads the player's choice from stdin after printing the battle status.
pub struct StdinChoiceProvider {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl StdinChoiceProvider {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl Default for StdinChoiceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChoiceProvider for StdinChoiceProvider {
    async fn provide_choice(&self, snapshot: &BattleSnapshot) -> Result<PlayerChoice> {
        print!("{}", render(snapshot));
        println!("[a]ttack  [d]efend  [c N] play card N  [i N] use item N");

        let line = self
            .lines
            .lock()
            .await
            .next_line()
            .await
            .map_err(|e| RuntimeError::ProviderClosed(e.to_string()))?
            .ok_or_else(|| RuntimeError::ProviderClosed("stdin closed".into()))?;

        let choice = parse_choice(&line);
        if choice == PlayerChoice::Invalid {
            println!("Unrecognised choice '{}'.", line.trim());
        }
        Ok(choice)
    }
}

/// Parses one input line. Unknown input maps to [`PlayerChoice::Invalid`],
/// which the engine treats as a skipped turn.
pub fn parse_choice(line: &str) -> PlayerChoice {
    let mut words = line.split_whitespace();
    let command = words.next().map(str::to_ascii_lowercase);
    let index = words.next().and_then(|w| w.parse::<usize>().ok());

    match (command.as_deref(), index) {
        (Some("a" | "attack"), None) => PlayerChoice::Attack,
        (Some("d" | "defend"), None) => PlayerChoice::Defend,
        (Some("c" | "card"), Some(index)) => PlayerChoice::Ability(index),
        (Some("i" | "item"), Some(index)) => PlayerChoice::Item(index),
        _ => PlayerChoice::Invalid,
    }
}

/// Status block shown before each prompt.
pub fn render(snapshot: &BattleSnapshot) -> String {
    let mut out = format!("\n=== Round {} ===\n", snapshot.round + 1);
    out.push_str(&status_line(&snapshot.player));
    out.push_str(&status_line(&snapshot.enemy));

    let player = &snapshot.player;
    if !player.deck.is_empty() {
        out.push_str("Cards:\n");
        for (index, card) in player.deck.cards().iter().enumerate() {
            out.push_str(&format!(
                "  {index}: {} ({} mana) {}\n",
                card.name, card.mana_cost, card.description
            ));
        }
    }
    if !player.inventory.is_empty() {
        out.push_str("Items:\n");
        for (index, item) in player.inventory.items().iter().enumerate() {
            out.push_str(&format!("  {index}: {} - {}\n", item.name(), item.description()));
        }
    }
    out
}

fn status_line(combatant: &Combatant) -> String {
    let entity = &combatant.entity;
    let effects: Vec<String> = entity
        .effects()
        .iter()
        .map(|effect| format!("{}({})", effect.kind, effect.duration))
        .collect();

    format!(
        "{:<14} Lv{} {:>3} HP {:>3} MP {:>2} DEF {}\n",
        combatant.name(),
        combatant.level,
        entity.health(),
        entity.mana(),
        entity.defense(),
        effects.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{
        Archetype, BattleConfig, CardKind, CombatantId, Deck, Item, NullLog, TurnEngine,
    };

    #[test]
    fn parses_commands_and_indices() {
        assert_eq!(parse_choice("a"), PlayerChoice::Attack);
        assert_eq!(parse_choice("  Attack \n"), PlayerChoice::Attack);
        assert_eq!(parse_choice("d"), PlayerChoice::Defend);
        assert_eq!(parse_choice("c 2"), PlayerChoice::Ability(2));
        assert_eq!(parse_choice("item 0"), PlayerChoice::Item(0));
    }

    #[test]
    fn garbage_is_invalid() {
        assert_eq!(parse_choice(""), PlayerChoice::Invalid);
        assert_eq!(parse_choice("c"), PlayerChoice::Invalid);
        assert_eq!(parse_choice("c x"), PlayerChoice::Invalid);
        assert_eq!(parse_choice("a 3"), PlayerChoice::Invalid);
        assert_eq!(parse_choice("flee"), PlayerChoice::Invalid);
    }

    #[test]
    fn render_lists_cards_items_and_effects() {
        let deck: Deck = [CardKind::Shield, CardKind::Fireball]
            .into_iter()
            .map(CardKind::card)
            .collect();
        let player = Combatant::new(CombatantId::PLAYER, "Hero", Archetype::Warrior, 100, 50, 15, 3)
            .with_deck(deck)
            .with_inventory([Item::HealthPotion].into_iter().collect());
        let enemy = Combatant::new(CombatantId::ENEMY, "Goblin", Archetype::Archer, 60, 0, 9, 0);

        let mut engine = TurnEngine::new(player, enemy, BattleConfig::default());
        engine.start(&mut NullLog).unwrap();
        engine.update(PlayerChoice::Ability(1), &mut NullLog).unwrap();

        let text = render(&engine.snapshot());
        assert!(text.contains("=== Round 2 ==="));
        assert!(text.contains("0: Shield"));
        assert!(text.contains("Health Potion"));
        // Burn was applied for 3 turns and ticked once at the end of the round.
        assert!(text.contains("burn(2)"));
    }
}
