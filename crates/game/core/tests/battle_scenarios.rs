//! End-to-end encounters driven through the public API.

use battle_core::{
    AiPolicy, Archetype, BattleConfig, BattleOutcome, BattlePhase, CardKind, Combatant,
    CombatantId, Deck, EffectKind, LogEntry, NullLog, PlayerChoice, PlayerResult, StatEntity,
    TurnEngine,
};

fn deck(cards: &[CardKind]) -> Deck {
    cards.iter().copied().map(CardKind::card).collect()
}

fn mage() -> Combatant {
    Combatant::new(CombatantId::PLAYER, "Merlin", Archetype::Mage, 100, 100, 12, 2)
        .with_deck(deck(&[CardKind::IceSpike, CardKind::Poison, CardKind::Shield]))
}

fn dragon(policy: AiPolicy) -> Combatant {
    Combatant::new(CombatantId::ENEMY, "Dragon", Archetype::Warrior, 100, 50, 14, 3)
        .with_deck(deck(&[
            CardKind::Regeneration,
            CardKind::Lightning,
            CardKind::Fireball,
            CardKind::Trap,
        ]))
        .with_ai(policy)
}

type Replay = (Option<BattleOutcome>, u32, Vec<LogEntry>);

/// Plays up to `max_rounds` rounds of always-attack and returns what happened.
fn replay(seed: u64, policy: AiPolicy, max_rounds: u32) -> Replay {
    let mut engine = TurnEngine::new(mage(), dragon(policy), BattleConfig::with_seed(seed));
    let mut log = Vec::new();
    engine.start(&mut log).unwrap();
    while !engine.is_finished() && engine.round() < max_rounds {
        engine.update(PlayerChoice::Attack, &mut log).unwrap();
    }
    (engine.outcome(), engine.round(), log)
}

#[test]
fn hero_entity_scenario() {
    let mut hero = StatEntity::new("Hero", 100, 50);
    hero.take_damage(30);
    assert_eq!(hero.health(), 70);
    hero.heal(20);
    assert_eq!(hero.health(), 90);
    hero.reduce_mana(40);
    assert_eq!(hero.mana(), 10);
    hero.heal(50);
    assert_eq!(hero.health(), 100);
}

#[test]
fn same_seed_replays_the_same_battle() {
    for policy in [AiPolicy::Easy, AiPolicy::Advanced, AiPolicy::Boss] {
        let first = replay(1234, policy, 200);
        let second = replay(1234, policy, 200);
        assert_eq!(first, second, "{policy} battle diverged");
    }
}

#[test]
fn aggressive_policies_always_finish() {
    // Easy and Boss damage the player every round once their decks run dry.
    for seed in 0..20 {
        for policy in [AiPolicy::Easy, AiPolicy::Boss] {
            let (outcome, rounds, _) = replay(seed, policy, 1_000);
            assert!(outcome.is_some(), "{policy} seed {seed} still running");
            assert!(rounds > 0);
        }
    }
}

#[test]
fn ice_spike_then_basic_attacks_are_slowed() {
    let player = Combatant::new(CombatantId::PLAYER, "Scout", Archetype::Archer, 100, 50, 10, 0)
        .with_deck(deck(&[CardKind::IceSpike]));
    let enemy = Combatant::new(CombatantId::ENEMY, "Ogre", Archetype::Warrior, 100, 0, 20, 0)
        .with_deck(deck(&[CardKind::IceSpike]))
        .with_ai(AiPolicy::Easy);

    let mut engine = TurnEngine::new(player, enemy, BattleConfig::default());
    engine.start(&mut NullLog).unwrap();

    // Round 1: the Ogre is slowed; the ability keeps the turn so it does not act.
    let first = engine.update(PlayerChoice::Ability(0), &mut NullLog).unwrap();
    assert!(matches!(first.player.result, PlayerResult::Ability(_)));
    assert_eq!(engine.player().entity.mana(), 35);
    assert!(engine.enemy().entity.effects().has(EffectKind::Slow));

    // Round 2: the Ogre answers with its own Ice Spike from the deck.
    engine.update(PlayerChoice::Defend, &mut NullLog).unwrap();
    assert!(engine.player().entity.effects().has(EffectKind::Slow));
    // The Ogre's slow (2 turns) has now expired.
    assert!(!engine.enemy().entity.effects().has(EffectKind::Slow));

    // Round 3: the Scout attacks at 70% speed; the Ogre strikes at full speed.
    engine.update(PlayerChoice::Attack, &mut NullLog).unwrap();
    assert_eq!(engine.enemy().entity.health(), 93);
    assert_eq!(engine.player().entity.health(), 85);
}

#[test]
fn boss_fight_to_the_end_rewards_the_victor() {
    let player = Combatant::new(CombatantId::PLAYER, "Knight", Archetype::Warrior, 100, 0, 40, 10);
    let enemy = Combatant::new(CombatantId::ENEMY, "Lich", Archetype::Mage, 60, 0, 5, 0)
        .with_ai(AiPolicy::Boss);

    let mut engine = TurnEngine::new(player, enemy, BattleConfig::with_seed(3));
    let mut rounds = Vec::new();
    engine.start(&mut NullLog).unwrap();
    while !engine.is_finished() {
        rounds.push(engine.update(PlayerChoice::Attack, &mut NullLog).unwrap());
    }

    let last = rounds.last().unwrap();
    assert_eq!(last.outcome, Some(BattleOutcome::Win));
    assert_eq!(engine.phase(), BattlePhase::Resolved(BattleOutcome::Win));
    // The lethal basic attack credited the kill, so no second reward.
    assert_eq!(last.reward, None);
    assert_eq!(engine.player().kills, 1);
    assert_eq!(engine.player().experience, BattleConfig::KILL_EXP);

    let (player, enemy) = engine.into_combatants();
    assert!(player.is_alive());
    assert!(!enemy.is_alive());
}
