//! Encounter state machine.
//!
//! [`TurnEngine`] owns both combatants and the encounter RNG. Each
//! [`TurnEngine::update`] call is one round: the player's choice resolves,
//! the enemy's policy acts if the player's turn ended, then active effects
//! tick on every living side (player first) and termination is checked.
//!
//! Gameplay failures are reported in the [`RoundReport`] and the log sink;
//! only driving the engine out of order returns an [`EngineError`].

mod errors;
mod phase;
mod report;

pub use errors::EngineError;
pub use phase::{BattleOutcome, BattlePhase, PlayerChoice};
pub use report::{BattleSnapshot, PlayerResult, PlayerTurn, Reward, RoundReport, TickReport};

use crate::ai::{AiEvent, AiPolicy, AiTurn};
use crate::config::BattleConfig;
use crate::env::BattleRng;
use crate::log::{BattleLog, LogExt, Tone};
use crate::state::{Combatant, EffectTick};

/// Source of player decisions for [`TurnEngine::run`].
pub trait ChoiceProvider {
    fn choose(&mut self, player: &Combatant, enemy: &Combatant) -> PlayerChoice;
}

impl<F> ChoiceProvider for F
where
    F: FnMut(&Combatant, &Combatant) -> PlayerChoice,
{
    fn choose(&mut self, player: &Combatant, enemy: &Combatant) -> PlayerChoice {
        self(player, enemy)
    }
}

/// Per-encounter battle orchestrator.
#[derive(Clone, Debug)]
pub struct TurnEngine {
    player: Combatant,
    enemy: Combatant,
    config: BattleConfig,
    rng: BattleRng,
    phase: BattlePhase,
    round: u32,
}

impl TurnEngine {
    pub fn new(player: Combatant, enemy: Combatant, config: BattleConfig) -> Self {
        let rng = BattleRng::new(config.seed);
        Self {
            player,
            enemy,
            config,
            rng,
            phase: BattlePhase::Init,
            round: 0,
        }
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Rounds completed so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// `!player_alive || !enemy_alive`.
    pub fn is_finished(&self) -> bool {
        !self.player.is_alive() || !self.enemy.is_alive()
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            round: self.round,
            phase: self.phase,
            player: self.player.clone(),
            enemy: self.enemy.clone(),
        }
    }

    pub fn into_combatants(self) -> (Combatant, Combatant) {
        (self.player, self.enemy)
    }

    /// Binds both sides to each other and gives the enemy a default policy.
    ///
    /// Resolves immediately if either side is already down.
    pub fn start(&mut self, log: &mut dyn BattleLog) -> Result<(), EngineError> {
        match self.phase {
            BattlePhase::Init => {}
            BattlePhase::Resolved(outcome) => return Err(EngineError::AlreadyResolved(outcome)),
            _ => return Err(EngineError::AlreadyStarted),
        }

        self.player.set_target(self.enemy.id);
        self.enemy.set_target(self.player.id);

        if self.enemy.ai().is_none() {
            log.emit(
                Tone::Debug,
                format!("Assigning {} AI to {}.", AiPolicy::default(), self.enemy.name()),
            );
            self.enemy.set_ai(AiPolicy::default());
        }

        log.emit(
            Tone::Info,
            format!(
                "Battle started! {} vs {}",
                self.player.name(),
                self.enemy.name()
            ),
        );

        self.phase = BattlePhase::RoundLoop;
        if let Some(outcome) =
            BattleOutcome::from_liveness(self.player.is_alive(), self.enemy.is_alive())
        {
            self.resolve(outcome, self.player.kills, log);
        }
        Ok(())
    }

    /// Plays one round with the player's `choice`.
    pub fn update(
        &mut self,
        choice: PlayerChoice,
        log: &mut dyn BattleLog,
    ) -> Result<RoundReport, EngineError> {
        match self.phase {
            BattlePhase::Init => return Err(EngineError::NotStarted),
            BattlePhase::Resolved(outcome) => return Err(EngineError::AlreadyResolved(outcome)),
            _ => {}
        }

        self.round += 1;
        let kills_before = self.player.kills;
        let mut phases = Vec::with_capacity(4);

        self.enter(BattlePhase::PlayerActing, &mut phases);
        let player_turn = self.resolve_player(choice, log);

        let enemy_turn = if player_turn.ends_turn && self.enemy.is_alive() {
            self.enter(BattlePhase::EnemyActing, &mut phases);
            Some(self.resolve_enemy(log))
        } else {
            None
        };

        self.enter(BattlePhase::EffectTick, &mut phases);
        let ticks = self.tick_effects(log);

        let outcome = BattleOutcome::from_liveness(self.player.is_alive(), self.enemy.is_alive());
        let reward = match outcome {
            Some(outcome) => {
                let reward = self.resolve(outcome, kills_before, log);
                phases.push(self.phase);
                reward
            }
            None => {
                self.enter(BattlePhase::RoundLoop, &mut phases);
                None
            }
        };

        Ok(RoundReport {
            round: self.round,
            phases,
            player: player_turn,
            enemy: enemy_turn,
            ticks,
            outcome,
            reward,
        })
    }

    /// Drives the encounter to completion with `provider`.
    pub fn run(
        &mut self,
        provider: &mut impl ChoiceProvider,
        log: &mut dyn BattleLog,
    ) -> Result<BattleOutcome, EngineError> {
        if self.phase == BattlePhase::Init {
            self.start(log)?;
        }
        loop {
            if let Some(outcome) = self.outcome() {
                return Ok(outcome);
            }
            let choice = provider.choose(&self.player, &self.enemy);
            self.update(choice, log)?;
        }
    }

    fn enter(&mut self, phase: BattlePhase, phases: &mut Vec<BattlePhase>) {
        self.phase = phase;
        phases.push(phase);
    }

    fn resolve_player(&mut self, choice: PlayerChoice, log: &mut dyn BattleLog) -> PlayerTurn {
        let result = match choice {
            PlayerChoice::Attack => {
                match self.player.attack(&mut self.enemy, &mut self.rng, log) {
                    Ok(report) => PlayerResult::Attacked(report),
                    Err(err) => PlayerResult::Rejected(err),
                }
            }
            PlayerChoice::Ability(index) => {
                match self
                    .player
                    .use_ability(index, &mut self.enemy, &mut self.rng, log)
                {
                    Ok(outcome) => PlayerResult::Ability(outcome),
                    Err(err) => {
                        log.emit(
                            Tone::Warning,
                            format!("{} can't use this ability: {err}", self.player.name()),
                        );
                        PlayerResult::Rejected(err)
                    }
                }
            }
            PlayerChoice::Defend => {
                let raised = self
                    .player
                    .entity
                    .defense()
                    .saturating_add(self.config.defend_bonus);
                self.player.entity.set_defense(raised);
                log.emit(
                    Tone::Info,
                    format!(
                        "{} increases defense by {}!",
                        self.player.name(),
                        self.config.defend_bonus
                    ),
                );
                PlayerResult::Defended {
                    defense: self.player.entity.defense(),
                }
            }
            PlayerChoice::Item(index) => match self.player.use_item(index, log) {
                Ok(used) => PlayerResult::UsedItem(used),
                Err(err) => {
                    log.emit(Tone::Warning, format!("Invalid item choice: {err}"));
                    PlayerResult::Rejected(err)
                }
            },
            PlayerChoice::Invalid => {
                log.emit(Tone::Warning, "Invalid action! Skipping turn.".to_owned());
                PlayerResult::Skipped
            }
        };

        let resolved = !matches!(result, PlayerResult::Rejected(_));
        PlayerTurn {
            choice,
            result,
            ends_turn: choice.ends_turn(resolved),
        }
    }

    fn resolve_enemy(&mut self, log: &mut dyn BattleLog) -> AiTurn {
        let policy = self.enemy.ai();
        match self
            .enemy
            .perform_ai_action(&mut self.player, &mut self.rng, &self.config, log)
        {
            Ok(turn) => turn,
            Err(err) => {
                log.emit(
                    Tone::Debug,
                    format!("{} could not act: {err}", self.enemy.name()),
                );
                AiTurn {
                    policy,
                    events: vec![AiEvent::Rejected(err)],
                    ..AiTurn::default()
                }
            }
        }
    }

    fn tick_effects(&mut self, log: &mut dyn BattleLog) -> TickReport {
        let mut report = TickReport::default();
        if self.player.is_alive() {
            report.player = self.player.entity.tick_effects();
            narrate_ticks(self.player.name(), &report.player, log);
        }
        if self.enemy.is_alive() {
            report.enemy = self.enemy.entity.tick_effects();
            narrate_ticks(self.enemy.name(), &report.enemy, log);
        }
        report
    }

    /// Enters `Resolved`. Only a player win is rewarded, and not when the
    /// player's lethal attack already credited the kill during this round.
    fn resolve(
        &mut self,
        outcome: BattleOutcome,
        kills_before: u32,
        log: &mut dyn BattleLog,
    ) -> Option<Reward> {
        self.phase = BattlePhase::Resolved(outcome);

        match outcome {
            BattleOutcome::Draw => {
                log.emit(Tone::Warning, "The battle ended in a draw!".to_owned());
                None
            }
            BattleOutcome::Loss => {
                log.emit(
                    Tone::Danger,
                    format!(
                        "{} has been defeated by {}!",
                        self.player.name(),
                        self.enemy.name()
                    ),
                );
                None
            }
            BattleOutcome::Win => {
                log.emit(
                    Tone::Success,
                    format!(
                        "{} has been defeated by {}!",
                        self.enemy.name(),
                        self.player.name()
                    ),
                );
                if self.player.kills > kills_before {
                    return None;
                }

                let exp = self.config.victory_exp;
                let levels_gained = self.player.gain_exp(exp);
                self.player.credit_kill();
                log.emit(
                    Tone::Success,
                    format!(
                        "{} gained {} EXP. Total kills: {}",
                        self.player.name(),
                        exp,
                        self.player.kills
                    ),
                );

                Some(Reward {
                    recipient: self.player.id,
                    exp,
                    levels_gained,
                })
            }
        }
    }
}

fn narrate_ticks(name: &str, ticks: &[EffectTick], log: &mut dyn BattleLog) {
    for tick in ticks {
        if tick.damage > 0 {
            log.emit(
                Tone::Danger,
                format!("{name} takes {} {} damage!", tick.damage, tick.kind),
            );
        }
        if tick.healed > 0 {
            log.emit(
                Tone::Success,
                format!("{name} regenerates {} health.", tick.healed),
            );
        }
        if tick.expired {
            log.emit(Tone::Info, format!("{}'s {} wore off.", name, tick.kind));
        }
    }
}
