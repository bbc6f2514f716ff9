//! Battle phases, outcomes and player choices.

/// Terminal result of an encounter, from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleOutcome {
    /// Enemy down, player standing.
    Win,
    /// Player down, enemy standing.
    Loss,
    /// Both sides went down in the same round.
    Draw,
}

impl BattleOutcome {
    /// Derives the outcome from both sides' liveness, `None` while both stand.
    pub const fn from_liveness(player_alive: bool, enemy_alive: bool) -> Option<Self> {
        match (player_alive, enemy_alive) {
            (true, true) => None,
            (true, false) => Some(Self::Win),
            (false, true) => Some(Self::Loss),
            (false, false) => Some(Self::Draw),
        }
    }
}

/// State of the battle state machine.
///
/// ```text
/// Init → RoundLoop → PlayerActing → [EnemyActing] → EffectTick → RoundLoop …
///                                                              ↘ Resolved
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattlePhase {
    Init,
    RoundLoop,
    PlayerActing,
    EnemyActing,
    EffectTick,
    Resolved(BattleOutcome),
}

impl BattlePhase {
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// One externally supplied player decision.
///
/// Out-of-range indices are not an error: the choice resolves to a rejected
/// no-op reported in the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerChoice {
    Attack,
    /// Play the deck card at this index.
    Ability(usize),
    Defend,
    /// Use the inventory item at this index.
    Item(usize),
    /// Unrecognized input; forfeits the turn.
    Invalid,
}

impl PlayerChoice {
    /// Whether the enemy acts after this choice resolved.
    ///
    /// A card that resolves keeps the turn with the player; a rejected one
    /// is a wasted move. Item use never ends the turn.
    pub const fn ends_turn(self, resolved: bool) -> bool {
        match self {
            Self::Attack | Self::Defend | Self::Invalid => true,
            Self::Ability(_) => !resolved,
            Self::Item(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_from_liveness() {
        assert_eq!(BattleOutcome::from_liveness(true, true), None);
        assert_eq!(
            BattleOutcome::from_liveness(true, false),
            Some(BattleOutcome::Win)
        );
        assert_eq!(
            BattleOutcome::from_liveness(false, true),
            Some(BattleOutcome::Loss)
        );
        assert_eq!(
            BattleOutcome::from_liveness(false, false),
            Some(BattleOutcome::Draw)
        );
    }

    #[test]
    fn resolved_abilities_and_items_keep_the_turn() {
        for resolved in [true, false] {
            assert!(PlayerChoice::Attack.ends_turn(resolved));
            assert!(PlayerChoice::Defend.ends_turn(resolved));
            assert!(PlayerChoice::Invalid.ends_turn(resolved));
            assert!(!PlayerChoice::Item(3).ends_turn(resolved));
        }
        assert!(!PlayerChoice::Ability(0).ends_turn(true));
        assert!(PlayerChoice::Ability(9).ends_turn(false));
    }
}
