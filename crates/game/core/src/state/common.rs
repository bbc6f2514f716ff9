use std::fmt;

/// Identifier of a combatant within one encounter.
///
/// Combatants refer to their opponent by id rather than by reference; the
/// engine owning both sides resolves the relation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl CombatantId {
    /// Reserved identifier for the human-controlled side.
    pub const PLAYER: Self = Self(0);

    /// Identifier conventionally given to the AI-controlled side.
    pub const ENEMY: Self = Self(1);
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Multiplicative speed factor stored in per-mille (`1000` = ×1.0).
///
/// Integer arithmetic keeps composition exact: two ×0.7 slows compose to
/// exactly ×0.49, and scaling an attack never suffers float rounding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedModifier(pub u32);

impl SpeedModifier {
    pub const SCALE: u32 = 1000;
    pub const NORMAL: Self = Self(Self::SCALE);

    pub const fn from_permille(permille: u32) -> Self {
        Self(permille)
    }

    pub const fn permille(self) -> u32 {
        self.0
    }

    /// Composes two modifiers (floor of the exact product).
    pub const fn compose(self, other: Self) -> Self {
        Self(((self.0 as u64 * other.0 as u64) / Self::SCALE as u64) as u32)
    }

    /// Scales a non-negative amount, flooring the result.
    pub fn scale(self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        ((amount as i64 * self.0 as i64) / Self::SCALE as i64) as i32
    }

    pub fn as_f32(self) -> f32 {
        self.0 as f32 / Self::SCALE as f32
    }
}

impl Default for SpeedModifier {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for SpeedModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0 / 10)
    }
}
