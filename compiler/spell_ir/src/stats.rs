use std::fmt;

/// Numeric accumulators summed across all pieces during compilation.
///
/// Hosts use these to enforce budgets (a caster can only afford so much
/// cost, a casting device only supports so much complexity).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum SpellStat {
    /// Number of non-connector pieces.
    Complexity,
    /// Strength of the spell's effects.
    Potency,
    /// Resource cost of one cast.
    Cost,
}

impl SpellStat {
    pub const COUNT: usize = 3;

    pub const ALL: [SpellStat; SpellStat::COUNT] =
        [SpellStat::Complexity, SpellStat::Potency, SpellStat::Cost];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            SpellStat::Complexity => "complexity",
            SpellStat::Potency => "potency",
            SpellStat::Cost => "cost",
        }
    }
}

impl fmt::Display for SpellStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
