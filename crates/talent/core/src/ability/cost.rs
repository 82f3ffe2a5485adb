//! Resource cost value types.
//!
//! Two shapes cover every ability cost:
//!
//! - [`GenericCost`]: a base amount plus an optional averaged random term.
//!   Used for piety.
//! - [`ScalingCost`]: either a fixed amount or a per-mille share of a current
//!   maximum. Used for hit points.
//!
//! Both evaluate to a non-negative integer and expose `is_nonzero()` for
//! display decisions; neither is used to gate execution on its own.

use crate::env::Dice;

/// Discrete cost: `base + random2avg(add, rolls)` when `add > 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "GenericCostSpec", into = "GenericCostSpec")
)]
pub struct GenericCost {
    base: i32,
    add: i32,
    rolls: i32,
}

impl Default for GenericCost {
    fn default() -> Self {
        Self::fixed(0)
    }
}

impl GenericCost {
    /// The conventional "about `n`" cost: `n` plus a small averaged bonus.
    pub fn new(amount: i32) -> Self {
        let base = amount.max(0);
        let add = if base == 0 { 0 } else { (base + 1) / 2 + 1 };
        Self {
            base,
            add,
            rolls: 1,
        }
    }

    /// Exactly `amount`, never randomized.
    pub fn fixed(amount: i32) -> Self {
        Self {
            base: amount.max(0),
            add: 0,
            rolls: 1,
        }
    }

    /// Uniform-ish cost in `[lo, hi]` from a single roll.
    pub fn range(lo: i32, hi: i32) -> Self {
        Self::range_with_rolls(lo, hi, 1)
    }

    /// Cost in `[lo, hi]`, averaged over `rolls` draws.
    pub fn range_with_rolls(lo: i32, hi: i32, rolls: i32) -> Self {
        let lo = lo.max(0);
        let hi = hi.max(lo);
        Self {
            base: lo,
            add: hi - lo + 1,
            rolls: rolls.max(1),
        }
    }

    /// Raw constructor used by data files.
    pub fn from_parts(base: i32, add: i32, rolls: i32) -> Self {
        Self {
            base: base.max(0),
            add: add.max(0),
            rolls: rolls.max(1),
        }
    }

    pub const fn base(&self) -> i32 {
        self.base
    }

    pub const fn add(&self) -> i32 {
        self.add
    }

    pub const fn rolls(&self) -> i32 {
        self.rolls
    }

    /// Evaluates the cost, drawing from `dice` only when there is a random term.
    pub fn cost(&self, dice: &mut Dice<'_>) -> i32 {
        let extra = if self.add > 0 {
            dice.random2avg(self.add, self.rolls)
        } else {
            0
        };
        self.base + extra
    }

    /// Expected cost, used for descriptions.
    pub const fn average(&self) -> i32 {
        self.base + self.add / 2
    }

    pub const fn is_nonzero(&self) -> bool {
        self.base > 0 || self.add > 0
    }
}

/// Hit-point style cost: fixed, or per-mille of a maximum.
///
/// A negative stored magnitude marks a fixed cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "ScalingCostSpec", into = "ScalingCostSpec")
)]
pub struct ScalingCost {
    value: i32,
}

impl ScalingCost {
    /// `per_mille` thousandths of the maximum, rounded to the nearest point
    /// with halves going up: `(per_mille * max + 500) / 1000`.
    pub fn per_mille(per_mille: i32) -> Self {
        Self {
            value: per_mille.max(0),
        }
    }

    /// Exactly `amount` regardless of the maximum.
    pub fn fixed(amount: i32) -> Self {
        Self {
            value: -amount.max(0),
        }
    }

    pub const fn is_fixed(&self) -> bool {
        self.value < 0
    }

    /// Evaluates the cost against the current maximum.
    pub fn cost(&self, max: i32) -> i32 {
        if self.value < 0 {
            -self.value
        } else {
            ((self.value * max.max(0) + 500) / 1000).max(0)
        }
    }

    pub const fn is_nonzero(&self) -> bool {
        self.value != 0
    }
}

// ============================================================================
// Data-file representation
// ============================================================================

/// How a [`GenericCost`] is written in data files.
#[cfg(feature = "serde")]
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub enum GenericCostSpec {
    Free,
    Amount(i32),
    Fixed(i32),
    Range(i32, i32),
    Rolled { base: i32, add: i32, rolls: i32 },
}

#[cfg(feature = "serde")]
impl From<GenericCostSpec> for GenericCost {
    fn from(spec: GenericCostSpec) -> Self {
        match spec {
            GenericCostSpec::Free => GenericCost::default(),
            GenericCostSpec::Amount(n) => GenericCost::new(n),
            GenericCostSpec::Fixed(n) => GenericCost::fixed(n),
            GenericCostSpec::Range(lo, hi) => GenericCost::range(lo, hi),
            GenericCostSpec::Rolled { base, add, rolls } => GenericCost::from_parts(base, add, rolls),
        }
    }
}

#[cfg(feature = "serde")]
impl From<GenericCost> for GenericCostSpec {
    fn from(cost: GenericCost) -> Self {
        if !cost.is_nonzero() {
            GenericCostSpec::Free
        } else {
            GenericCostSpec::Rolled {
                base: cost.base,
                add: cost.add,
                rolls: cost.rolls,
            }
        }
    }
}

/// How a [`ScalingCost`] is written in data files.
#[cfg(feature = "serde")]
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub enum ScalingCostSpec {
    Free,
    PerMille(i32),
    Fixed(i32),
}

#[cfg(feature = "serde")]
impl From<ScalingCostSpec> for ScalingCost {
    fn from(spec: ScalingCostSpec) -> Self {
        match spec {
            ScalingCostSpec::Free => ScalingCost::default(),
            ScalingCostSpec::PerMille(n) => ScalingCost::per_mille(n),
            ScalingCostSpec::Fixed(n) => ScalingCost::fixed(n),
        }
    }
}

#[cfg(feature = "serde")]
impl From<ScalingCost> for ScalingCostSpec {
    fn from(cost: ScalingCost) -> Self {
        match cost.value {
            0 => ScalingCostSpec::Free,
            v if v < 0 => ScalingCostSpec::Fixed(-v),
            v => ScalingCostSpec::PerMille(v),
        }
    }
}
