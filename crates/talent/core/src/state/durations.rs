//! Timed conditions on the player, counted in auts (ten per normal turn).

use std::collections::BTreeMap;

/// Kinds of timed player conditions abilities read or set.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DurationKind {
    Berserk,
    Exhausted,
    BreathWeapon,
    Confusion,
    Slow,
    Poison,
    Sickness,
    Flight,
    Invisibility,
    Transformation,
    Singing,
    Recite,
    Heroism,
    Finesse,
    InjuryMirror,
    Lifesaving,
    DivineShield,
    DivineStamina,
    DivineVigour,
    TrogsHand,
    Slimify,
    Scrying,
    TimeStep,
}

/// Active durations; absent entries are zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Durations {
    remaining: BTreeMap<DurationKind, i32>,
}

impl Durations {
    pub fn get(&self, kind: DurationKind) -> i32 {
        self.remaining.get(&kind).copied().unwrap_or(0)
    }

    pub fn is_active(&self, kind: DurationKind) -> bool {
        self.get(kind) > 0
    }

    pub fn set(&mut self, kind: DurationKind, amount: i32) {
        if amount <= 0 {
            self.remaining.remove(&kind);
        } else {
            self.remaining.insert(kind, amount);
        }
    }

    #[must_use]
    pub fn with(mut self, kind: DurationKind, amount: i32) -> Self {
        self.set(kind, amount);
        self
    }

    /// Adds `amount`, never exceeding `cap` when one is given.
    pub fn increase(&mut self, kind: DurationKind, amount: i32, cap: Option<i32>) {
        let mut total = self.get(kind).saturating_add(amount.max(0));
        if let Some(cap) = cap {
            total = total.min(cap);
        }
        self.set(kind, total);
    }

    pub fn clear(&mut self, kind: DurationKind) {
        self.remaining.remove(&kind);
    }
}
