//! Failure-rate formulas.
//!
//! Each definition carries the formula family its failure chance follows. The
//! result is always clamped to a percentage.

use crate::config::TalentConfig;
use crate::state::{Form, Mutation, PlayerState, Skill};

/// How an ability's failure chance is computed from the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureFormula {
    /// Body-given powers: improve with experience level and mutation level.
    ///
    /// `base - XL * level_num / level_den - mutation_level * per_mutation_level`,
    /// minus `dragon_bonus` while in dragon form.
    Innate {
        base: i32,
        #[cfg_attr(feature = "serde", serde(default = "one"))]
        level_num: i32,
        #[cfg_attr(feature = "serde", serde(default = "one"))]
        level_den: i32,
        #[cfg_attr(feature = "serde", serde(default))]
        mutation: Option<Mutation>,
        #[cfg_attr(feature = "serde", serde(default))]
        per_mutation_level: i32,
        #[cfg_attr(feature = "serde", serde(default))]
        dragon_bonus: i32,
    },
    /// Item powers: `base - Evocations * multiplier`.
    Evocation { base: i32, multiplier: i32 },
    /// Faith powers: `base - piety / piety_divisor - skill * multiplier`.
    Invocation {
        base: i32,
        piety_divisor: i32,
        #[cfg_attr(feature = "serde", serde(default = "invocations"))]
        skill: Skill,
        multiplier: i32,
    },
    /// Piety alone: `base - piety / piety_divisor`.
    Devotion { base: i32, piety_divisor: i32 },
    /// Piety against a breakpoint: `breakpoint(rank) - piety`.
    PietyBreakpoint { rank: i32 },
    /// Never fails.
    Zero,
    /// No formula on record; treated as never failing.
    #[default]
    Unrated,
}

#[cfg(feature = "serde")]
fn one() -> i32 {
    1
}

#[cfg(feature = "serde")]
fn invocations() -> Skill {
    Skill::Invocations
}

impl FailureFormula {
    /// Failure chance in percent, clamped to `[0, 100]`.
    pub fn percent(&self, player: &PlayerState) -> i32 {
        let raw = match *self {
            Self::Innate {
                base,
                level_num,
                level_den,
                mutation,
                per_mutation_level,
                dragon_bonus,
            } => {
                let level = if level_den == 0 {
                    0
                } else {
                    player.experience_level * level_num / level_den
                };
                let mutation = mutation
                    .map(|m| player.mutations.level(m) * per_mutation_level)
                    .unwrap_or(0);
                let dragon = if player.form == Form::Dragon {
                    dragon_bonus
                } else {
                    0
                };
                base - level - mutation - dragon
            }
            Self::Evocation { base, multiplier } => {
                base - player.skill(Skill::Evocations, multiplier)
            }
            Self::Invocation {
                base,
                piety_divisor,
                skill,
                multiplier,
            } => base - piety_share(player, piety_divisor) - player.skill(skill, multiplier),
            Self::Devotion {
                base,
                piety_divisor,
            } => base - piety_share(player, piety_divisor),
            Self::PietyBreakpoint { rank } => {
                TalentConfig::piety_breakpoint(rank) - player.religion.piety
            }
            Self::Zero | Self::Unrated => 0,
        };
        raw.clamp(0, 100)
    }

    /// Skill a successful use trains, if any.
    pub const fn trained_skill(&self) -> Option<Skill> {
        match *self {
            Self::Evocation { .. } => Some(Skill::Evocations),
            Self::Invocation { skill, .. } => Some(skill),
            _ => None,
        }
    }
}

fn piety_share(player: &PlayerState, divisor: i32) -> i32 {
    if divisor == 0 {
        0
    } else {
        player.religion.piety / divisor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{God, Religion, Skills, Species};
    use proptest::prelude::*;

    fn believer(piety: i32, invocations: i32) -> PlayerState {
        let mut player = PlayerState::new(Species::Human, 10);
        player.religion = Religion::worshipping(God::Makhleb, piety);
        player.skills = Skills::new().with_level(Skill::Invocations, invocations);
        player
    }

    #[test]
    fn untrained_invocation_keeps_base() {
        let formula = FailureFormula::Invocation {
            base: 80,
            piety_divisor: 25,
            skill: Skill::Invocations,
            multiplier: 4,
        };
        assert_eq!(formula.percent(&believer(0, 0)), 80);
        assert_eq!(formula.percent(&believer(100, 5)), 80 - 4 - 20);
    }

    #[test]
    fn spit_poison_improves_with_mutation() {
        let formula = FailureFormula::Innate {
            base: 40,
            level_num: 1,
            level_den: 1,
            mutation: Some(Mutation::SpitPoison),
            per_mutation_level: 10,
            dragon_bonus: 0,
        };
        let mut player = PlayerState::new(Species::Human, 5);
        player.mutations.set(Mutation::SpitPoison, 2);
        assert_eq!(formula.percent(&player), 40 - 20 - 5);
    }

    #[test]
    fn dragon_form_helps_breath() {
        let formula = FailureFormula::Innate {
            base: 30,
            level_num: 1,
            level_den: 1,
            mutation: None,
            per_mutation_level: 0,
            dragon_bonus: 20,
        };
        let mut player = PlayerState::new(Species::RedDraconian, 4);
        assert_eq!(formula.percent(&player), 26);
        player.form = Form::Dragon;
        assert_eq!(formula.percent(&player), 6);
    }

    #[test]
    fn trog_hand_scales_with_piety() {
        let formula = FailureFormula::PietyBreakpoint { rank: 2 };
        assert_eq!(formula.percent(&believer(30, 0)), 20);
        assert_eq!(formula.percent(&believer(120, 0)), 0);
    }

    #[test]
    fn unrated_never_fails() {
        assert_eq!(FailureFormula::Unrated.percent(&believer(0, 0)), 0);
        assert_eq!(FailureFormula::Zero.trained_skill(), None);
    }

    proptest! {
        #[test]
        fn always_a_percentage(
            base in -200i32..300,
            divisor in 0i32..40,
            multiplier in 0i32..10,
            piety in 0i32..200,
            level in 0i32..27,
        ) {
            let formula = FailureFormula::Invocation {
                base,
                piety_divisor: divisor,
                skill: Skill::Invocations,
                multiplier,
            };
            let percent = formula.percent(&believer(piety, level));
            prop_assert!((0..=100).contains(&percent));
        }
    }
}
