use std::collections::BTreeMap;

use crate::config::TalentConfig;

/// Trainable skills that abilities read or exercise.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Skill {
    Fighting,
    ShortBlades,
    LongBlades,
    Axes,
    MaceFlails,
    Polearms,
    Staves,
    UnarmedCombat,
    Bows,
    Throwing,
    Armour,
    Dodging,
    Shields,
    Stealth,
    Spellcasting,
    Conjurations,
    Hexes,
    Charms,
    Summonings,
    Necromancy,
    Translocations,
    Transmutations,
    FireMagic,
    IceMagic,
    AirMagic,
    EarthMagic,
    PoisonMagic,
    Invocations,
    Evocations,
}

/// Trained skill levels in tenths, plus accumulated practice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skills {
    #[cfg_attr(feature = "serde", serde(default))]
    levels: BTreeMap<Skill, u16>,
    #[cfg_attr(feature = "serde", serde(default))]
    practice: BTreeMap<Skill, u32>,
    /// Skills temporarily drained by abilities.
    #[cfg_attr(feature = "serde", serde(default))]
    drained: bool,
}

impl Skills {
    const MAX_TENTHS: u16 = (TalentConfig::MAX_SKILL_LEVEL as u16) * 10;

    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter taking whole levels.
    #[must_use]
    pub fn with_level(mut self, skill: Skill, level: i32) -> Self {
        self.set_level_tenths(skill, level.saturating_mul(10));
        self
    }

    pub fn set_level_tenths(&mut self, skill: Skill, tenths: i32) {
        let tenths = tenths.clamp(0, i32::from(Self::MAX_TENTHS)) as u16;
        if tenths == 0 {
            self.levels.remove(&skill);
        } else {
            self.levels.insert(skill, tenths);
        }
    }

    pub fn level_tenths(&self, skill: Skill) -> i32 {
        i32::from(self.levels.get(&skill).copied().unwrap_or(0))
    }

    /// Whole trained level.
    pub fn level(&self, skill: Skill) -> i32 {
        self.level_tenths(skill) / 10
    }

    /// Level scaled by `multiplier`, keeping tenths precision.
    pub fn scaled(&self, skill: Skill, multiplier: i32) -> i32 {
        self.level_tenths(skill) * multiplier / 10
    }

    /// `level * numerator / denominator`, rounded down.
    pub fn scaled_div(&self, skill: Skill, numerator: i32, denominator: i32) -> i32 {
        if denominator == 0 {
            return 0;
        }
        self.level_tenths(skill) * numerator / (denominator * 10)
    }

    pub fn is_maxed(&self, skill: Skill) -> bool {
        self.level_tenths(skill) >= i32::from(Self::MAX_TENTHS)
    }

    /// Skills with any training that can still rise.
    pub fn unmaxed(&self) -> impl Iterator<Item = Skill> + '_ {
        self.levels
            .iter()
            .filter(|(_, tenths)| **tenths < Self::MAX_TENTHS)
            .map(|(skill, _)| *skill)
    }

    pub fn trained(&self) -> impl Iterator<Item = (Skill, i32)> + '_ {
        self.levels
            .iter()
            .map(|(skill, tenths)| (*skill, i32::from(*tenths)))
    }

    pub fn exercise(&mut self, skill: Skill, amount: u32) {
        *self.practice.entry(skill).or_default() += amount;
    }

    pub fn practice(&self, skill: Skill) -> u32 {
        self.practice.get(&skill).copied().unwrap_or(0)
    }

    pub fn drain(&mut self) {
        self.drained = true;
    }

    pub fn is_drained(&self) -> bool {
        self.drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_cap_at_maximum() {
        let skills = Skills::new().with_level(Skill::Invocations, 40);
        assert_eq!(skills.level(Skill::Invocations), 27);
        assert!(skills.is_maxed(Skill::Invocations));
        assert_eq!(skills.unmaxed().count(), 0);
    }

    #[test]
    fn scaled_keeps_tenths() {
        let mut skills = Skills::new();
        skills.set_level_tenths(Skill::Evocations, 75);
        assert_eq!(skills.scaled(Skill::Evocations, 2), 15);
        assert_eq!(skills.scaled_div(Skill::Evocations, 1, 4), 1);
        assert_eq!(skills.level(Skill::Evocations), 7);
    }

    #[test]
    fn zero_level_is_untrained() {
        let skills = Skills::new().with_level(Skill::Fighting, 0);
        assert_eq!(skills.trained().count(), 0);
    }
}
