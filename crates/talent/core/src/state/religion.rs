use crate::ability::AbilityKind;
use crate::config::TalentConfig;
use crate::state::God;

/// A sacrifice Ru currently offers, with the piety it would grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SacrificeOffer {
    pub ability: AbilityKind,
    pub piety: i32,
}

/// Faith standing of the player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Religion {
    pub god: God,
    pub piety: i32,
    /// Outstanding penance with the current god.
    pub penance: i32,
    /// One-time capstone gift still unclaimed.
    pub capstone_available: bool,
    pub available_sacrifices: Vec<SacrificeOffer>,
    pub sacrifices: Vec<AbilityKind>,
}

impl Religion {
    pub fn worshipping(god: God, piety: i32) -> Self {
        Self {
            god,
            piety,
            ..Self::default()
        }
    }

    /// Number of piety breakpoints reached, 0..=6.
    pub fn piety_rank(&self) -> i32 {
        TalentConfig::PIETY_BREAKPOINTS
            .iter()
            .take_while(|breakpoint| self.piety >= **breakpoint)
            .count() as i32
    }

    pub fn in_good_standing(&self) -> bool {
        !self.god.is_none() && self.penance == 0
    }

    pub fn offers(&self, ability: AbilityKind) -> Option<&SacrificeOffer> {
        self.available_sacrifices
            .iter()
            .find(|offer| offer.ability == ability)
    }

    /// Adds piety up to the conventional ceiling of 200.
    pub fn gain_piety(&mut self, amount: i32) {
        self.piety = (self.piety + amount.max(0)).min(200);
    }

    pub fn lose_piety(&mut self, amount: i32) {
        self.piety = (self.piety - amount.max(0)).max(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_counts_breakpoints() {
        assert_eq!(Religion::worshipping(God::Trog, 0).piety_rank(), 0);
        assert_eq!(Religion::worshipping(God::Trog, 30).piety_rank(), 1);
        assert_eq!(Religion::worshipping(God::Trog, 99).piety_rank(), 3);
        assert_eq!(Religion::worshipping(God::Trog, 160).piety_rank(), 6);
    }

    #[test]
    fn piety_stays_in_bounds() {
        let mut religion = Religion::worshipping(God::Zin, 190);
        religion.gain_piety(50);
        assert_eq!(religion.piety, 200);
        religion.lose_piety(500);
        assert_eq!(religion.piety, 0);
    }
}
