//! Placeholder rules.
//!
//! Some identities stand in for another action depending on the player's
//! situation, or disappear entirely. Rules map into identities no rule
//! touches, so applying them twice changes nothing.

use crate::ability::AbilityKind;
use crate::env::WorldOracle;
use crate::state::{God, PlayerState, Species};

/// Resolves `ability` to what the player would actually get.
///
/// Returns [`AbilityKind::None`] when the ability is suppressed.
pub fn redirect(ability: AbilityKind, player: &PlayerState, world: &dyn WorldOracle) -> AbilityKind {
    use AbilityKind::*;

    match ability {
        YredAnimateRemains => {
            let religion = &player.religion;
            if religion.god == God::Yredelemnul
                && religion.penance == 0
                && religion.piety_rank() >= 2
            {
                AbilityKind::None
            } else {
                ability
            }
        }
        YredRecallUndeadSlaves | BeoghRecallOrcishFollowers if !player.recall_list.is_empty() => {
            StopRecall
        }
        EvokeBerserk | TrogBerserk
            if player.is_lifeless_undead(false) || player.species == Species::Formicid =>
        {
            AbilityKind::None
        }
        Blink | EvokeBlink if player.species == Species::Formicid => AbilityKind::None,
        LugonuAbyssExit | LugonuAbyssEnter if !world.abyss_reachable() => AbilityKind::None,
        TsoBlessWeapon | KikuBlessWeapon | LugonuBlessWeapon if player.species == Species::Felid => {
            AbilityKind::None
        }
        _ => ability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::WorldSnapshot;
    use crate::state::Religion;
    use strum::IntoEnumIterator;

    fn situations() -> Vec<(PlayerState, WorldSnapshot)> {
        let mut recalling = PlayerState::new(Species::HillOrc, 10);
        recalling.recall_list.push("orc warrior".into());

        let mut yred = PlayerState::new(Species::Mummy, 10);
        yred.religion = Religion::worshipping(God::Yredelemnul, 60);

        vec![
            (PlayerState::new(Species::Human, 5), WorldSnapshot::default()),
            (PlayerState::new(Species::Formicid, 5), WorldSnapshot::default()),
            (PlayerState::new(Species::Felid, 5), WorldSnapshot::default()),
            (
                PlayerState::new(Species::Human, 5),
                WorldSnapshot {
                    abyss_unreachable: true,
                    ..WorldSnapshot::default()
                },
            ),
            (recalling, WorldSnapshot::default()),
            (yred, WorldSnapshot::default()),
        ]
    }

    #[test]
    fn applying_twice_changes_nothing() {
        for (player, world) in situations() {
            for ability in AbilityKind::iter() {
                let once = redirect(ability, &player, &world);
                assert_eq!(redirect(once, &player, &world), once, "{ability}");
            }
        }
    }

    #[test]
    fn recall_becomes_stop_recall() {
        let (player, world) = situations().remove(4);
        assert_eq!(
            redirect(AbilityKind::BeoghRecallOrcishFollowers, &player, &world),
            AbilityKind::StopRecall
        );
    }

    #[test]
    fn mummies_never_rage_but_thirsty_vampires_may_try() {
        let world = WorldSnapshot::default();
        let mummy = PlayerState::new(Species::Mummy, 5);
        assert_eq!(redirect(AbilityKind::TrogBerserk, &mummy, &world), AbilityKind::None);

        let mut vampire = PlayerState::new(Species::Vampire, 5);
        vampire.hunger = 1500;
        assert_eq!(
            redirect(AbilityKind::EvokeBerserk, &vampire, &world),
            AbilityKind::EvokeBerserk
        );
    }

    #[test]
    fn felids_cannot_bless_weapons() {
        let (player, world) = situations().remove(2);
        assert_eq!(redirect(AbilityKind::KikuBlessWeapon, &player, &world), AbilityKind::None);
        assert_eq!(redirect(AbilityKind::KikuTorment, &player, &world), AbilityKind::KikuTorment);
    }
}
