//! Per-ability preconditions.
//!
//! Registration table from identity to predicate, plus the two flag-driven
//! rules every breath and every exhausting ability share.

use crate::ability::{AbilityDef, AbilityFlags, AbilityKind};
use crate::check::Refusal;
use crate::config::TalentConfig;
use crate::env::WorldOracle;
use crate::state::{DurationKind, PlayerState, Species};

type Predicate = fn(&PlayerState, &dyn WorldOracle) -> Result<(), Refusal>;

fn refuse_if(condition: bool, reason: &'static str) -> Result<(), Refusal> {
    if condition {
        Err(Refusal::Condition { reason })
    } else {
        Ok(())
    }
}

/// Why the player cannot go berserk, if they cannot.
pub(crate) fn berserk_refusal(player: &PlayerState) -> Option<&'static str> {
    if player.is_berserk() {
        Some("You're already berserk!")
    } else if player.is_exhausted() {
        Some("You're too exhausted to go berserk.")
    } else if player.is_lifeless_undead(true) {
        Some("You cannot raise a blood rage in your lifeless body.")
    } else if player.species == Species::Formicid {
        Some("You're too calm and focused to rage.")
    } else {
        None
    }
}

const PREDICATES: &[(AbilityKind, Predicate)] = &[
    (AbilityKind::ZinRecite, |_, world| {
        refuse_if(world.audience() == 0, "There's no appreciative audience!")
    }),
    (AbilityKind::ZinCureAllMutations, |player, _| {
        refuse_if(
            player.mutations.iter().next().is_none(),
            "You have no mutations to be cured!",
        )
    }),
    (AbilityKind::ZinSanctuary, |_, world| {
        refuse_if(
            world.sanctuary_exists(),
            "There's already a sanctuary in place on this level.",
        )
    }),
    (AbilityKind::ZinDonateGold, |player, _| {
        refuse_if(player.gold <= 0, "You have nothing to donate!")
    }),
    (AbilityKind::ElyvilonPurification, |player, _| {
        refuse_if(
            !player.has_ailment() && !player.stats.is_drained(),
            "Nothing ails you!",
        )
    }),
    (AbilityKind::MummyRestoration, |player, _| {
        refuse_if(
            !player.stats.is_drained() && player.hp.rotted == 0,
            "You don't need to restore your attributes or health!",
        )
    }),
    (AbilityKind::LugonuAbyssExit, |_, world| {
        refuse_if(!world.in_abyss(), "You aren't in the Abyss!")
    }),
    (AbilityKind::LugonuAbyssEnter, |_, world| {
        refuse_if(world.in_abyss(), "You're already here!")
    }),
    (AbilityKind::LugonuCorrupt, |_, world| {
        refuse_if(!world.level_corruptible(), "This place cannot be corrupted.")
    }),
    (AbilityKind::SifMunaForgetSpell, |player, _| {
        refuse_if(player.spells_known.is_empty(), "You don't know any spells.")
    }),
    (AbilityKind::AshenzariTransferKnowledge, |player, _| {
        refuse_if(
            player.skills.unmaxed().next().is_none(),
            "You have nothing more to learn.",
        )
    }),
    (AbilityKind::Blink, no_teleport_block),
    (AbilityKind::EvokeBlink, no_teleport_block),
    (AbilityKind::EvokeBerserk, able_to_rage),
    (AbilityKind::TrogBerserk, able_to_rage),
    (AbilityKind::EvokeFog, |_, world| {
        refuse_if(world.cloud_here(), "It's too cloudy to do that here.")
    }),
    (AbilityKind::RuSacrificeExperience, |player, _| {
        refuse_if(
            player.experience_level <= TalentConfig::RU_SAC_XP_LEVELS,
            "You don't have enough experience to sacrifice.",
        )
    }),
    (AbilityKind::KikuTorment, |_, world| {
        refuse_if(!world.corpses_nearby(), "There are no corpses to sacrifice!")
    }),
];

fn no_teleport_block(_: &PlayerState, world: &dyn WorldOracle) -> Result<(), Refusal> {
    refuse_if(world.teleport_blocked(), "You cannot blink right now.")
}

fn able_to_rage(player: &PlayerState, _: &dyn WorldOracle) -> Result<(), Refusal> {
    match berserk_refusal(player) {
        Some(reason) => Err(Refusal::Condition { reason }),
        None => Ok(()),
    }
}

/// Runs the flag rules and the identity's own predicate.
pub(crate) fn check(
    def: &AbilityDef,
    player: &PlayerState,
    world: &dyn WorldOracle,
) -> Result<(), Refusal> {
    if def.has(AbilityFlags::BREATH) && player.durations.is_active(DurationKind::BreathWeapon) {
        return Err(Refusal::NotReady);
    }
    if def.has(AbilityFlags::EXHAUSTION) && player.is_exhausted() {
        return Err(Refusal::Condition {
            reason: "You're too exhausted.",
        });
    }

    PREDICATES
        .iter()
        .filter(|(kind, _)| *kind == def.kind)
        .try_for_each(|(_, predicate)| predicate(player, world))
}
