//! Which abilities the player is offered right now.

use crate::ability::{AbilityFlags, AbilityKind};
use crate::env::{OracleError, TalentEnv, WorldOracle};
use crate::state::{
    DurationKind, Evokables, Form, God, HungerState, Mutation, PlayerFlags, PlayerState, Species,
};
use crate::talent::{Talent, god_abilities, redirect, slots};

/// Body, mutation and form abilities, in menu order.
fn innate_abilities(player: &PlayerState, world: &dyn WorldOracle, include_unusable: bool) -> Vec<AbilityKind> {
    let mut found = Vec::new();
    let mutations = &player.mutations;

    if mutations.has(Mutation::MummyRestoration) {
        found.push(AbilityKind::MummyRestoration);
    }
    if player.species == Species::DeepDwarf {
        found.push(AbilityKind::Recharging);
    }
    if player.species == Species::Formicid && (player.form != Form::Tree || include_unusable) {
        found.push(AbilityKind::Dig);
        if world.shaft_possible() {
            found.push(AbilityKind::ShaftSelf);
        }
    }

    match mutations.level(Mutation::SpitPoison) {
        0 => {}
        3 => found.push(AbilityKind::BreathePoison),
        _ => found.push(AbilityKind::SpitPoison),
    }

    let breath = player.species.draconian_breath();
    if !breath.is_none() && (!player.form.changes_physically() || player.form == Form::Dragon) {
        found.push(breath);
    }

    if player.species == Species::Vampire
        && player.experience_level >= 3
        && player.hunger_state() <= HungerState::Satiated
        && player.form != Form::Bat
    {
        found.push(AbilityKind::TranBat);
    }

    let racial_flight = player.racial_permanent_flight();
    let perm_flight = player.flags.contains(PlayerFlags::PERM_FLIGHT);
    if (mutations.has(Mutation::TenguFlight) && !player.airborne()) || (racial_flight && !perm_flight) {
        found.push(AbilityKind::Fly);
    }
    if perm_flight && racial_flight {
        found.push(AbilityKind::StopFlying);
    }

    if mutations.has(Mutation::HurlHellfire) {
        found.push(AbilityKind::Hellfire);
    }
    if player.form.is_transformed() && !player.flags.contains(PlayerFlags::TRANSFORM_UNCANCELLABLE) {
        found.push(AbilityKind::EndTransformation);
    }
    if mutations.has(Mutation::Blink) {
        found.push(AbilityKind::Blink);
    }
    found
}

/// Faith actions plus renouncing and converting.
fn faith_abilities(player: &PlayerState, world: &dyn WorldOracle, include_unusable: bool) -> Vec<AbilityKind> {
    let mut found = god_abilities(player, world, include_unusable);
    let voiced = include_unusable || !world.silenced();

    if voiced && !player.religion.god.is_none() {
        found.push(AbilityKind::RenounceReligion);
    }
    if voiced && player.religion.god != God::Beogh && world.beogh_conversion_offered() {
        found.push(AbilityKind::ConvertToBeogh);
    }
    found
}

/// Lingering effects that can be ended, and item powers.
fn lingering_and_item_abilities(player: &PlayerState) -> Vec<AbilityKind> {
    let mut found = Vec::new();

    if player.species != Species::RedDraconian && player.form == Form::Dragon {
        found.push(AbilityKind::BreatheFire);
    }
    if player.flags.contains(PlayerFlags::DELAYED_FIREBALL) {
        found.push(AbilityKind::DelayedFireball);
    }
    if player.durations.is_active(DurationKind::Singing) {
        found.push(AbilityKind::StopSinging);
    }

    if player.mutations.has(Mutation::NoArtifice) {
        return found;
    }
    let items = player.evokables;
    if items.contains(Evokables::BLINK) {
        found.push(AbilityKind::EvokeBlink);
    }
    if items.contains(Evokables::FOG) {
        found.push(AbilityKind::EvokeFog);
    }
    if items.contains(Evokables::BERSERK) {
        found.push(AbilityKind::EvokeBerserk);
    }
    if items.contains(Evokables::INVISIBILITY) && !player.flags.contains(PlayerFlags::INVIS_UNCANCELLABLE) {
        if player.durations.is_active(DurationKind::Invisibility) {
            found.push(AbilityKind::EvokeTurnVisible);
        } else {
            found.push(AbilityKind::EvokeTurnInvisible);
        }
    }
    let racial_perm = player.flags.contains(PlayerFlags::PERM_FLIGHT) && player.racial_permanent_flight();
    if items.contains(Evokables::FLIGHT) && !racial_perm {
        if !player.airborne() {
            found.push(AbilityKind::EvokeFlight);
        } else if !player.flags.contains(PlayerFlags::FLIGHT_UNCANCELLABLE) {
            found.push(AbilityKind::StopFlying);
        }
    }
    found
}

/// Clears slot entries the ability table no longer knows.
fn forget_stale_slots(player: &mut PlayerState, env: &TalentEnv<'_>) -> Result<(), OracleError> {
    let abilities = env.abilities()?;
    let stale: Vec<_> = player
        .slots
        .bound()
        .filter(|(_, kind)| abilities.ability(*kind).kind != *kind)
        .collect();
    for (slot, kind) in stale {
        tracing::warn!(%slot, %kind, "clearing slot bound to an unknown ability");
        player.slots.clear(slot);
    }
    Ok(())
}

/// Every talent the player may use now, non-faith first.
///
/// With `suppress_if_impaired`, a confused player is not offered abilities
/// that cannot be used while confused. `include_unusable` keeps talents that
/// silence or tree form would otherwise hide. New talents claim slots as a
/// side effect; slots are read back once all claims are done.
pub fn offered_talents(
    player: &mut PlayerState,
    env: &TalentEnv<'_>,
    suppress_if_impaired: bool,
    include_unusable: bool,
) -> Result<Vec<Talent>, OracleError> {
    let abilities = env.abilities()?;
    let world = env.world()?;
    let config = env.config()?;

    forget_stale_slots(player, env)?;

    let mut candidates = innate_abilities(player, world, include_unusable);
    candidates.extend(faith_abilities(player, world, include_unusable));
    candidates.extend(lingering_and_item_abilities(player));

    let mut talents: Vec<Talent> = Vec::new();
    for candidate in candidates {
        let kind = redirect(candidate, player, world);
        if kind.is_none() || talents.iter().any(|talent| talent.kind == kind) {
            continue;
        }
        let def = abilities.ability(kind);
        if def.kind != kind {
            tracing::warn!(%kind, "offered ability has no definition");
            continue;
        }
        if suppress_if_impaired && player.is_confused() && !def.has(AbilityFlags::CONF_OK) {
            continue;
        }

        slots::find_slot(player, abilities, config, world, kind, def.invocation);
        talents.push(Talent {
            kind,
            slot: None,
            fail: def.failure.percent(player),
            invocation: def.invocation,
        });
    }

    // A later claim may have swapped an earlier talent's letter.
    for talent in &mut talents {
        talent.slot = slots::lookup_slot(player, world, talent.kind);
    }
    talents.sort_by_key(|talent| talent.invocation);
    Ok(talents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityDef, AbilityRegistry};
    use crate::config::TalentConfig;
    use crate::env::{Env, PcgRng, ScriptedPrompts, StandardCosts, WorldSnapshot};
    use crate::state::{Religion, SlotKey};
    use std::collections::BTreeSet;
    use strum::IntoEnumIterator;

    fn registry() -> AbilityRegistry {
        let mut defs = vec![AbilityDef::sentinel()];
        for kind in AbilityKind::iter().skip(1) {
            let mut def = AbilityDef::new(kind, kind.to_string());
            if matches!(kind, AbilityKind::StopFlying | AbilityKind::EndTransformation) {
                def = def.with_flags(AbilityFlags::CONF_OK);
            }
            if kind >= AbilityKind::ZinRecite && kind < AbilityKind::StopRecall {
                def = def.invocation();
            }
            defs.push(def);
        }
        AbilityRegistry::new(defs).unwrap()
    }

    fn offer(player: &mut PlayerState, world: &WorldSnapshot, suppress: bool, unusable: bool) -> Vec<Talent> {
        let registry = registry();
        let config = TalentConfig::default();
        let prompts = ScriptedPrompts::new();
        let env = Env::with_all(&registry, world, &prompts, &config, &PcgRng, &StandardCosts)
            .into_talent_env();
        offered_talents(player, &env, suppress, unusable).unwrap()
    }

    fn kinds(talents: &[Talent]) -> Vec<AbilityKind> {
        talents.iter().map(|talent| talent.kind).collect()
    }

    #[test]
    fn grown_tengu_can_land() {
        let mut player = PlayerState::new(Species::Tengu, 14);
        player.mutations.set(Mutation::TenguFlight, 2);
        assert_eq!(kinds(&offer(&mut player, &WorldSnapshot::default(), true, false)), vec![AbilityKind::Fly]);

        player.flags.insert(PlayerFlags::PERM_FLIGHT);
        assert_eq!(
            kinds(&offer(&mut player, &WorldSnapshot::default(), true, false)),
            vec![AbilityKind::StopFlying]
        );
    }

    #[test]
    fn spit_poison_upgrades_at_level_three() {
        let mut player = PlayerState::new(Species::Human, 5);
        player.mutations.set(Mutation::SpitPoison, 3);
        assert_eq!(
            kinds(&offer(&mut player, &WorldSnapshot::default(), true, false)),
            vec![AbilityKind::BreathePoison]
        );
    }

    #[test]
    fn draconians_lose_breath_in_other_shapes() {
        let mut player = PlayerState::new(Species::WhiteDraconian, 8);
        player.form = Form::Spider;
        player.flags.insert(PlayerFlags::TRANSFORM_UNCANCELLABLE);
        assert!(offer(&mut player, &WorldSnapshot::default(), true, false).is_empty());

        player.form = Form::Dragon;
        assert_eq!(
            kinds(&offer(&mut player, &WorldSnapshot::default(), true, false)),
            vec![AbilityKind::BreatheFrost, AbilityKind::BreatheFire]
        );
    }

    #[test]
    fn confusion_hides_unsafe_talents() {
        let mut player = PlayerState::new(Species::Human, 5);
        player.mutations.set(Mutation::Blink, 1);
        player.form = Form::Statue;
        player.durations.set(DurationKind::Confusion, 30);

        let offered = kinds(&offer(&mut player, &WorldSnapshot::default(), true, false));
        assert_eq!(offered, vec![AbilityKind::EndTransformation]);

        let offered = kinds(&offer(&mut player, &WorldSnapshot::default(), false, false));
        assert_eq!(offered, vec![AbilityKind::EndTransformation, AbilityKind::Blink]);
    }

    #[test]
    fn faith_comes_last_and_silence_cuts_it() {
        let mut player = PlayerState::new(Species::Human, 10);
        player.religion = Religion::worshipping(God::Trog, 80);
        player.mutations.set(Mutation::HurlHellfire, 1);

        let offered = offer(&mut player, &WorldSnapshot::default(), true, false);
        assert_eq!(offered[0].kind, AbilityKind::Hellfire);
        assert!(offered[1..].iter().all(|talent| talent.invocation || talent.kind == AbilityKind::RenounceReligion));
        assert!(kinds(&offered).contains(&AbilityKind::TrogRegenMr));

        let silent = WorldSnapshot {
            silenced: true,
            ..WorldSnapshot::default()
        };
        assert_eq!(kinds(&offer(&mut player, &silent, true, false)), vec![AbilityKind::Hellfire]);
        assert!(kinds(&offer(&mut player, &silent, true, true)).contains(&AbilityKind::RenounceReligion));
    }

    #[test]
    fn no_artifice_blocks_items() {
        let mut player = PlayerState::new(Species::Human, 5);
        player.evokables = Evokables::BLINK | Evokables::FOG | Evokables::FLIGHT;
        assert_eq!(offer(&mut player, &WorldSnapshot::default(), true, false).len(), 3);
        player.mutations.set(Mutation::NoArtifice, 1);
        assert!(offer(&mut player, &WorldSnapshot::default(), true, false).is_empty());
    }

    #[test]
    fn offered_slots_never_collide() {
        let mut player = PlayerState::new(Species::RedDraconian, 14);
        player.religion = Religion::worshipping(God::Makhleb, 160);
        player.mutations.set(Mutation::Blink, 1);
        player.mutations.set(Mutation::HurlHellfire, 1);
        player.evokables = Evokables::all();
        player.slots.set(SlotKey::from_letter('a').unwrap(), AbilityKind::Hellfire);

        let offered = offer(&mut player, &WorldSnapshot::default(), true, false);
        let slots: Vec<_> = offered.iter().filter_map(|talent| talent.slot).collect();
        let unique: BTreeSet<_> = slots.iter().copied().collect();
        assert_eq!(slots.len(), offered.len());
        assert_eq!(unique.len(), slots.len());
        assert_eq!(offered.iter().find(|t| t.kind == AbilityKind::Hellfire).and_then(|t| t.slot), SlotKey::from_letter('a'));
    }
}
