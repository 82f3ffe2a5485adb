//! Hotkey slot assignment.
//!
//! A talent keeps the letter it was first given. New talents claim the first
//! free letter from their preferred start, then the configured slot rules may
//! move them to a favourite letter.

use crate::ability::AbilityKind;
use crate::config::SlotRule;
use crate::env::{AbilityOracle, ConfigOracle, WorldOracle};
use crate::state::{PlayerState, SlotKey, SlotTable, Species};
use crate::talent::redirect;

/// Slot already bound to `ability`.
///
/// Table entries are redirected before comparing, so a slot holding a
/// placeholder is found by the action it currently stands for.
pub fn lookup_slot(
    player: &PlayerState,
    world: &dyn WorldOracle,
    ability: AbilityKind,
) -> Option<SlotKey> {
    if ability.is_none() {
        return None;
    }
    player
        .slots
        .bound()
        .find(|(_, entry)| redirect(*entry, player, world) == ability)
        .map(|(slot, _)| slot)
}

fn letter_index(letter: char) -> usize {
    SlotKey::from_letter(letter).map_or(0, SlotKey::index)
}

/// Letter a new `ability` starts searching from.
fn first_slot(
    player: &PlayerState,
    config: &dyn ConfigOracle,
    ability: AbilityKind,
    invocation: bool,
) -> usize {
    use AbilityKind::*;

    let fixed = match ability {
        ElyvilonLifesaving => Some('p'),
        KikuGiftNecronomicon => Some('N'),
        ZinCureAllMutations | TsoBlessWeapon | KikuBlessWeapon | LugonuBlessWeapon => Some('W'),
        ConvertToBeogh => Some('Y'),
        RuRejectSacrifices => Some('G'),
        kind if kind.is_ru_sacrifice() => Some('G'),
        _ => Option::None,
    };
    if let Some(letter) = fixed {
        return letter_index(letter);
    }

    let letter = if invocation {
        config.invocation_first_slot()
    } else {
        config.first_slot()
    };
    let mut first = letter_index(letter);
    // Base draconians keep `f` free for the breath they grow into.
    if player.species == Species::BaseDraconian && first >= letter_index('f') {
        first += 1;
    }
    first.min(SlotKey::all().count() - 1)
}

/// Returns the slot for `ability`, claiming a free one if it has none.
///
/// Returns `None` when every letter is taken.
pub fn find_slot(
    player: &mut PlayerState,
    abilities: &dyn AbilityOracle,
    config: &dyn ConfigOracle,
    world: &dyn WorldOracle,
    ability: AbilityKind,
    invocation: bool,
) -> Option<SlotKey> {
    if let Some(slot) = lookup_slot(player, world, ability) {
        return Some(slot);
    }

    let first = first_slot(player, config, ability, invocation);
    let table = &mut player.slots;
    let free = SlotKey::all()
        .skip(first)
        .chain(SlotKey::all().take(first).rev())
        .find(|slot| table.is_empty(*slot))?;

    table.set(free, ability);
    let slot = auto_assign(table, free, config.slot_rules(), abilities);
    tracing::debug!(%ability, slot = %slot, "claimed ability slot");
    Some(slot)
}

/// Moves the ability in `slot` to the first letter its rules prefer.
///
/// A letter is taken when it is empty or already holds the ability. After a
/// `+` an occupied letter is taken too, swapping its occupant into `slot`,
/// unless that occupant matches the same rule. Returns the final slot.
pub fn auto_assign(
    table: &mut SlotTable,
    slot: SlotKey,
    rules: &[SlotRule],
    abilities: &dyn AbilityOracle,
) -> SlotKey {
    let ability = table.get(slot);
    let name = abilities.ability(ability).name.to_lowercase();

    for rule in rules.iter().filter(|rule| rule.pattern.matches(&name)) {
        for choice in rule.choices() {
            let occupant = table.get(choice.slot);
            if occupant.is_none() || occupant == ability {
                table.set(choice.slot, ability);
                if choice.slot != slot {
                    table.clear(slot);
                }
                return choice.slot;
            }
            if choice.overwrite {
                let occupant_name = abilities.ability(occupant).name.to_lowercase();
                if rule.pattern.matches(&occupant_name) {
                    continue;
                }
                table.swap(slot, choice.slot);
                return choice.slot;
            }
        }
    }
    slot
}

/// Exchanges two letters' bindings.
pub fn swap_slots(table: &mut SlotTable, a: SlotKey, b: SlotKey) {
    table.swap(a, b);
    tracing::debug!(first = %a, second = %b, "swapped ability slots");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityDef, AbilityRegistry};
    use crate::config::TalentConfig;
    use crate::env::WorldSnapshot;

    fn registry() -> AbilityRegistry {
        AbilityRegistry::new(vec![
            AbilityDef::sentinel(),
            AbilityDef::new(AbilityKind::Fly, "Fly"),
            AbilityDef::new(AbilityKind::BreatheFire, "Breathe Fire"),
            AbilityDef::new(AbilityKind::BreatheSteam, "Breathe Steam"),
            AbilityDef::new(AbilityKind::Hellfire, "Hurl Hellfire"),
            AbilityDef::new(AbilityKind::ConvertToBeogh, "Convert to Beogh"),
            AbilityDef::new(AbilityKind::TrogBerserk, "Berserk").invocation(),
        ])
        .unwrap()
    }

    fn key(letter: char) -> SlotKey {
        SlotKey::from_letter(letter).unwrap()
    }

    #[test]
    fn new_abilities_start_at_f_and_invocations_at_a() {
        let registry = registry();
        let config = TalentConfig::default();
        let world = WorldSnapshot::default();
        let mut player = PlayerState::new(Species::Human, 5);

        let fly = find_slot(&mut player, &registry, &config, &world, AbilityKind::Fly, false);
        let rage = find_slot(&mut player, &registry, &config, &world, AbilityKind::TrogBerserk, true);
        assert_eq!(fly, Some(key('f')));
        assert_eq!(rage, Some(key('a')));

        let again = find_slot(&mut player, &registry, &config, &world, AbilityKind::Fly, false);
        assert_eq!(again, Some(key('f')));
    }

    #[test]
    fn base_draconians_skip_f() {
        let registry = registry();
        let config = TalentConfig::default();
        let world = WorldSnapshot::default();
        let mut player = PlayerState::new(Species::BaseDraconian, 5);
        let slot = find_slot(&mut player, &registry, &config, &world, AbilityKind::Fly, false);
        assert_eq!(slot, Some(key('g')));
    }

    #[test]
    fn overrides_pick_their_own_letter() {
        let registry = registry();
        let config = TalentConfig::default();
        let world = WorldSnapshot::default();
        let mut player = PlayerState::new(Species::HillOrc, 5);
        let slot = find_slot(
            &mut player,
            &registry,
            &config,
            &world,
            AbilityKind::ConvertToBeogh,
            false,
        );
        assert_eq!(slot, Some(key('Y')));
    }

    #[test]
    fn search_wraps_backwards_below_first() {
        let registry = registry();
        let config = TalentConfig::default();
        let world = WorldSnapshot::default();
        let mut player = PlayerState::new(Species::Human, 5);
        for slot in SlotKey::all().skip(5) {
            player.slots.set(slot, AbilityKind::Hellfire);
        }
        let slot = find_slot(&mut player, &registry, &config, &world, AbilityKind::Fly, false);
        assert_eq!(slot, Some(key('e')));
    }

    #[test]
    fn full_table_yields_no_slot() {
        let registry = registry();
        let config = TalentConfig::default();
        let world = WorldSnapshot::default();
        let mut player = PlayerState::new(Species::Human, 5);
        for slot in SlotKey::all() {
            player.slots.set(slot, AbilityKind::Hellfire);
        }
        let slot = find_slot(&mut player, &registry, &config, &world, AbilityKind::Fly, false);
        assert_eq!(slot, None);
    }

    #[test]
    fn rules_move_to_free_preferred_letter() {
        let registry = registry();
        let config = TalentConfig::default()
            .with_slot_rule("^breathe", "zZ")
            .unwrap();
        let world = WorldSnapshot::default();
        let mut player = PlayerState::new(Species::RedDraconian, 5);

        let fire = find_slot(&mut player, &registry, &config, &world, AbilityKind::BreatheFire, false);
        let steam = find_slot(&mut player, &registry, &config, &world, AbilityKind::BreatheSteam, false);
        assert_eq!(fire, Some(key('z')));
        assert_eq!(steam, Some(key('Z')));
        assert!(player.slots.is_empty(key('f')));
    }

    #[test]
    fn overwrite_swaps_unrelated_occupant() {
        let registry = registry();
        let rules = vec![SlotRule::new("fly", "+a").unwrap()];
        let mut table = SlotTable::new();
        table.set(key('a'), AbilityKind::Hellfire);
        table.set(key('f'), AbilityKind::Fly);

        assert_eq!(auto_assign(&mut table, key('f'), &rules, &registry), key('a'));
        assert_eq!(table.get(key('a')), AbilityKind::Fly);
        assert_eq!(table.get(key('f')), AbilityKind::Hellfire);
    }

    #[test]
    fn overwrite_spares_occupant_of_same_rule() {
        let registry = registry();
        let rules = vec![SlotRule::new("breathe", "+a").unwrap()];
        let mut table = SlotTable::new();
        table.set(key('a'), AbilityKind::BreatheFire);
        table.set(key('f'), AbilityKind::BreatheSteam);

        assert_eq!(auto_assign(&mut table, key('f'), &rules, &registry), key('f'));
        assert_eq!(table.get(key('a')), AbilityKind::BreatheFire);
    }

    #[test]
    fn redirected_entries_are_found() {
        let world = WorldSnapshot::default();
        let mut player = PlayerState::new(Species::HillOrc, 10);
        player.slots.set(key('c'), AbilityKind::BeoghRecallOrcishFollowers);
        player.recall_list.push("orc".into());
        assert_eq!(lookup_slot(&player, &world, AbilityKind::StopRecall), Some(key('c')));
        assert_eq!(lookup_slot(&player, &world, AbilityKind::None), None);
    }
}
