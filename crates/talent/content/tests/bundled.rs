use std::collections::BTreeSet;

use talent_content::{CharacterLoader, ContentFactory};
use talent_core::{
    AbilityKind, DurationKind, Env, FixedRng, Outcome, PcgRng, ScriptedPrompts, StandardCosts,
    TalentEngine, WorldSnapshot,
};
use tempfile::TempDir;

#[test]
fn bundled_characters_get_unique_slots() {
    let factory = ContentFactory::bundled();
    let registry = factory.load_abilities().unwrap();
    let config = factory.load_config().unwrap();
    let world = WorldSnapshot::default();
    let prompts = ScriptedPrompts::new();
    let env = Env::with_all(&registry, &world, &prompts, &config, &PcgRng, &StandardCosts)
        .into_talent_env();

    let names = factory.character_names().unwrap();
    assert!(names.contains(&"trog_berserker".to_owned()));

    for name in names {
        let mut player = factory.load_character(&name).unwrap();
        let offered = TalentEngine::new(&mut player)
            .offered_talents(&env, true, false)
            .unwrap();
        assert!(!offered.is_empty(), "{name} has nothing to use");

        let slots: Vec<_> = offered.iter().filter_map(|talent| talent.slot).collect();
        let unique: BTreeSet<_> = slots.iter().collect();
        assert_eq!(unique.len(), slots.len(), "{name} has duplicate slots");
    }
}

#[test]
fn configured_slot_rule_applies_to_bundled_content() {
    let factory = ContentFactory::bundled();
    let registry = factory.load_abilities().unwrap();
    let config = factory.load_config().unwrap();
    let world = WorldSnapshot::default();
    let prompts = ScriptedPrompts::new();
    let env = Env::with_all(&registry, &world, &prompts, &config, &PcgRng, &StandardCosts)
        .into_talent_env();

    let mut player = factory.load_character("makhleb_demonspawn").unwrap();
    let offered = TalentEngine::new(&mut player)
        .offered_talents(&env, true, false)
        .unwrap();
    let blink = offered
        .iter()
        .find(|talent| talent.kind == AbilityKind::EvokeBlink)
        .and_then(|talent| talent.slot)
        .map(|slot| slot.letter());
    assert_eq!(blink, Some('v'));
}

#[test]
fn trog_berserker_can_rage() {
    let factory = ContentFactory::bundled();
    let registry = factory.load_abilities().unwrap();
    let config = factory.load_config().unwrap();
    let world = WorldSnapshot::default();
    let prompts = ScriptedPrompts::new();
    let rng = FixedRng::new(99);
    let env =
        Env::with_all(&registry, &world, &prompts, &config, &rng, &StandardCosts).into_talent_env();

    let mut player = factory.load_character("trog_berserker").unwrap();
    let hunger = player.hunger;
    let mut engine = TalentEngine::new(&mut player);
    let berserk = engine.talent(&env, AbilityKind::TrogBerserk, true).unwrap();
    assert_eq!(berserk.fail, 0);
    assert!(berserk.invocation);

    let report = engine.attempt(&env, &berserk).unwrap();
    assert_eq!(report.outcome, Outcome::Succeeded);
    assert!(player.durations.is_active(DurationKind::Berserk));
    assert!(player.hunger < hunger);
    assert_eq!(player.counters.invocations, 1);
}

#[test]
fn characters_survive_a_save() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("characters")).unwrap();
    let factory = ContentFactory::new(dir.path());

    let mut player = ContentFactory::bundled().load_character("ru_tengu").unwrap();
    player.nonce = 12;
    factory.save_character("saved", &player).unwrap();

    assert_eq!(factory.character_names().unwrap(), vec!["saved".to_owned()]);
    assert_eq!(factory.load_character("saved").unwrap(), player);
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let factory = ContentFactory::new(dir.path());
    assert_eq!(factory.load_config().unwrap(), Default::default());
    assert!(factory.load_abilities().is_err());
}

#[test]
fn broken_sheet_names_the_problem() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.ron");
    std::fs::write(&path, "(species: Human, hp: (current: \"lots\"))").unwrap();

    let err = CharacterLoader::load(&path).unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse character RON"), "{err}");
}

#[test]
fn silenced_world_keeps_ru_sacrifices() {
    let factory = ContentFactory::bundled();
    let registry = factory.load_abilities().unwrap();
    let config = factory.load_config().unwrap();
    let world = factory.load_world("silenced").unwrap();
    assert!(world.silenced);
    let prompts = ScriptedPrompts::new();
    let env = Env::with_all(&registry, &world, &prompts, &config, &PcgRng, &StandardCosts)
        .into_talent_env();

    let mut player = factory.load_character("ru_tengu").unwrap();
    let kinds: Vec<_> = TalentEngine::new(&mut player)
        .offered_talents(&env, true, false)
        .unwrap()
        .into_iter()
        .map(|talent| talent.kind)
        .collect();
    assert!(kinds.contains(&AbilityKind::RuSacrificeWords));
    assert!(kinds.contains(&AbilityKind::RuSacrificeStealth));
    assert!(!kinds.contains(&AbilityKind::RenounceReligion));
}
