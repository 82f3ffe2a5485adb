use std::io::Cursor;

use talent_client::{Content, LinePrompt, PietyPolicy, run_session};
use talent_content::ContentFactory;
use talent_core::{
    AbilityKind, DurationKind, Env, PcgRng, PlayerState, ScriptedPrompts, SlotKey, TalentEngine,
};

fn content() -> Content {
    Content::load(&ContentFactory::bundled(), "quiet").unwrap()
}

fn trog() -> PlayerState {
    ContentFactory::bundled()
        .load_character("trog_berserker")
        .unwrap()
}

/// Letter the player's first listing binds to `kind`.
fn letter_of(content: &Content, player: &mut PlayerState, kind: AbilityKind) -> char {
    let prompts = ScriptedPrompts::new();
    let env = Env::with_all(
        &content.abilities,
        &content.world,
        &prompts,
        &content.config,
        &PcgRng,
        &content.policy,
    )
    .into_talent_env();
    TalentEngine::new(player)
        .offered_talents(&env, true, false)
        .unwrap()
        .into_iter()
        .find(|talent| talent.kind == kind)
        .and_then(|talent| talent.slot)
        .map(SlotKey::letter)
        .unwrap()
}

fn play(content: &Content, player: &mut PlayerState, input: &str) -> String {
    let prompt = LinePrompt::new(Cursor::new(input.to_owned()), Vec::new());
    run_session(content, player, &prompt).unwrap();
    String::from_utf8(prompt.into_output()).unwrap()
}

#[test]
fn session_lists_and_uses_talents() {
    let content = content();
    let mut player = trog();
    let berserk = letter_of(&content, &mut player, AbilityKind::TrogBerserk);

    let output = play(&content, &mut player, &format!("{berserk}\nquit\n"));
    assert!(output.contains("Berserk"));
    assert!(output.contains("go berserk"));
    assert!(player.durations.is_active(DurationKind::Berserk));
    assert_eq!(player.counters.invocations, 1);
}

#[test]
fn describe_and_swap_do_not_spend_turns() {
    let content = content();
    let mut player = trog();
    let berserk = letter_of(&content, &mut player, AbilityKind::TrogBerserk);
    let target = if berserk == 'Z' { 'Y' } else { 'Z' };
    let nonce = player.nonce;

    let output = play(
        &content,
        &mut player,
        &format!("?{berserk}\n={berserk}{target}\n"),
    );
    assert!(output.contains("Berserk"));
    assert_eq!(player.nonce, nonce);

    let moved = SlotKey::from_letter(target).unwrap();
    assert_eq!(player.slots.get(moved), AbilityKind::TrogBerserk);
}

#[test]
fn bad_input_is_reported_and_ignored() {
    let content = content();
    let mut player = trog();
    letter_of(&content, &mut player, AbilityKind::TrogBerserk);
    let nonce = player.nonce;
    let unused = SlotKey::all()
        .rev()
        .find(|slot| player.slots.is_empty(*slot))
        .map(SlotKey::letter)
        .unwrap();

    let output = play(&content, &mut player, &format!("dance\n7\n{unused}\n"));
    assert!(output.contains("unknown command 'dance'"));
    assert!(output.contains("'7' is not an ability letter"));
    assert!(output.contains("You don't have that ability."));
    assert_eq!(player.nonce, nonce);
}

#[test]
fn policy_follows_configuration() {
    let content = content();
    assert!(matches!(content.policy, PietyPolicy::Standard(_)));
}
