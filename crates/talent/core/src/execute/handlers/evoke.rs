//! Item-granted abilities and leaving a transformation.

use crate::ability::AbilityKind;
use crate::check::Refusal;
use crate::execute::handlers::{Handler, general, innate};
use crate::execute::{AbilityEvent, EffectContext, Halt};
use crate::state::{DurationKind, Form, ItemClass, PlayerFlags, Skill};

pub(super) const HANDLERS: &[(AbilityKind, Handler)] = &[
    (AbilityKind::EvokeBlink, evoke_blink),
    (AbilityKind::Recharging, recharge),
    (AbilityKind::EvokeBerserk, evoke_berserk),
    (AbilityKind::EvokeTurnInvisible, turn_invisible),
    (AbilityKind::EvokeTurnVisible, turn_visible),
    (AbilityKind::EvokeFlight, evoke_flight),
    (AbilityKind::EvokeFog, fog),
    (AbilityKind::EndTransformation, end_transformation),
];

const SMOKE: &[&str] = &["black smoke", "grey smoke", "blue smoke", "purple smoke"];

fn evoke_blink(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    innate::blink(ctx)
}

fn recharge(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let wands: Vec<(usize, String)> = ctx
        .player
        .items_of(ItemClass::Wand)
        .map(|(index, item)| (index, item.name.clone()))
        .collect();
    if wands.is_empty() {
        return Err(Refusal::condition("You have nothing to recharge.").into());
    }

    let names: Vec<String> = wands.iter().map(|(_, name)| name.clone()).collect();
    let choice = ctx.choose("Charge which item?", &names)?;
    let Some((index, name)) = wands.get(choice).cloned() else {
        return Err(Refusal::Cancelled.into());
    };

    let level = ctx.player.experience_level;
    let gained = 3 + ctx.dice.random2(level / 3 + 3);
    if let Some(wand) = ctx.player.inventory.get_mut(index) {
        wand.charges += gained;
    }
    ctx.say(format!("{name} glows for a moment."));
    ctx.emit(AbilityEvent::ItemChanged {
        ability: ctx.ability(),
        item: index,
        brand: None,
    });
    Ok(())
}

fn evoke_berserk(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    general::go_berserk(ctx)
}

fn turn_invisible(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let power = ctx.skill(Skill::Evocations, 2) + 5;
    let amount = 15 + ctx.dice.random2(power);
    let visible = !ctx.player.durations.is_active(DurationKind::Invisibility);
    ctx.player
        .durations
        .increase(DurationKind::Invisibility, amount, Some(100));
    ctx.say(if visible {
        "You fade into invisibility!"
    } else {
        "You feel more transparent."
    });
    Ok(())
}

fn turn_visible(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    if ctx.player.flags.contains(PlayerFlags::INVIS_UNCANCELLABLE) {
        return Err(Refusal::condition("You cannot turn visible right now.").into());
    }
    ctx.player.durations.set(DurationKind::Invisibility, 1);
    ctx.say("You feel less transparent.");
    Ok(())
}

fn evoke_flight(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let power = ctx.skill(Skill::Evocations, 2) + 30;
    innate::take_flight(ctx, power);
    Ok(())
}

fn fog(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let kind = ctx.dice.choose(SMOKE).copied().unwrap_or("black smoke");
    let duration = 8 + ctx.dice.random2(8);
    ctx.say("With a swish of your cloak, you release a cloud of fog.");
    ctx.emit(AbilityEvent::Cloud {
        kind,
        size: 50,
        duration,
    });
    Ok(())
}

fn end_transformation(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    if ctx.player.flags.contains(PlayerFlags::TRANSFORM_UNCANCELLABLE) {
        return Err(Refusal::condition("You cannot end this transformation.").into());
    }
    ctx.player.form = Form::Normal;
    ctx.player.durations.clear(DurationKind::Transformation);
    ctx.say("Your transformation has ended.");
    Ok(())
}
