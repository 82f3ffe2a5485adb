//! Species, mutation and form abilities.

use crate::ability::AbilityKind;
use crate::check::Refusal;
use crate::execute::handlers::Handler;
use crate::execute::{AbilityEvent, EffectContext, Halt};
use crate::state::{DurationKind, Form, Mutation, PlayerFlags, Skill, Species};

pub(super) const HANDLERS: &[(AbilityKind, Handler)] = &[
    (AbilityKind::SpitPoison, spit_poison),
    (AbilityKind::Blink, blink),
    (AbilityKind::BreatheFire, breathe),
    (AbilityKind::BreatheFrost, breathe),
    (AbilityKind::BreathePoison, breathe),
    (AbilityKind::BreatheMephitic, breathe),
    (AbilityKind::BreatheLightning, breathe),
    (AbilityKind::BreathePower, breathe),
    (AbilityKind::BreatheStickyFlame, breathe),
    (AbilityKind::BreatheSteam, breathe),
    (AbilityKind::SpitAcid, breathe),
    (AbilityKind::TranBat, bat_form),
    (AbilityKind::Fly, fly),
    (AbilityKind::StopFlying, stop_flying),
    (AbilityKind::Hellfire, hellfire),
    (AbilityKind::DelayedFireball, delayed_fireball),
    (AbilityKind::StopSinging, stop_singing),
    (AbilityKind::MummyRestoration, restoration),
    (AbilityKind::Dig, dig),
    (AbilityKind::ShaftSelf, shaft_self),
];

fn breath_range(ability: AbilityKind) -> i32 {
    match ability {
        AbilityKind::BreatheFire | AbilityKind::BreatheFrost => 6,
        AbilityKind::BreatheMephitic | AbilityKind::BreatheSteam | AbilityKind::BreathePoison => 7,
        AbilityKind::BreatheStickyFlame => 1,
        _ => 8,
    }
}

/// Cooldown added by every breath.
fn breath_cooldown(ctx: &mut EffectContext<'_, '_>) -> i32 {
    let level = ctx.player.experience_level;
    3 + ctx.dice.random2(10) + ctx.dice.random2(30 - level)
}

fn spit_poison(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    let power = ctx.player.experience_level + ctx.player.mutations.level(Mutation::SpitPoison) * 5;
    let target = ctx.target(6, false)?;
    ctx.fail_check()?;

    ctx.say("You spit poison.");
    ctx.emit(AbilityEvent::Zap {
        ability: ctx.ability(),
        target,
        power,
        range: 6,
    });
    let cooldown = 3 + ctx.dice.random2(5);
    ctx.player.durations.set(DurationKind::BreathWeapon, cooldown);
    Ok(())
}

fn breathe(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    let ability = ctx.ability();
    let range = breath_range(ability);
    let target = if ability == AbilityKind::BreatheLightning {
        None
    } else {
        Some(ctx.target(range, false)?)
    };
    ctx.fail_check()?;

    let level = ctx.player.experience_level;
    let dragon = ctx.player.form == Form::Dragon;
    let power = match ability {
        AbilityKind::BreatheFire if dragon => level + 12,
        AbilityKind::BreatheFire | AbilityKind::BreathePoison => level,
        _ if dragon => 2 * level,
        _ => level,
    };

    let message = match ability {
        AbilityKind::BreatheFire if power < 15 => "You breathe a blast of fire.",
        AbilityKind::BreatheFire => "You breathe a blast of fire!",
        AbilityKind::BreatheFrost => "You exhale a wave of freezing cold.",
        AbilityKind::BreathePoison => "You exhale a blast of poison gas.",
        AbilityKind::BreatheLightning => "You breathe a wild blast of lightning!",
        AbilityKind::SpitAcid => "You spit a glob of acid.",
        AbilityKind::BreathePower => "You breathe a bolt of dispelling energy.",
        AbilityKind::BreatheStickyFlame => "You spit a glob of burning liquid.",
        AbilityKind::BreatheSteam => "You exhale a blast of scalding steam.",
        _ => "You exhale a blast of noxious fumes.",
    };
    ctx.say(message);

    match target {
        Some(target) => ctx.emit(AbilityEvent::Zap {
            ability,
            target,
            power,
            range,
        }),
        None => ctx.emit(AbilityEvent::Burst { ability, power }),
    }

    let cooldown = breath_cooldown(ctx);
    ctx.player
        .durations
        .increase(DurationKind::BreathWeapon, cooldown, None);
    if matches!(ability, AbilityKind::BreatheSteam | AbilityKind::SpitAcid) {
        let halved = ctx.player.durations.get(DurationKind::BreathWeapon) / 2;
        ctx.player.durations.set(DurationKind::BreathWeapon, halved);
    }
    Ok(())
}

/// Uncontrolled short-range teleport; the item version delegates here.
pub(super) fn blink(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    ctx.say("You blink.");
    ctx.emit(AbilityEvent::Teleport {
        ability: ctx.ability(),
        target: None,
    });
    Ok(())
}

fn bat_form(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    if ctx.player.form == Form::Bat {
        return Err(Refusal::condition("You are already a bat.").into());
    }
    ctx.player.form = Form::Bat;
    ctx.player.durations.set(DurationKind::Transformation, 100);
    ctx.say("You turn into a vampire bat.");
    Ok(())
}

/// Grants timed flight, capped at 100 auts.
pub(super) fn take_flight(ctx: &mut EffectContext<'_, '_>, power: i32) {
    let amount = 25 + ctx.dice.random2(power) + ctx.dice.random2(power);
    let standing = !ctx.player.airborne();
    ctx.player
        .durations
        .increase(DurationKind::Flight, amount, Some(100));
    ctx.say(if standing {
        "You fly up into the air."
    } else {
        "You feel more buoyant."
    });
}

fn fly(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    if ctx.player.racial_permanent_flight() {
        ctx.player.flags.insert(PlayerFlags::PERM_FLIGHT);
        ctx.say("You fly up into the air.");
    } else {
        let power = ctx.player.experience_level * 4;
        take_flight(ctx, power);
        ctx.player.flags.insert(PlayerFlags::FLIGHT_UNCANCELLABLE);
    }
    if ctx.player.species == Species::Tengu {
        ctx.say("You feel very comfortable in the air.");
    }
    Ok(())
}

/// Ends every source of flight at once.
pub(super) fn land(ctx: &mut EffectContext<'_, '_>) {
    ctx.player.durations.clear(DurationKind::Flight);
    ctx.player
        .flags
        .remove(PlayerFlags::PERM_FLIGHT | PlayerFlags::FLIGHT_UNCANCELLABLE);
    ctx.say("You float gracefully downwards.");
}

fn stop_flying(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    land(ctx);
    Ok(())
}

fn hellfire(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    let target = ctx.target(7, false)?;
    ctx.fail_check()?;
    let power = ctx.player.experience_level * 10;
    ctx.say("You hurl a blast of hellfire!");
    ctx.emit(AbilityEvent::Zap {
        ability: ctx.ability(),
        target,
        power,
        range: 7,
    });
    Ok(())
}

fn delayed_fireball(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    let target = ctx.target(5, false)?;
    ctx.fail_check()?;
    let power = (ctx.skill(Skill::Conjurations, 3) + ctx.skill(Skill::FireMagic, 3)) / 2
        + ctx.player.experience_level;

    // Only one may be stored, and releasing it spends it.
    ctx.player.flags.remove(PlayerFlags::DELAYED_FIREBALL);
    ctx.say("You release the fireball.");
    ctx.emit(AbilityEvent::Zap {
        ability: ctx.ability(),
        target,
        power,
        range: 5,
    });
    Ok(())
}

fn stop_singing(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    ctx.player.durations.clear(DurationKind::Singing);
    ctx.say("You stop singing.");
    Ok(())
}

fn restoration(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let drained = ctx.player.stats.is_drained();
    let rotted = ctx.player.hp.rotted;
    if !drained && rotted == 0 {
        return Err(Refusal::condition("Nothing appears to happen.").into());
    }

    ctx.say("You infuse your body with magical energy.");
    ctx.player.stats.restore();
    ctx.player.hp.max += rotted;
    ctx.player.hp.rotted = 0;
    Ok(())
}

fn dig(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    if ctx.player.flags.contains(PlayerFlags::DIGGING) {
        return Err(Refusal::condition("You are already prepared to dig.").into());
    }
    ctx.player.flags.insert(PlayerFlags::DIGGING);
    ctx.say("You extend your mandibles.");
    Ok(())
}

fn shaft_self(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    if !ctx.env.world()?.shaft_possible() {
        return Err(Refusal::condition("You can't shaft yourself here.").into());
    }
    ctx.confirm("Are you sure you want to shaft yourself?")?;
    ctx.say("You dig a shaft and fall through it.");
    ctx.emit(AbilityEvent::LevelChange {
        ability: ctx.ability(),
    });
    Ok(())
}
