//! Faith-independent actions and the shared berserk effect.

use crate::ability::AbilityKind;
use crate::check::{Refusal, berserk_refusal};
use crate::execute::handlers::Handler;
use crate::execute::{AbilityEvent, EffectContext, Halt};
use crate::state::{DurationKind, God, Religion};

/// Piety a fresh convert starts with.
const CONVERT_PIETY: i32 = 15;

pub(super) const HANDLERS: &[(AbilityKind, Handler)] = &[
    (AbilityKind::None, no_ability),
    (AbilityKind::StopRecall, stop_recall),
    (AbilityKind::RenounceReligion, renounce_religion),
    (AbilityKind::ConvertToBeogh, convert_to_beogh),
];

/// Unknown identities resolve to the sentinel; nothing happens and no turn passes.
fn no_ability(_ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    Err(Refusal::condition("Sorry, you can't do that.").into())
}

/// Sends the player into a berserk rage.
pub(super) fn go_berserk(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    if let Some(reason) = berserk_refusal(ctx.player) {
        return Err(Refusal::condition(reason).into());
    }
    let duration = 10 + ctx.dice.random2avg(19, 2);
    ctx.player.durations.set(DurationKind::Berserk, duration);
    ctx.say("A red film seems to cover your vision as you go berserk!");
    Ok(())
}

fn stop_recall(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    ctx.player.recall_list.clear();
    ctx.say("You stop recalling your allies.");
    ctx.emit(AbilityEvent::RecallStopped);
    Ok(())
}

fn renounce_religion(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    ctx.confirm("Really renounce your faith, foregoing its fabulous benefits?")?;
    ctx.confirm("Are you sure you won't change your mind later?")?;

    let from = ctx.player.religion.god;
    ctx.player.religion = Religion::default();
    ctx.player.recall_list.clear();
    ctx.say(format!("You have lost your religion! {} is displeased.", from.title()));
    ctx.emit(AbilityEvent::FaithChanged {
        from,
        to: God::NoGod,
    });
    Ok(())
}

fn convert_to_beogh(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    if !ctx.env.world()?.beogh_conversion_offered() {
        return Err(Refusal::condition("Beogh does not call to you.").into());
    }
    ctx.confirm("Do you wish to join the Orcish Church of Beogh?")?;

    let from = ctx.player.religion.god;
    ctx.player.religion = Religion::worshipping(God::Beogh, CONVERT_PIETY);
    ctx.say("You are now a follower of Beogh.");
    ctx.emit(AbilityEvent::FaithChanged {
        from,
        to: God::Beogh,
    });
    Ok(())
}
