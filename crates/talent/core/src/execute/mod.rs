//! Attempt pipeline: final checks, failure roll, effect, settlement.
//!
//! [`attempt`] is the single entry point. It re-validates the talent, rolls
//! for failure, dispatches to the identity's effect handler and settles costs
//! for every outcome that took a turn. Aborted attempts leave the player
//! untouched apart from the messages they report.
mod context;
mod events;
mod handlers;
mod settle;

pub use context::{EffectContext, Halt};
pub use events::AbilityEvent;
pub use settle::ChargedCosts;

use crate::ability::{AbilityDef, AbilityFlags, AbilityKind};
use crate::check::{Refusal, berserk_refusal, can_attempt};
use crate::env::{Dice, OracleError, TalentEnv};
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::{HungerState, PlayerState};
use crate::talent::Talent;

/// Abilities still usable while starving.
const STARVATION_EXEMPT: &[AbilityKind] = &[
    AbilityKind::RenounceReligion,
    AbilityKind::ConvertToBeogh,
    AbilityKind::StopFlying,
    AbilityKind::EvokeTurnVisible,
    AbilityKind::EndTransformation,
    AbilityKind::DelayedFireball,
    AbilityKind::StopSinging,
    AbilityKind::MummyRestoration,
    AbilityKind::TranBat,
    AbilityKind::AshenzariEndTransfer,
];

/// How an attempt ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// The effect happened.
    Succeeded,
    /// The failure roll came up; the turn and the costs are spent.
    Failed,
    /// Nothing happened and no turn passed.
    Aborted,
}

/// Time an attempt consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnCost {
    None,
    Normal,
    /// Costs were paid but the action takes no game time.
    Instant,
}

/// Everything an attempt did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptReport {
    pub ability: AbilityKind,
    pub outcome: Outcome,
    /// Why the attempt was aborted, when it was.
    pub refusal: Option<Refusal>,
    pub charged: ChargedCosts,
    pub turn: TurnCost,
    pub messages: Vec<String>,
    pub events: Vec<AbilityEvent>,
}

impl AttemptReport {
    fn aborted(ability: AbilityKind, refusal: Refusal, mut messages: Vec<String>) -> Self {
        messages.push(refusal.to_string());
        Self {
            ability,
            outcome: Outcome::Aborted,
            refusal: Some(refusal),
            charged: ChargedCosts::default(),
            turn: TurnCost::None,
            messages,
            events: Vec::new(),
        }
    }

    /// Whether the host should advance the clock.
    pub fn turn_spent(&self) -> bool {
        self.outcome != Outcome::Aborted
    }
}

/// Errors that stop an attempt without a meaningful outcome.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttemptError {
    #[error("no effect handler for {kind}")]
    NoHandler {
        kind: AbilityKind,
        context: ErrorContext,
    },

    #[error("{kind} ignored a failed roll without a hostile fallback")]
    IgnoredFailure {
        kind: AbilityKind,
        context: ErrorContext,
    },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for AttemptError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::IgnoredFailure { .. } => ErrorSeverity::Internal,
            Self::NoHandler { .. } | Self::Oracle(_) => ErrorSeverity::Fatal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::NoHandler { context, .. } | Self::IgnoredFailure { context, .. } => Some(context),
            Self::Oracle(_) => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoHandler { .. } => "ATTEMPT_NO_HANDLER",
            Self::IgnoredFailure { .. } => "ATTEMPT_IGNORED_FAILURE",
            Self::Oracle(err) => err.error_code(),
        }
    }
}

/// Splits a refusal into an abort or a hard error.
fn refuse(ability: AbilityKind, refusal: Refusal) -> Result<AttemptReport, AttemptError> {
    match refusal {
        Refusal::Oracle(err) => Err(err.into()),
        refusal => {
            tracing::debug!(%ability, reason = %refusal, "ability attempt refused");
            Ok(AttemptReport::aborted(ability, refusal, Vec::new()))
        }
    }
}

/// Situational refusals checked before the general preconditions.
fn pre_check(player: &PlayerState, env: &TalentEnv<'_>, def: &AbilityDef) -> Result<(), Refusal> {
    let world = env.world()?;
    let kind = def.kind;

    if player.is_berserk() {
        return Err(Refusal::Berserk);
    }

    if world.deadly_terrain_below() {
        match kind {
            AbilityKind::StopFlying => {
                return Err(Refusal::DangerousTerrain {
                    action: "Stopping flight",
                });
            }
            AbilityKind::EndTransformation if player.form.changes_physically() => {
                return Err(Refusal::DangerousTerrain {
                    action: "Turning back",
                });
            }
            _ => {}
        }
    }

    if matches!(kind, AbilityKind::EvokeBerserk | AbilityKind::TrogBerserk) {
        if let Some(reason) = berserk_refusal(player) {
            return Err(Refusal::condition(reason));
        }
    }

    if matches!(
        kind,
        AbilityKind::EvokeFlight | AbilityKind::TranBat | AbilityKind::Fly
    ) && (world.flight_forbidden() || player.form.forbids_flight())
    {
        return Err(Refusal::FlightForbidden);
    }

    if player.eats()
        && player.hunger_state() == HungerState::Starving
        && !STARVATION_EXEMPT.contains(&kind)
    {
        return Err(Refusal::Starving);
    }

    Ok(())
}

/// Resource sufficiency: current magic covers the cost and the hit point cost
/// leaves the player alive.
fn check_pools(player: &PlayerState, def: &AbilityDef) -> Result<(), Refusal> {
    if def.mp_cost > 0 && player.mp.current < def.mp_cost {
        return Err(Refusal::NotEnoughMp);
    }
    let hp_cost = def.hp_cost.cost(player.hp.max);
    if hp_cost > 0 && player.hp.current <= hp_cost {
        return Err(Refusal::NotEnoughHp);
    }
    Ok(())
}

/// Attempts `talent` for `player`.
///
/// Refusals, declined prompts and cancelled targets produce an
/// [`Outcome::Aborted`] report with nothing charged. Succeeded and failed
/// attempts settle every cost exactly once and advance the roll nonce.
///
/// # Errors
///
/// Missing oracles, abilities without an effect handler, and handlers that
/// ignore a failed roll without a hostile fallback.
pub fn attempt(
    player: &mut PlayerState,
    env: &TalentEnv<'_>,
    talent: &Talent,
) -> Result<AttemptReport, AttemptError> {
    let def = env.abilities()?.ability(talent.kind);
    let kind = def.kind;
    let context = ErrorContext::new(player.nonce)
        .with_ability(kind)
        .with_slot(talent.slot);

    if let Err(refusal) = pre_check(player, env, def)
        .and_then(|()| can_attempt(player, env, kind, true, false))
        .and_then(|()| check_pools(player, def))
    {
        return refuse(kind, refusal);
    }

    let handler = handlers::handler(kind).ok_or(AttemptError::NoHandler {
        kind,
        context: context.clone(),
    })?;
    let policy = env.policy()?;
    let mut dice = Dice::new(env.rng()?, player.game_seed, player.nonce);

    let roll = dice.random2avg(100, 3);
    let failed = roll < talent.fail;
    tracing::debug!(ability = %kind, roll, fail = talent.fail, failed, "rolled for failure");

    let mut ctx = EffectContext::new(player, env, def, &mut dice, failed);
    let result = handler(&mut ctx);
    let (mut messages, events) = ctx.finish();

    let outcome = match result {
        Ok(()) if failed && !def.has(AbilityFlags::HOSTILE) => {
            tracing::warn!(ability = %kind, "handler ignored a failed roll");
            return Err(AttemptError::IgnoredFailure { kind, context });
        }
        Ok(()) => Outcome::Succeeded,
        Err(Halt::Fail) => {
            messages.push("You fail to use your ability.".to_owned());
            Outcome::Failed
        }
        Err(Halt::Abort(Refusal::Oracle(err))) => return Err(err.into()),
        Err(Halt::Abort(refusal)) => {
            tracing::debug!(ability = %kind, reason = %refusal, "ability aborted mid-effect");
            return Ok(AttemptReport::aborted(kind, refusal, messages));
        }
    };

    let charged = settle::settle_costs(player, def, policy, &mut dice);

    if outcome == Outcome::Succeeded {
        player.counters.record(kind, def.invocation);
        if let Some(skill) = def.failure.trained_skill() {
            let practice = 1 + dice.random2(3);
            player.skills.exercise(skill, practice.unsigned_abs());
        }
    }

    player.nonce += 1;

    let turn = if def.has(AbilityFlags::INSTANT) {
        TurnCost::Instant
    } else {
        TurnCost::Normal
    };

    tracing::info!(ability = %kind, %outcome, nonce = player.nonce, "ability attempt resolved");

    Ok(AttemptReport {
        ability: kind,
        outcome,
        refusal: None,
        charged,
        turn,
        messages,
        events,
    })
}
