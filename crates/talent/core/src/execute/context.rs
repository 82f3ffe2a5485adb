//! Effect execution context.
//!
//! Handlers receive an [`EffectContext`] holding the player, the oracles, the
//! roll stream and the pending failure roll. They stop early by returning a
//! [`Halt`].

use crate::ability::{AbilityDef, AbilityKind};
use crate::check::Refusal;
use crate::env::{Dice, OracleError, Target, TalentEnv, TargetRequest};
use crate::execute::AbilityEvent;
use crate::state::{PlayerState, Skill};

/// Early exit from an effect handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Halt {
    /// The failure roll came up: costs are paid, nothing happens.
    Fail,
    /// Nothing happened and no turn passes.
    Abort(Refusal),
}

impl From<Refusal> for Halt {
    fn from(refusal: Refusal) -> Self {
        Self::Abort(refusal)
    }
}

impl From<OracleError> for Halt {
    fn from(err: OracleError) -> Self {
        Self::Abort(Refusal::Oracle(err))
    }
}

/// Context for one ability's effect.
pub struct EffectContext<'a, 'e> {
    /// Mutable player state.
    pub player: &'a mut PlayerState,

    /// Environment oracles.
    pub env: &'a TalentEnv<'e>,

    /// Definition of the ability being resolved.
    pub def: &'e AbilityDef,

    /// Roll stream for this attempt, shared with cost settlement.
    pub dice: &'a mut Dice<'e>,

    failed: bool,
    messages: Vec<String>,
    events: Vec<AbilityEvent>,
}

impl<'a, 'e> EffectContext<'a, 'e> {
    pub fn new(
        player: &'a mut PlayerState,
        env: &'a TalentEnv<'e>,
        def: &'e AbilityDef,
        dice: &'a mut Dice<'e>,
        failed: bool,
    ) -> Self {
        Self {
            player,
            env,
            def,
            dice,
            failed,
            messages: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn ability(&self) -> AbilityKind {
        self.def.kind
    }

    /// Whether the failure roll came up, for handlers that act either way.
    pub fn roll_failed(&self) -> bool {
        self.failed
    }

    /// Stops the handler when the failure roll came up.
    ///
    /// Every prompt that may cancel must come before this call.
    pub fn fail_check(&self) -> Result<(), Halt> {
        if self.failed {
            tracing::debug!(ability = %self.def.kind, "failure roll halted ability");
            Err(Halt::Fail)
        } else {
            Ok(())
        }
    }

    pub fn say(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn emit(&mut self, event: AbilityEvent) {
        self.events.push(event);
    }

    /// Asks a yes/no question; a "no" aborts the attempt.
    pub fn confirm(&self, question: &str) -> Result<(), Halt> {
        if self.env.prompt()?.confirm(question) {
            Ok(())
        } else {
            Err(Halt::Abort(Refusal::Declined))
        }
    }

    /// Asks for a target; cancelling aborts the attempt.
    pub fn target(&self, range: i32, needs_monster: bool) -> Result<Target, Halt> {
        let request = TargetRequest {
            ability: self.def.kind,
            range,
            needs_monster,
        };
        self.env
            .prompt()?
            .choose_target(&request)
            .ok_or(Halt::Abort(Refusal::Cancelled))
    }

    /// Asks the player to pick one of `options`; cancelling aborts the attempt.
    pub fn choose(&self, title: &str, options: &[String]) -> Result<usize, Halt> {
        self.env
            .prompt()?
            .choose_item(title, options)
            .filter(|index| *index < options.len())
            .ok_or(Halt::Abort(Refusal::Cancelled))
    }

    /// Skill level scaled by `multiplier`.
    pub fn skill(&self, skill: Skill, multiplier: i32) -> i32 {
        self.player.skill(skill, multiplier)
    }

    /// `skill * numerator / denominator` with random rounding.
    pub fn skill_rdiv(&mut self, skill: Skill, numerator: i32, denominator: i32) -> i32 {
        let tenths = self.player.skills.level_tenths(skill);
        self.dice.div_rand_round(tenths * numerator, denominator * 10)
    }

    pub(crate) fn finish(self) -> (Vec<String>, Vec<AbilityEvent>) {
        (self.messages, self.events)
    }
}
