//! Player-facing facade over the ability rules.
//!
//! The [`TalentEngine`] borrows the player's state for the duration of one
//! interaction and routes every query and attempt through the free functions
//! of [`crate::talent`], [`crate::check`] and [`crate::execute`]. All state
//! mutation goes through [`TalentEngine::attempt`], [`TalentEngine::offered_talents`]
//! (which claims slots) and [`TalentEngine::swap_slots`].

use crate::ability::{
    AbilityKind, describe_cost, describe_failure, detailed_cost_description,
};
use crate::check::{self, Refusal};
use crate::env::{OracleError, TalentEnv};
use crate::execute::{self, AttemptError, AttemptReport};
use crate::state::{PlayerState, SlotKey};
use crate::talent::{self, Talent};

/// Ability engine bound to one player.
pub struct TalentEngine<'a> {
    player: &'a mut PlayerState,
}

impl<'a> TalentEngine<'a> {
    /// Creates a new engine over the given player.
    pub fn new(player: &'a mut PlayerState) -> Self {
        Self { player }
    }

    pub fn player(&self) -> &PlayerState {
        self.player
    }

    /// Every talent the player may use now. See [`talent::offered_talents`].
    pub fn offered_talents(
        &mut self,
        env: &TalentEnv<'_>,
        suppress_if_impaired: bool,
        include_unusable: bool,
    ) -> Result<Vec<Talent>, OracleError> {
        talent::offered_talents(self.player, env, suppress_if_impaired, include_unusable)
    }

    pub fn talent(
        &self,
        env: &TalentEnv<'_>,
        ability: AbilityKind,
        check_confused: bool,
    ) -> Result<Talent, OracleError> {
        talent::talent(self.player, env, ability, check_confused)
    }

    /// Talent bound to `slot`, if any ability sits there.
    pub fn talent_in_slot(
        &self,
        env: &TalentEnv<'_>,
        slot: SlotKey,
    ) -> Result<Option<Talent>, OracleError> {
        let kind = self.player.slots.get(slot);
        if kind.is_none() {
            return Ok(None);
        }
        let talent = talent::talent(self.player, env, kind, true)?;
        Ok(Some(talent).filter(|talent| !talent.is_none()))
    }

    pub fn can_attempt(
        &self,
        env: &TalentEnv<'_>,
        ability: AbilityKind,
        require_consumable_margin: bool,
        silent: bool,
    ) -> Result<(), Refusal> {
        check::can_attempt(self.player, env, ability, require_consumable_margin, silent)
    }

    /// Attempts a talent and reports what happened.
    ///
    /// The nonce advances after every attempt that took a turn, so re-invoking
    /// the same talent rolls fresh numbers.
    pub fn attempt(
        &mut self,
        env: &TalentEnv<'_>,
        talent: &Talent,
    ) -> Result<AttemptReport, AttemptError> {
        execute::attempt(self.player, env, talent)
    }

    pub fn describe_talent(
        &self,
        env: &TalentEnv<'_>,
        talent: &Talent,
    ) -> Result<String, OracleError> {
        talent::describe_talent(self.player, env, talent)
    }

    pub fn describe_cost(
        &self,
        env: &TalentEnv<'_>,
        ability: AbilityKind,
    ) -> Result<String, OracleError> {
        Ok(describe_cost(env.abilities()?.ability(ability), self.player))
    }

    pub fn describe_failure(
        &self,
        env: &TalentEnv<'_>,
        ability: AbilityKind,
    ) -> Result<String, OracleError> {
        let percent = env.abilities()?.ability(ability).failure.percent(self.player);
        Ok(describe_failure(percent))
    }

    pub fn detailed_cost_description(
        &self,
        env: &TalentEnv<'_>,
        ability: AbilityKind,
    ) -> Result<String, OracleError> {
        Ok(detailed_cost_description(
            env.abilities()?.ability(ability),
            self.player,
        ))
    }

    pub fn swap_slots(&mut self, a: SlotKey, b: SlotKey) {
        talent::swap_slots(&mut self.player.slots, a, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityDef, AbilityFlags, AbilityRegistry, ScalingCost};
    use crate::config::TalentConfig;
    use crate::env::{Env, FixedRng, ScriptedPrompts, StandardCosts, WorldSnapshot};
    use crate::execute::Outcome;
    use crate::state::{DurationKind, Evokables, Species};

    fn registry() -> AbilityRegistry {
        AbilityRegistry::new(vec![
            AbilityDef::sentinel(),
            AbilityDef::new(AbilityKind::StopFlying, "Stop Flying")
                .with_flags(AbilityFlags::INSTANT | AbilityFlags::CONF_OK),
            AbilityDef::new(AbilityKind::Hellfire, "Hellfire").with_hp(ScalingCost::fixed(3)),
        ])
        .unwrap()
    }

    #[test]
    fn slot_swap_moves_bindings() {
        let mut player = PlayerState::new(Species::Human, 3);
        let a = SlotKey::from_letter('a').unwrap();
        let f = SlotKey::from_letter('f').unwrap();
        player.slots.set(f, AbilityKind::StopFlying);

        let mut engine = TalentEngine::new(&mut player);
        engine.swap_slots(a, f);
        assert_eq!(engine.player().slots.get(a), AbilityKind::StopFlying);
        assert!(engine.player().slots.is_empty(f));
    }

    #[test]
    fn offered_talent_can_be_attempted() {
        let registry = registry();
        let world = WorldSnapshot::default();
        let prompts = ScriptedPrompts::new();
        let config = TalentConfig::default();
        let rng = FixedRng::new(99);
        let env = Env::with_all(&registry, &world, &prompts, &config, &rng, &StandardCosts)
            .into_talent_env();

        let mut player = PlayerState::new(Species::Human, 3);
        player.evokables = Evokables::FLIGHT;
        player.durations.set(DurationKind::Flight, 30);
        let mut engine = TalentEngine::new(&mut player);

        let talents = engine.offered_talents(&env, true, false).unwrap();
        let stop = talents
            .iter()
            .find(|talent| talent.kind == AbilityKind::StopFlying)
            .copied()
            .unwrap();
        assert!(stop.slot.is_some());
        assert_eq!(engine.can_attempt(&env, stop.kind, true, false), Ok(()));

        let report = engine.attempt(&env, &stop).unwrap();
        assert_eq!(report.outcome, Outcome::Succeeded);
        assert!(!engine.player().airborne());
        assert_eq!(engine.player().nonce, 1);
    }

    #[test]
    fn descriptions_use_the_registry() {
        let registry = registry();
        let world = WorldSnapshot::default();
        let prompts = ScriptedPrompts::new();
        let config = TalentConfig::default();
        let rng = FixedRng::new(0);
        let env = Env::with_all(&registry, &world, &prompts, &config, &rng, &StandardCosts)
            .into_talent_env();
        let mut player = PlayerState::new(Species::Demonspawn, 10);
        let engine = TalentEngine::new(&mut player);

        assert_eq!(engine.describe_cost(&env, AbilityKind::Hellfire).unwrap(), "3 HP");
        assert_eq!(engine.describe_failure(&env, AbilityKind::StopFlying).unwrap(), "0%");
    }
}
