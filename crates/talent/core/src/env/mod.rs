//! Traits describing the collaborators of ability resolution.
//!
//! Oracles expose the ability table, location facts, player prompts,
//! configuration, randomness and the piety cost policy. The [`Env`] aggregate
//! bundles them so the engine can reach everything it needs without hard
//! coupling to concrete implementations.
mod abilities;
mod config;
mod error;
mod policy;
mod prompt;
mod rng;
mod world;

pub use abilities::AbilityOracle;
pub use config::ConfigOracle;
pub use error::OracleError;
pub use policy::{CostPolicy, ScaledPietyCosts, StandardCosts};
pub use prompt::{PromptOracle, ScriptedPrompts, Target, TargetRequest};
pub use rng::{Dice, FixedRng, PcgRng, RngOracle, compute_seed};
pub use world::{WorldOracle, WorldSnapshot};

/// Aggregates the oracles required by the engine.
pub struct Env<'a, A, W, P, C, R, K>
where
    A: AbilityOracle + ?Sized,
    W: WorldOracle + ?Sized,
    P: PromptOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
    K: CostPolicy + ?Sized,
{
    abilities: Option<&'a A>,
    world: Option<&'a W>,
    prompt: Option<&'a P>,
    config: Option<&'a C>,
    rng: Option<&'a R>,
    policy: Option<&'a K>,
}

pub type TalentEnv<'a> = Env<
    'a,
    dyn AbilityOracle + 'a,
    dyn WorldOracle + 'a,
    dyn PromptOracle + 'a,
    dyn ConfigOracle + 'a,
    dyn RngOracle + 'a,
    dyn CostPolicy + 'a,
>;

impl<A, W, P, C, R, K> Clone for Env<'_, A, W, P, C, R, K>
where
    A: AbilityOracle + ?Sized,
    W: WorldOracle + ?Sized,
    P: PromptOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
    K: CostPolicy + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, W, P, C, R, K> Copy for Env<'_, A, W, P, C, R, K>
where
    A: AbilityOracle + ?Sized,
    W: WorldOracle + ?Sized,
    P: PromptOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
    K: CostPolicy + ?Sized,
{
}

impl<'a, A, W, P, C, R, K> Env<'a, A, W, P, C, R, K>
where
    A: AbilityOracle + ?Sized,
    W: WorldOracle + ?Sized,
    P: PromptOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
    K: CostPolicy + ?Sized,
{
    pub fn new(
        abilities: Option<&'a A>,
        world: Option<&'a W>,
        prompt: Option<&'a P>,
        config: Option<&'a C>,
        rng: Option<&'a R>,
        policy: Option<&'a K>,
    ) -> Self {
        Self {
            abilities,
            world,
            prompt,
            config,
            rng,
            policy,
        }
    }

    pub fn with_all(
        abilities: &'a A,
        world: &'a W,
        prompt: &'a P,
        config: &'a C,
        rng: &'a R,
        policy: &'a K,
    ) -> Self {
        Self::new(
            Some(abilities),
            Some(world),
            Some(prompt),
            Some(config),
            Some(rng),
            Some(policy),
        )
    }

    pub fn empty() -> Self {
        Self {
            abilities: None,
            world: None,
            prompt: None,
            config: None,
            rng: None,
            policy: None,
        }
    }

    /// Returns the AbilityOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::AbilitiesNotAvailable` if no ability oracle was provided.
    pub fn abilities(&self) -> Result<&'a A, OracleError> {
        self.abilities.ok_or(OracleError::AbilitiesNotAvailable)
    }

    /// Returns the WorldOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::WorldNotAvailable` if no world oracle was provided.
    pub fn world(&self) -> Result<&'a W, OracleError> {
        self.world.ok_or(OracleError::WorldNotAvailable)
    }

    /// Returns the PromptOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::PromptNotAvailable` if no prompt oracle was provided.
    pub fn prompt(&self) -> Result<&'a P, OracleError> {
        self.prompt.ok_or(OracleError::PromptNotAvailable)
    }

    /// Returns the ConfigOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ConfigNotAvailable` if no config oracle was provided.
    pub fn config(&self) -> Result<&'a C, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Returns the CostPolicy, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::PolicyNotAvailable` if no cost policy was provided.
    pub fn policy(&self) -> Result<&'a K, OracleError> {
        self.policy.ok_or(OracleError::PolicyNotAvailable)
    }
}

impl<'a, A, W, P, C, R, K> Env<'a, A, W, P, C, R, K>
where
    A: AbilityOracle + 'a,
    W: WorldOracle + 'a,
    P: PromptOracle + 'a,
    C: ConfigOracle + 'a,
    R: RngOracle + 'a,
    K: CostPolicy + 'a,
{
    /// Converts this environment into a trait-object based `TalentEnv`.
    pub fn into_talent_env(self) -> TalentEnv<'a> {
        let abilities: Option<&'a dyn AbilityOracle> = self.abilities.map(|a| a as _);
        let world: Option<&'a dyn WorldOracle> = self.world.map(|w| w as _);
        let prompt: Option<&'a dyn PromptOracle> = self.prompt.map(|p| p as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|c| c as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|r| r as _);
        let policy: Option<&'a dyn CostPolicy> = self.policy.map(|k| k as _);
        Env::new(abilities, world, prompt, config, rng, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_env_reports_missing_oracles() {
        let env = TalentEnv::empty();
        assert_eq!(env.rng().err(), Some(OracleError::RngNotAvailable));
        assert_eq!(env.world().err(), Some(OracleError::WorldNotAvailable));
        assert_eq!(env.policy().err(), Some(OracleError::PolicyNotAvailable));
    }
}
