//! Deterministic ability rules for a roguelike player character.
//!
//! `talent-core` decides which abilities a player is offered, on which
//! letters, whether one may be attempted right now, how likely it is to fail,
//! and what happens when it is attempted. It never performs I/O: the host
//! supplies definitions, location facts, prompts and randomness through the
//! oracle traits in [`env`], and applies the [`execute::AbilityEvent`]s an
//! attempt reports. All player mutation flows through [`engine::TalentEngine`].
pub mod ability;
pub mod check;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod execute;
pub mod state;
pub mod talent;

pub use ability::{
    AbilityDef, AbilityFlags, AbilityKind, AbilityRegistry, FailureFormula, GenericCost,
    RegistryError, ScalingCost, describe_cost, describe_failure, detailed_cost_description,
};
pub use check::{Refusal, can_attempt};
pub use config::{ConfigError, PietyScaling, SlotRule, TalentConfig, TextPattern};
pub use engine::TalentEngine;
pub use env::{
    AbilityOracle, ConfigOracle, CostPolicy, Dice, Env, FixedRng, OracleError, PcgRng,
    PromptOracle, RngOracle, ScaledPietyCosts, ScriptedPrompts, StandardCosts, TalentEnv,
    Target, TargetRequest, WorldOracle, WorldSnapshot,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use execute::{
    AbilityEvent, AttemptError, AttemptReport, ChargedCosts, Outcome, TurnCost, attempt,
};
pub use state::{
    AbilityCounters, DurationKind, Durations, Evokables, Form, God, HitPoints, HungerState,
    Item, ItemClass, MagicPoints, Mutation, Mutations, PlayerFlags, PlayerState, Religion,
    SacrificeOffer, Skill, Skills, SlotKey, SlotTable, Species, Stats, UndeadState,
};
pub use talent::{Talent, describe_talent, offered_talents, redirect, talent};
