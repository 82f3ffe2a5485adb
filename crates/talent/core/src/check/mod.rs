//! Precondition checks run before an ability is attempted.
//!
//! A [`Refusal`] never costs a turn: the player keeps the action and may pick
//! another one. Checks are ordered so the first applicable reason is the one
//! reported.
mod special;

pub(crate) use special::berserk_refusal;

use crate::ability::{AbilityFlags, AbilityKind};
use crate::env::{OracleError, TalentEnv};
use crate::error::{ErrorSeverity, GameError};
use crate::state::PlayerState;

/// Why an ability cannot be used right now.
///
/// The display text is the message shown to the player.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Refusal {
    #[error("You are too berserk!")]
    Berserk,

    #[error("You are too confused!")]
    Confused,

    #[error("You cannot call out to {god} while silenced.")]
    Silenced { god: &'static str },

    #[error("You're too hungry.")]
    TooHungry,

    #[error("You're too hungry.")]
    Starving,

    #[error("You don't have enough innate magic capacity to sacrifice.")]
    InsufficientInnateMp,

    /// The player declined a confirmation.
    #[error("Okay, then.")]
    Declined,

    /// The player cancelled a target or item prompt.
    #[error("Okay, then.")]
    Cancelled,

    #[error("You haven't enough magic at the moment.")]
    NotEnoughMp,

    #[error("You haven't enough hit points at the moment.")]
    NotEnoughHp,

    #[error("{action} right now would be fatal!")]
    DangerousTerrain { action: &'static str },

    #[error("You can't fly here.")]
    FlightForbidden,

    /// Breath cooldown still running.
    #[error("You can't do that yet.")]
    NotReady,

    /// An ability-specific condition is unmet.
    #[error("{reason}")]
    Condition { reason: &'static str },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl Refusal {
    pub const fn condition(reason: &'static str) -> Self {
        Self::Condition { reason }
    }
}

impl GameError for Refusal {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientInnateMp | Self::Condition { .. } => ErrorSeverity::Validation,
            Self::Oracle(_) => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Berserk => "REFUSAL_BERSERK",
            Self::Confused => "REFUSAL_CONFUSED",
            Self::Silenced { .. } => "REFUSAL_SILENCED",
            Self::TooHungry => "REFUSAL_TOO_HUNGRY",
            Self::Starving => "REFUSAL_STARVING",
            Self::InsufficientInnateMp => "REFUSAL_INSUFFICIENT_INNATE_MP",
            Self::Declined => "REFUSAL_DECLINED",
            Self::Cancelled => "REFUSAL_CANCELLED",
            Self::NotEnoughMp => "REFUSAL_NOT_ENOUGH_MP",
            Self::NotEnoughHp => "REFUSAL_NOT_ENOUGH_HP",
            Self::DangerousTerrain { .. } => "REFUSAL_DANGEROUS_TERRAIN",
            Self::FlightForbidden => "REFUSAL_FLIGHT_FORBIDDEN",
            Self::NotReady => "REFUSAL_NOT_READY",
            Self::Condition { .. } => "REFUSAL_CONDITION",
            Self::Oracle(err) => err.error_code(),
        }
    }
}

/// Checks whether `ability` may be attempted right now.
///
/// With `require_consumable_margin`, eating species must keep more than the
/// configured hunger margin after paying twice the food cost. `silent` skips
/// the confirmation prompts configured for matching ability names.
///
/// # Errors
///
/// Returns the first [`Refusal`] that applies.
pub fn can_attempt(
    player: &PlayerState,
    env: &TalentEnv<'_>,
    ability: AbilityKind,
    require_consumable_margin: bool,
    silent: bool,
) -> Result<(), Refusal> {
    let def = env.abilities()?.ability(ability);
    let world = env.world()?;
    let config = env.config()?;

    if player.is_berserk() {
        return Err(Refusal::Berserk);
    }

    if player.is_confused() && !def.has(AbilityFlags::CONF_OK) {
        return Err(Refusal::Confused);
    }

    if world.silenced() && def.invocation {
        return Err(Refusal::Silenced {
            god: player.religion.god.title(),
        });
    }

    if require_consumable_margin
        && player.eats()
        && player.hunger - 2 * def.food_cost <= config.hunger_margin()
    {
        return Err(Refusal::TooHungry);
    }

    if def.has(AbilityFlags::PERMANENT_MP) && player.mp.innate_capacity() < def.mp_cost {
        return Err(Refusal::InsufficientInnateMp);
    }

    if !silent {
        let name = def.name.to_lowercase();
        if config.confirm_patterns().iter().any(|pattern| pattern.matches(&name)) {
            let question = format!("Really use {}?", def.name);
            if !env.prompt()?.confirm(&question) {
                return Err(Refusal::Declined);
            }
        }
    }

    special::check(def, player, world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityDef, AbilityRegistry, ScalingCost};
    use crate::config::TalentConfig;
    use crate::env::{Env, PcgRng, ScriptedPrompts, StandardCosts, WorldSnapshot};
    use crate::state::{DurationKind, God, Religion, Species};

    fn registry() -> AbilityRegistry {
        AbilityRegistry::new(vec![
            AbilityDef::sentinel(),
            AbilityDef::new(AbilityKind::Fly, "Fly").with_food(100),
            AbilityDef::new(AbilityKind::StopFlying, "Stop Flying").with_flags(AbilityFlags::CONF_OK),
            AbilityDef::new(AbilityKind::TrogBerserk, "Berserk").invocation(),
            AbilityDef::new(AbilityKind::RenounceReligion, "Renounce Religion"),
            AbilityDef::new(AbilityKind::ZinSanctuary, "Sanctuary")
                .with_mp(7)
                .with_flags(AbilityFlags::PERMANENT_MP)
                .invocation(),
            AbilityDef::new(AbilityKind::MakhlebLesserServant, "Lesser Servant of Makhleb")
                .with_hp(ScalingCost::fixed(4)),
        ])
        .unwrap()
    }

    fn check(
        player: &PlayerState,
        world: &WorldSnapshot,
        prompts: &ScriptedPrompts,
        config: &TalentConfig,
        ability: AbilityKind,
        silent: bool,
    ) -> Result<(), Refusal> {
        let registry = registry();
        let env = Env::with_all(&registry, world, prompts, config, &PcgRng, &StandardCosts)
            .into_talent_env();
        can_attempt(player, &env, ability, true, silent)
    }

    #[test]
    fn berserk_comes_first() {
        let mut player = PlayerState::new(Species::Human, 5);
        player.durations.set(DurationKind::Berserk, 10);
        player.durations.set(DurationKind::Confusion, 10);
        let result = check(
            &player,
            &WorldSnapshot::default(),
            &ScriptedPrompts::new(),
            &TalentConfig::default(),
            AbilityKind::Fly,
            false,
        );
        assert_eq!(result, Err(Refusal::Berserk));
    }

    #[test]
    fn confusion_spares_confusion_safe_abilities() {
        let mut player = PlayerState::new(Species::Tengu, 5);
        player.durations.set(DurationKind::Confusion, 10);
        let world = WorldSnapshot::default();
        let prompts = ScriptedPrompts::new();
        let config = TalentConfig::default();
        assert_eq!(
            check(&player, &world, &prompts, &config, AbilityKind::Fly, false),
            Err(Refusal::Confused)
        );
        assert_eq!(
            check(&player, &world, &prompts, &config, AbilityKind::StopFlying, false),
            Ok(())
        );
    }

    #[test]
    fn silence_blocks_invocations_only() {
        let mut player = PlayerState::new(Species::Human, 5);
        player.religion = Religion::worshipping(God::Trog, 50);
        let world = WorldSnapshot {
            silenced: true,
            ..WorldSnapshot::default()
        };
        let prompts = ScriptedPrompts::new();
        let config = TalentConfig::default();
        let refusal = check(&player, &world, &prompts, &config, AbilityKind::TrogBerserk, false)
            .unwrap_err();
        assert_eq!(refusal.to_string(), "You cannot call out to Trog while silenced.");
        assert_eq!(
            check(&player, &world, &prompts, &config, AbilityKind::Fly, false),
            Ok(())
        );
    }

    #[test]
    fn hunger_margin_counts_double_food() {
        let mut player = PlayerState::new(Species::Tengu, 5);
        let world = WorldSnapshot::default();
        let prompts = ScriptedPrompts::new();
        let config = TalentConfig::default();

        player.hunger = 250;
        assert_eq!(
            check(&player, &world, &prompts, &config, AbilityKind::Fly, false),
            Err(Refusal::TooHungry)
        );
        player.hunger = 251;
        assert_eq!(
            check(&player, &world, &prompts, &config, AbilityKind::Fly, false),
            Ok(())
        );

        let mut mummy = PlayerState::new(Species::Mummy, 5);
        mummy.hunger = 0;
        assert_eq!(
            check(&mummy, &world, &prompts, &config, AbilityKind::Fly, false),
            Ok(())
        );
    }

    #[test]
    fn permanent_magic_needs_innate_capacity() {
        let mut player = PlayerState::new(Species::Human, 5);
        player.religion = Religion::worshipping(God::Zin, 150);
        player.mp.innate_max = 6;
        let result = check(
            &player,
            &WorldSnapshot::default(),
            &ScriptedPrompts::new(),
            &TalentConfig::default(),
            AbilityKind::ZinSanctuary,
            false,
        );
        assert_eq!(result, Err(Refusal::InsufficientInnateMp));
        assert_eq!(result.unwrap_err().severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn confirmation_patterns_prompt_unless_silent() {
        let player = PlayerState::new(Species::Human, 5);
        let world = WorldSnapshot::default();
        let config = TalentConfig::default().with_confirm("renounce").unwrap();

        let declining = ScriptedPrompts::new().confirm_with(false);
        assert_eq!(
            check(&player, &world, &declining, &config, AbilityKind::RenounceReligion, false),
            Err(Refusal::Declined)
        );
        assert_eq!(declining.asked(), vec!["Really use Renounce Religion?".to_owned()]);

        let untouched = ScriptedPrompts::new();
        assert_eq!(
            check(&player, &world, &untouched, &config, AbilityKind::RenounceReligion, true),
            Ok(())
        );
        assert!(untouched.asked().is_empty());
    }

    #[test]
    fn refusals_carry_codes() {
        assert_eq!(Refusal::NotEnoughMp.error_code(), "REFUSAL_NOT_ENOUGH_MP");
        assert!(Refusal::Cancelled.severity().is_recoverable());
        assert_eq!(
            Refusal::from(OracleError::WorldNotAvailable).severity(),
            ErrorSeverity::Fatal
        );
        assert_eq!(
            Refusal::DangerousTerrain {
                action: "Stopping flight"
            }
            .to_string(),
            "Stopping flight right now would be fatal!"
        );
    }
}
