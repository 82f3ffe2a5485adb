//! Availability: which abilities are offered, on which letters.
//!
//! A [`Talent`] is an ability resolved for the player's current situation:
//! placeholders redirected, a hotkey attached and the failure chance
//! computed. Talents are rebuilt on every query and never stored.
mod gods;
mod offer;
mod redirect;
mod slots;

pub use gods::{CAPSTONE_RANK, GodPower, god_abilities, powers, unlocked};
pub use offer::offered_talents;
pub use redirect::redirect;
pub use slots::{auto_assign, find_slot, lookup_slot, swap_slots};

use crate::ability::{AbilityFlags, AbilityKind, describe_cost, describe_failure, fit};
use crate::env::{OracleError, TalentEnv};
use crate::state::{PlayerState, SlotKey};

/// An ability as offered to the player right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Talent {
    /// Identity after redirection.
    pub kind: AbilityKind,
    pub slot: Option<SlotKey>,
    /// Failure chance in percent.
    pub fail: i32,
    /// Faith-class: blocked by silence, counted as an invocation.
    pub invocation: bool,
}

impl Talent {
    pub fn is_none(&self) -> bool {
        self.kind.is_none()
    }
}

/// Resolves `ability` without claiming a slot.
///
/// A confused player gets the sentinel talent for abilities that cannot be
/// used while confused when `check_confused` is set.
pub fn talent(
    player: &PlayerState,
    env: &TalentEnv<'_>,
    ability: AbilityKind,
    check_confused: bool,
) -> Result<Talent, OracleError> {
    let abilities = env.abilities()?;
    let world = env.world()?;

    let kind = redirect(ability, player, world);
    let def = abilities.ability(kind);
    if check_confused && player.is_confused() && !def.has(AbilityFlags::CONF_OK) {
        return Ok(Talent {
            kind: AbilityKind::None,
            slot: None,
            fail: 0,
            invocation: false,
        });
    }

    Ok(Talent {
        kind: def.kind,
        slot: lookup_slot(player, world, def.kind),
        fail: def.failure.percent(player),
        invocation: def.invocation,
    })
}

/// Menu line for a talent: name, cost summary and failure chance.
pub fn describe_talent(
    player: &PlayerState,
    env: &TalentEnv<'_>,
    talent: &Talent,
) -> Result<String, OracleError> {
    let def = env.abilities()?.ability(talent.kind);
    let mut failure = describe_failure(talent.fail);
    if def.has(AbilityFlags::HOSTILE) {
        failure.push_str(" hostile");
    }
    Ok(format!(
        "{}{}{}",
        fit(&def.name, 32),
        fit(&describe_cost(def, player), 30),
        fit(&failure, 12)
    ))
}
