//! Cost settlement for attempts that took a turn.

use crate::ability::{AbilityDef, AbilityFlags};
use crate::env::{CostPolicy, Dice};
use crate::state::{PlayerState, UndeadState};

/// Resources actually deducted by one attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargedCosts {
    pub mp: i32,
    pub hp: i32,
    pub food: i32,
    pub piety: i32,
}

impl ChargedCosts {
    pub fn is_free(&self) -> bool {
        *self == Self::default()
    }
}

/// Deducts every cost of `def` from `player` exactly once.
///
/// Permanent costs also lower the matching maximum by the amount deducted.
pub(crate) fn settle_costs(
    player: &mut PlayerState,
    def: &AbilityDef,
    policy: &dyn CostPolicy,
    dice: &mut Dice<'_>,
) -> ChargedCosts {
    let food = if def.food_cost > 0 {
        def.food_cost + dice.random2avg(def.food_cost, 2)
    } else {
        0
    };
    let piety = policy.piety_cost(def.kind, &def.piety_cost, dice).max(0);
    let hp = def.hp_cost.cost(player.hp.max);
    let mp = def.mp_cost.max(0);

    tracing::debug!(ability = %def.kind, mp, hp, food, piety, "settling ability costs");

    if mp > 0 {
        player.mp.current = (player.mp.current - mp).max(0);
        if def.has(AbilityFlags::PERMANENT_MP) {
            player.mp.max = (player.mp.max - mp).max(0);
            player.mp.lost += mp;
            player.mp.current = player.mp.current.min(player.mp.max);
        }
    }

    if hp > 0 {
        player.hp.current -= hp;
        if def.has(AbilityFlags::PERMANENT_HP) {
            player.hp.max = (player.hp.max - hp).max(1);
            player.hp.rotted += hp;
            player.hp.current = player.hp.current.min(player.hp.max);
        }
    }

    let hungers = !player.species.is_foodless() && player.species.undead_state() != UndeadState::Full;
    let food = if hungers { food } else { 0 };
    if food > 0 {
        player.hunger = (player.hunger - food).max(0);
    }

    if piety > 0 {
        player.religion.lose_piety(piety);
    }

    ChargedCosts { mp, hp, food, piety }
}
