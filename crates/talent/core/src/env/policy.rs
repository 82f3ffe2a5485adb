//! Piety cost policies.
//!
//! Game modes that tune faith costs plug in here instead of special-casing
//! settlement.

use crate::ability::{AbilityKind, GenericCost};
use crate::config::PietyScaling;
use crate::env::Dice;

/// Hook applied to every piety cost before it is deducted.
pub trait CostPolicy: Send + Sync {
    fn piety_cost(&self, ability: AbilityKind, cost: &GenericCost, dice: &mut Dice<'_>) -> i32;
}

/// Charges piety exactly as defined.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardCosts;

impl CostPolicy for StandardCosts {
    fn piety_cost(&self, _ability: AbilityKind, cost: &GenericCost, dice: &mut Dice<'_>) -> i32 {
        cost.cost(dice)
    }
}

/// Multiplies piety costs of selected abilities, rounding randomly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScaledPietyCosts {
    abilities: Vec<AbilityKind>,
    numerator: i32,
    denominator: i32,
}

impl ScaledPietyCosts {
    pub fn new(abilities: Vec<AbilityKind>, numerator: i32, denominator: i32) -> Self {
        Self {
            abilities,
            numerator,
            denominator: denominator.max(1),
        }
    }

    pub fn applies_to(&self, ability: AbilityKind) -> bool {
        self.abilities.contains(&ability)
    }
}

impl From<&PietyScaling> for ScaledPietyCosts {
    fn from(scaling: &PietyScaling) -> Self {
        Self::new(
            scaling.abilities.clone(),
            scaling.numerator,
            scaling.denominator,
        )
    }
}

impl CostPolicy for ScaledPietyCosts {
    fn piety_cost(&self, ability: AbilityKind, cost: &GenericCost, dice: &mut Dice<'_>) -> i32 {
        let base = cost.cost(dice);
        if !self.applies_to(ability) {
            return base;
        }
        dice.div_rand_round(base * self.numerator, self.denominator)
    }
}
