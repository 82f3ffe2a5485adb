//! Player-facing text for costs, failure chances and menu lines.

use crate::ability::{AbilityDef, AbilityFlags};
use crate::state::{HungerState, PlayerState, UndeadState};

/// Hunger is hidden from species that never get hungry, and from starving
/// vampires, who cannot pay it anyway.
fn shows_hunger(def: &AbilityDef, player: &PlayerState) -> bool {
    def.food_cost > 0
        && !player.species.is_foodless()
        && (player.species.undead_state() != UndeadState::Semi
            || player.hunger_state() > HungerState::Starving)
}

/// One-line cost summary, e.g. `"3 MP, Hunger, Delay"`; `"None"` when free.
pub fn describe_cost(def: &AbilityDef, player: &PlayerState) -> String {
    let mut parts: Vec<String> = Vec::new();

    if def.mp_cost > 0 {
        let permanent = if def.has(AbilityFlags::PERMANENT_MP) {
            "Permanent "
        } else {
            ""
        };
        parts.push(format!("{} {permanent}MP", def.mp_cost));
    }
    if def.hp_cost.is_nonzero() {
        let permanent = if def.has(AbilityFlags::PERMANENT_HP) {
            "Permanent "
        } else {
            ""
        };
        parts.push(format!("{} {permanent}HP", def.hp_cost.cost(player.hp.max)));
    }
    if shows_hunger(def, player) {
        parts.push("Hunger".into());
    }
    if def.piety_cost.is_nonzero() || def.has(AbilityFlags::PIETY) {
        parts.push("Piety".into());
    }

    const FLAG_WORDS: [(AbilityFlags, &str); 7] = [
        (AbilityFlags::BREATH, "Breath"),
        (AbilityFlags::DELAY, "Delay"),
        (AbilityFlags::PAIN, "Pain"),
        (AbilityFlags::EXHAUSTION, "Exhaustion"),
        (AbilityFlags::INSTANT, "Instant"),
        (AbilityFlags::SKILL_DRAIN, "Skill drain"),
        (AbilityFlags::GOLD, "Gold"),
    ];
    for (flag, word) in FLAG_WORDS {
        if def.has(flag) {
            parts.push(word.into());
        }
    }

    if def.has(AbilityFlags::SACRIFICE) {
        let what = def.name.strip_prefix("Sacrifice ").unwrap_or(&def.name);
        parts.push(what.to_owned());
    }

    if parts.is_empty() {
        "None".into()
    } else {
        parts.join(", ")
    }
}

/// Failure chance as shown in menus.
pub fn describe_failure(percent: i32) -> String {
    format!("{}%", percent.clamp(0, 100))
}

fn piety_amount(value: i32) -> &'static str {
    match value {
        v if v > 15 => "extremely large",
        v if v > 10 => "large",
        v if v > 5 => "moderate",
        _ => "small",
    }
}

fn hunger_amount(value: i32) -> &'static str {
    match value {
        v if v > 500 => "extreme",
        v if v > 250 => "major",
        v if v > 100 => "moderate",
        _ => "minor",
    }
}

/// Multi-line breakdown used by the ability description screen.
pub fn detailed_cost_description(def: &AbilityDef, player: &PlayerState) -> String {
    let mut text = String::from("This ability costs: ");
    let mut has_cost = false;

    if def.mp_cost > 0 {
        has_cost = true;
        let label = if def.has(AbilityFlags::PERMANENT_MP) {
            "Max MP : "
        } else {
            "MP     : "
        };
        text.push_str(&format!("\n{label}{}", def.mp_cost));
    }
    if def.hp_cost.is_nonzero() {
        has_cost = true;
        let label = if def.has(AbilityFlags::PERMANENT_HP) {
            "Max HP : "
        } else {
            "HP     : "
        };
        text.push_str(&format!("\n{label}{}", def.hp_cost.cost(player.hp.max)));
    }
    if shows_hunger(def, player) {
        has_cost = true;
        let expected = def.food_cost + def.food_cost / 2;
        text.push_str(&format!("\nHunger : {}", hunger_amount(expected)));
    }
    if def.piety_cost.is_nonzero() || def.has(AbilityFlags::PIETY) {
        has_cost = true;
        let amount = if def.has(AbilityFlags::PIETY) {
            "variable"
        } else {
            piety_amount(def.piety_cost.average())
        };
        text.push_str(&format!("\nPiety  : {amount}"));
    }
    if def.has(AbilityFlags::GOLD) {
        has_cost = true;
        text.push_str("\nGold   : variable");
    }

    if !has_cost {
        text.push_str("nothing.");
    }

    for (flag, remark) in AbilityFlags::REMARKS {
        if def.has(flag) {
            text.push('\n');
            text.push_str(remark);
        }
    }
    text
}

/// Cuts `text` to `width` characters and pads it back out.
pub(crate) fn fit(text: &str, width: usize) -> String {
    let cut: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{cut:<width$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityKind, GenericCost, ScalingCost};
    use crate::state::Species;

    fn human() -> PlayerState {
        PlayerState::new(Species::Human, 10)
    }

    #[test]
    fn free_ability_costs_none() {
        let def = AbilityDef::new(AbilityKind::StopFlying, "Stop Flying");
        assert_eq!(describe_cost(&def, &human()), "None");
        assert!(detailed_cost_description(&def, &human()).starts_with("This ability costs: nothing."));
    }

    #[test]
    fn costs_are_listed_in_order() {
        let def = AbilityDef::new(AbilityKind::Hellfire, "Hurl Hellfire")
            .with_mp(3)
            .with_hp(ScalingCost::fixed(4))
            .with_food(200)
            .with_piety(GenericCost::new(2))
            .with_flags(AbilityFlags::DELAY | AbilityFlags::PERMANENT_MP);
        assert_eq!(
            describe_cost(&def, &human()),
            "3 Permanent MP, 4 HP, Hunger, Piety, Delay"
        );
    }

    #[test]
    fn mummies_see_no_hunger() {
        let def = AbilityDef::new(AbilityKind::Dig, "Dig").with_food(100);
        let mummy = PlayerState::new(Species::Mummy, 3);
        assert_eq!(describe_cost(&def, &mummy), "None");
        assert_eq!(describe_cost(&def, &human()), "Hunger");
    }

    #[test]
    fn sacrifice_names_the_offering() {
        let def = AbilityDef::new(AbilityKind::RuSacrificeWords, "Sacrifice Words")
            .with_flags(AbilityFlags::SACRIFICE);
        assert_eq!(describe_cost(&def, &human()), "Words");
    }

    #[test]
    fn detailed_description_uses_magnitude_words() {
        let def = AbilityDef::new(AbilityKind::ZinSanctuary, "Sanctuary")
            .with_mp(7)
            .with_piety(GenericCost::fixed(15))
            .with_flags(AbilityFlags::CONF_OK);
        let text = detailed_cost_description(&def, &human());
        assert!(text.contains("\nMP     : 7"));
        assert!(text.contains("\nPiety  : large"));
        assert!(text.ends_with("You can use it even if confused."));
    }

    #[test]
    fn failure_text() {
        assert_eq!(describe_failure(37), "37%");
        assert_eq!(describe_failure(140), "100%");
    }
}
