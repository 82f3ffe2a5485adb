//! Ability table loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use talent_core::{AbilityDef, AbilityRegistry};

use crate::loaders::{LoadResult, read_file};

/// The ability table compiled into the crate.
const BUILTIN_ABILITIES: &str = include_str!("../../data/abilities.ron");

/// Ability table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<AbilityDef>,
}

/// Loader for ability definitions from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load and validate an ability table from a RON file.
    pub fn load(path: &Path) -> LoadResult<AbilityRegistry> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate an ability table held in memory.
    pub fn parse(content: &str) -> LoadResult<AbilityRegistry> {
        let catalog: AbilityCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability table RON: {}", e))?;
        let count = catalog.abilities.len();

        let registry = AbilityRegistry::new(catalog.abilities)
            .map_err(|e| anyhow::anyhow!("Invalid ability table: {}", e))?;
        tracing::debug!(abilities = count, "loaded ability table");
        Ok(registry)
    }
}

/// The built-in ability table.
pub fn builtin_registry() -> LoadResult<AbilityRegistry> {
    AbilityLoader::parse(BUILTIN_ABILITIES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;
    use talent_core::{
        AbilityFlags, AbilityKind, FailureFormula, GenericCost, ScalingCost, Skill,
    };

    #[test]
    fn builtin_table_covers_every_ability() {
        let registry = builtin_registry().unwrap();
        for kind in AbilityKind::iter() {
            assert_eq!(registry.lookup(kind).kind, kind, "{kind} is missing");
        }
    }

    #[test]
    fn builtin_costs_and_formulas() {
        let registry = builtin_registry().unwrap();

        let greater = registry.lookup(AbilityKind::MakhlebGreaterServant);
        assert_eq!(greater.hp_cost, ScalingCost::fixed(10));
        assert_eq!(greater.piety_cost, GenericCost::new(5));
        assert!(greater.has(AbilityFlags::HOSTILE));
        assert_eq!(
            greater.failure,
            FailureFormula::Invocation {
                base: 90,
                piety_divisor: 5,
                skill: Skill::Invocations,
                multiplier: 2,
            }
        );

        let draw = registry.lookup(AbilityKind::RuDrawOutPower);
        assert_eq!(
            draw.flags,
            AbilityFlags::EXHAUSTION | AbilityFlags::SKILL_DRAIN | AbilityFlags::CONF_OK
        );

        assert_eq!(
            registry.lookup(AbilityKind::LugonuAbyssEnter).piety_cost,
            GenericCost::fixed(35)
        );
        assert_eq!(registry.lookup(AbilityKind::Hellfire).hp_cost, ScalingCost::per_mille(150));
    }

    #[test]
    fn faith_abilities_are_invocations() {
        let registry = builtin_registry().unwrap();
        for kind in AbilityKind::iter() {
            let def = registry.lookup(kind);
            assert_eq!(def.invocation, kind >= AbilityKind::ZinRecite, "{kind}");
        }
    }

    #[test]
    fn find_by_name_ignores_case() {
        let registry = builtin_registry().unwrap();
        assert_eq!(registry.find_by_name("trog's hand"), AbilityKind::TrogRegenMr);
        assert_eq!(registry.find_by_name("No ability"), AbilityKind::None);
    }

    #[test]
    fn duplicate_kinds_are_rejected() {
        let table = r#"(abilities: [
            (kind: None, name: "No ability"),
            (kind: Dig, name: "Dig"),
            (kind: Dig, name: "Dig Again"),
        ])"#;
        let err = AbilityLoader::parse(table).unwrap_err();
        assert!(err.to_string().contains("more than once"), "{err}");
    }

    #[test]
    fn flags_are_plain_strings() {
        let table = r#"(abilities: [
            (kind: None, name: "No ability"),
            (kind: StopFlying, name: "Stop Flying", flags: "INSTANT | CONF_OK"),
        ])"#;
        let registry = AbilityLoader::parse(table).unwrap();
        assert_eq!(
            registry.lookup(AbilityKind::StopFlying).flags,
            AbilityFlags::INSTANT | AbilityFlags::CONF_OK
        );
    }

    #[test]
    fn sentinel_must_come_first() {
        let table = r#"(abilities: [(kind: Dig, name: "Dig")])"#;
        assert!(AbilityLoader::parse(table).is_err());
    }
}
