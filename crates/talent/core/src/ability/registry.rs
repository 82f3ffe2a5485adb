//! Static ability table.
//!
//! Built once from definitions, then read-only. Lookups never fail: unknown
//! identities resolve to the sentinel definition, which must come first.

use std::collections::{BTreeMap, BTreeSet};

use crate::ability::{AbilityDef, AbilityKind};
use crate::env::AbilityOracle;
use crate::error::{ErrorSeverity, GameError};

/// Reasons a definition table is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("ability table is empty")]
    Empty,

    #[error("ability table must start with the sentinel, found {0}")]
    MissingSentinel(AbilityKind),

    #[error("ability {0} is defined more than once")]
    DuplicateKind(AbilityKind),

    #[error("ability name '{0}' is used more than once")]
    DuplicateName(String),
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "REGISTRY_EMPTY",
            Self::MissingSentinel(_) => "REGISTRY_MISSING_SENTINEL",
            Self::DuplicateKind(_) => "REGISTRY_DUPLICATE_KIND",
            Self::DuplicateName(_) => "REGISTRY_DUPLICATE_NAME",
        }
    }
}

/// Validated ability table.
#[derive(Clone, Debug)]
pub struct AbilityRegistry {
    defs: Vec<AbilityDef>,
    index: BTreeMap<AbilityKind, usize>,
}

impl AbilityRegistry {
    pub fn new(defs: Vec<AbilityDef>) -> Result<Self, RegistryError> {
        let first = defs.first().ok_or(RegistryError::Empty)?;
        if !first.kind.is_none() {
            return Err(RegistryError::MissingSentinel(first.kind));
        }

        let mut index = BTreeMap::new();
        let mut names = BTreeSet::new();
        for (position, def) in defs.iter().enumerate() {
            if index.insert(def.kind, position).is_some() {
                return Err(RegistryError::DuplicateKind(def.kind));
            }
            if !names.insert(def.name.to_lowercase()) {
                return Err(RegistryError::DuplicateName(def.name.clone()));
            }
        }

        Ok(Self { defs, index })
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn sentinel(&self) -> &AbilityDef {
        &self.defs[0]
    }

    pub fn lookup(&self, kind: AbilityKind) -> &AbilityDef {
        self.index
            .get(&kind)
            .and_then(|position| self.defs.get(*position))
            .unwrap_or_else(|| self.sentinel())
    }

    pub fn contains(&self, kind: AbilityKind) -> bool {
        self.index.contains_key(&kind)
    }

    pub fn find_by_name(&self, name: &str) -> AbilityKind {
        self.defs
            .iter()
            .skip(1)
            .find(|def| def.name.eq_ignore_ascii_case(name))
            .map(|def| def.kind)
            .unwrap_or(AbilityKind::None)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityDef> {
        self.defs.iter()
    }
}

impl AbilityOracle for AbilityRegistry {
    fn ability(&self, kind: AbilityKind) -> &AbilityDef {
        self.lookup(kind)
    }

    fn find_by_name(&self, name: &str) -> AbilityKind {
        AbilityRegistry::find_by_name(self, name)
    }

    fn definitions(&self) -> &[AbilityDef] {
        &self.defs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<AbilityDef> {
        vec![
            AbilityDef::sentinel(),
            AbilityDef::new(AbilityKind::Blink, "Blink").with_mp(3),
            AbilityDef::new(AbilityKind::Fly, "Fly").with_mp(3),
        ]
    }

    #[test]
    fn unknown_identity_falls_back_to_sentinel() {
        let registry = AbilityRegistry::new(table()).unwrap();
        assert_eq!(registry.lookup(AbilityKind::Hellfire).kind, AbilityKind::None);
        assert_eq!(registry.lookup(AbilityKind::Blink).mp_cost, 3);
    }

    #[test]
    fn names_match_case_insensitively() {
        let registry = AbilityRegistry::new(table()).unwrap();
        assert_eq!(registry.find_by_name("bLiNk"), AbilityKind::Blink);
        assert_eq!(registry.find_by_name("No ability"), AbilityKind::None);
        assert_eq!(registry.find_by_name("Teleport"), AbilityKind::None);
    }

    #[test]
    fn sentinel_must_lead() {
        let mut defs = table();
        defs.swap(0, 1);
        assert_eq!(
            AbilityRegistry::new(defs).unwrap_err(),
            RegistryError::MissingSentinel(AbilityKind::Blink)
        );
        assert_eq!(AbilityRegistry::new(Vec::new()).unwrap_err(), RegistryError::Empty);
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut defs = table();
        defs.push(AbilityDef::new(AbilityKind::Blink, "Blink Again"));
        assert_eq!(
            AbilityRegistry::new(defs).unwrap_err(),
            RegistryError::DuplicateKind(AbilityKind::Blink)
        );

        let mut defs = table();
        defs.push(AbilityDef::new(AbilityKind::Dig, "FLY"));
        assert_eq!(
            AbilityRegistry::new(defs).unwrap_err(),
            RegistryError::DuplicateName("FLY".into())
        );
    }
}
