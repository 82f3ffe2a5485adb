//! Ability definition oracle.
//!
//! Provides access to the static ability table.

use crate::ability::{AbilityDef, AbilityKind};

/// Oracle providing ability definitions.
///
/// Definitions carry the costs, flags and failure formula of each ability.
/// The shipped table is loaded from RON data files.
pub trait AbilityOracle: Send + Sync {
    /// Definition for `kind`, or the sentinel definition when unknown.
    fn ability(&self, kind: AbilityKind) -> &AbilityDef;

    /// Case-insensitive name lookup; the sentinel is never matched.
    fn find_by_name(&self, name: &str) -> AbilityKind;

    /// All definitions, sentinel first.
    fn definitions(&self) -> &[AbilityDef];
}
