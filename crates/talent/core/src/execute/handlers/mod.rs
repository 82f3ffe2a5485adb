//! Effect handlers, one per ability identity.
//!
//! Each submodule contributes a registration table. Dispatch scans the tables
//! in order; the first entry for an identity wins, and a test below keeps
//! every identity registered exactly once.
mod divine;
mod evoke;
mod general;
mod innate;

use crate::ability::AbilityKind;
use crate::execute::{EffectContext, Halt};

/// Resolves one ability's effect against the context.
pub(crate) type Handler = fn(&mut EffectContext<'_, '_>) -> Result<(), Halt>;

const TABLES: [&[(AbilityKind, Handler)]; 4] = [
    innate::HANDLERS,
    evoke::HANDLERS,
    divine::HANDLERS,
    general::HANDLERS,
];

fn entries() -> impl Iterator<Item = &'static (AbilityKind, Handler)> {
    TABLES.into_iter().flatten()
}

/// Handler registered for `kind`.
pub(crate) fn handler(kind: AbilityKind) -> Option<Handler> {
    entries()
        .find(|(registered, _)| *registered == kind)
        .map(|(_, handler)| *handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_identity_has_one_handler() {
        for kind in AbilityKind::iter() {
            let count = entries().filter(|(registered, _)| *registered == kind).count();
            assert_eq!(count, 1, "{kind} registered {count} times");
        }
    }
}
