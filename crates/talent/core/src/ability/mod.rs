//! Ability identities, definitions and the static registry.
//!
//! This module is data only: what each ability costs, which flags it carries
//! and how its failure chance is computed. Availability, checks and execution
//! live in [`crate::talent`], [`crate::check`] and [`crate::execute`].
mod cost;
mod definition;
mod describe;
mod failure;
mod flags;
mod kind;
mod registry;

pub use cost::{GenericCost, ScalingCost};
#[cfg(feature = "serde")]
pub use cost::{GenericCostSpec, ScalingCostSpec};
pub use definition::AbilityDef;
pub(crate) use describe::fit;
pub use describe::{describe_cost, describe_failure, detailed_cost_description};
pub use failure::FailureFormula;
pub use flags::AbilityFlags;
pub use kind::AbilityKind;
pub use registry::{AbilityRegistry, RegistryError};
