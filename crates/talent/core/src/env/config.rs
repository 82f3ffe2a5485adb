//! Configuration oracle for exposing engine configuration.

use crate::config::{SlotRule, TalentConfig, TextPattern};

/// Provides access to runtime configuration values.
pub trait ConfigOracle: Send + Sync {
    /// Nutrition that must remain after paying twice the food cost.
    fn hunger_margin(&self) -> i32;

    fn first_slot(&self) -> char;

    fn invocation_first_slot(&self) -> char;

    /// Name patterns that require a yes/no before use.
    fn confirm_patterns(&self) -> &[TextPattern];

    fn slot_rules(&self) -> &[SlotRule];
}

impl ConfigOracle for TalentConfig {
    fn hunger_margin(&self) -> i32 {
        self.hunger_margin
    }

    fn first_slot(&self) -> char {
        self.first_slot
    }

    fn invocation_first_slot(&self) -> char {
        self.invocation_first_slot
    }

    fn confirm_patterns(&self) -> &[TextPattern] {
        &self.confirm
    }

    fn slot_rules(&self) -> &[SlotRule] {
        &self.slot_rules
    }
}
