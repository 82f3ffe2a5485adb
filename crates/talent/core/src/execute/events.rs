//! Effects on the world, reported for the host to apply.
//!
//! The engine mutates only the player. Anything touching monsters, terrain or
//! items on the floor is described here instead.

use crate::ability::AbilityKind;
use crate::env::Target;
use crate::state::God;

/// A world-facing consequence of a resolved ability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbilityEvent {
    /// A bolt or breath fired toward `target`.
    Zap {
        ability: AbilityKind,
        target: Target,
        power: i32,
        range: i32,
    },
    /// An effect centred on the player reaching everything in view.
    Burst { ability: AbilityKind, power: i32 },
    /// An effect aimed at the one monster at `target`.
    Hex {
        ability: AbilityKind,
        target: Target,
        power: i32,
    },
    /// Monsters called to the player's side, or against them when `hostile`.
    Summon {
        ability: AbilityKind,
        creature: &'static str,
        power: i32,
        hostile: bool,
    },
    /// The player moves; `None` means a random destination.
    Teleport {
        ability: AbilityKind,
        target: Option<Target>,
    },
    /// The player leaves the level.
    LevelChange { ability: AbilityKind },
    /// A cloud placed on the player's square.
    Cloud { kind: &'static str, size: i32, duration: i32 },
    Sanctuary,
    CorruptLevel { power: i32 },
    RecallStarted { god: God },
    RecallStopped,
    /// Carried item `item` was recharged or rebranded.
    ItemChanged {
        ability: AbilityKind,
        item: usize,
        brand: Option<&'static str>,
    },
    /// Carried item `item` was destroyed.
    ItemConsumed { ability: AbilityKind, item: usize },
    /// A god handed over an item.
    ItemGifted { ability: AbilityKind, item: &'static str },
    /// Remains or corpses were raised or delivered.
    Remains { ability: AbilityKind, power: i32 },
    /// The player left or joined a faith.
    FaithChanged { from: God, to: God },
}

impl AbilityEvent {
    /// Ability that raised the event, where one is recorded.
    pub fn ability(&self) -> Option<AbilityKind> {
        match self {
            Self::Zap { ability, .. }
            | Self::Burst { ability, .. }
            | Self::Hex { ability, .. }
            | Self::Summon { ability, .. }
            | Self::Teleport { ability, .. }
            | Self::LevelChange { ability }
            | Self::ItemChanged { ability, .. }
            | Self::ItemConsumed { ability, .. }
            | Self::ItemGifted { ability, .. }
            | Self::Remains { ability, .. } => Some(*ability),
            Self::Cloud { .. }
            | Self::Sanctuary
            | Self::CorruptLevel { .. }
            | Self::RecallStarted { .. }
            | Self::RecallStopped
            | Self::FaithChanged { .. } => None,
        }
    }
}
