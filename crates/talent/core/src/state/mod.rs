//! Authoritative player state.
//!
//! The host simulation owns [`PlayerState`] and threads it explicitly through
//! every engine call. Nothing here rolls dice or reads the world; the state is
//! plain data plus small derived predicates.
mod character;
mod durations;
mod mutations;
mod religion;
mod skills;
mod slots;

use std::collections::BTreeMap;

use bitflags::bitflags;

pub use character::{Form, God, Species, UndeadState};
pub use durations::{DurationKind, Durations};
pub use mutations::{Mutation, Mutations};
pub use religion::{Religion, SacrificeOffer};
pub use skills::{Skill, Skills};
pub use slots::{SlotKey, SlotTable};

use crate::ability::AbilityKind;

bitflags! {
    /// Boolean player attributes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(
        feature = "serde",
        derive(serde::Serialize, serde::Deserialize),
        serde(transparent)
    )]
    pub struct PlayerFlags: u16 {
        /// Flight that needs no duration.
        const PERM_FLIGHT             = 1 << 0;
        const FLIGHT_UNCANCELLABLE    = 1 << 1;
        /// A delayed fireball is waiting to be released.
        const DELAYED_FIREBALL        = 1 << 2;
        const INVIS_UNCANCELLABLE     = 1 << 3;
        const TRANSFORM_UNCANCELLABLE = 1 << 4;
        /// Mandibles extended for digging.
        const DIGGING                 = 1 << 5;
        const XRAY_VISION             = 1 << 6;
        const HELD                    = 1 << 7;
        const PETRIFYING              = 1 << 8;
    }
}

bitflags! {
    /// Abilities granted by worn or wielded items.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(
        feature = "serde",
        derive(serde::Serialize, serde::Deserialize),
        serde(transparent)
    )]
    pub struct Evokables: u8 {
        const BLINK        = 1 << 0;
        const FOG          = 1 << 1;
        const BERSERK      = 1 << 2;
        const INVISIBILITY = 1 << 3;
        const FLIGHT       = 1 << 4;
    }
}

/// Hunger bands derived from the nutrition counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HungerState {
    Starving,
    Hungry,
    Satiated,
    Full,
}

impl HungerState {
    pub const fn from_nutrition(hunger: i32) -> Self {
        if hunger < 1000 {
            Self::Starving
        } else if hunger < 2600 {
            Self::Hungry
        } else if hunger < 9000 {
            Self::Satiated
        } else {
            Self::Full
        }
    }
}

/// Hit points, with rot and permanent loss tracked separately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitPoints {
    pub current: i32,
    pub max: i32,
    /// Maximum temporarily lost to rot.
    pub rotted: i32,
    /// Maximum given up for good.
    pub lost: i32,
}

impl HitPoints {
    pub fn full(max: i32) -> Self {
        Self {
            current: max,
            max,
            rotted: 0,
            lost: 0,
        }
    }

    pub fn heal(&mut self, amount: i32) {
        self.current = (self.current + amount.max(0)).min(self.max);
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

/// Magic points, with the innate capacity that permanent costs consume.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MagicPoints {
    pub current: i32,
    pub max: i32,
    /// Maximum before equipment and other bonuses.
    pub innate_max: i32,
    /// Maximum given up for good.
    pub lost: i32,
}

impl MagicPoints {
    pub fn full(max: i32) -> Self {
        Self {
            current: max,
            max,
            innate_max: max,
            lost: 0,
        }
    }

    /// Innate capacity still available to permanent costs.
    pub fn innate_capacity(&self) -> i32 {
        (self.innate_max - self.lost).max(0)
    }

    pub fn restore(&mut self, amount: i32) {
        self.current = (self.current + amount.max(0)).min(self.max);
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

/// Strength, intelligence and dexterity against their maxima.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Stats {
    pub strength: i32,
    pub intelligence: i32,
    pub dexterity: i32,
    pub max_strength: i32,
    pub max_intelligence: i32,
    pub max_dexterity: i32,
}

impl Stats {
    pub fn is_drained(&self) -> bool {
        self.strength < self.max_strength
            || self.intelligence < self.max_intelligence
            || self.dexterity < self.max_dexterity
    }

    pub fn restore(&mut self) {
        self.strength = self.max_strength;
        self.intelligence = self.max_intelligence;
        self.dexterity = self.max_dexterity;
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            strength: 10,
            intelligence: 10,
            dexterity: 10,
            max_strength: 10,
            max_intelligence: 10,
            max_dexterity: 10,
        }
    }
}

/// Item categories abilities care about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemClass {
    Weapon,
    Wand,
    Armour,
    Book,
    Misc,
}

/// A carried item, reduced to what abilities read.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    pub class: ItemClass,
    #[cfg_attr(feature = "serde", serde(default))]
    pub brand: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub charges: i32,
}

impl Item {
    pub fn new(name: impl Into<String>, class: ItemClass) -> Self {
        Self {
            name: name.into(),
            class,
            brand: None,
            charges: 0,
        }
    }
}

/// Usage statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbilityCounters {
    pub abilities: u32,
    pub invocations: u32,
    pub uses: BTreeMap<AbilityKind, u32>,
}

impl AbilityCounters {
    pub fn record(&mut self, ability: AbilityKind, invocation: bool) {
        if invocation {
            self.invocations += 1;
        } else {
            self.abilities += 1;
        }
        *self.uses.entry(ability).or_default() += 1;
    }

    pub fn uses_of(&self, ability: AbilityKind) -> u32 {
        self.uses.get(&ability).copied().unwrap_or(0)
    }
}

/// Everything about the player that ability resolution reads or writes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerState {
    /// Seed fixed at character creation.
    pub game_seed: u64,
    /// Attempt counter mixed into every roll.
    pub nonce: u64,

    pub species: Species,
    pub experience_level: i32,
    pub form: Form,

    pub hp: HitPoints,
    pub mp: MagicPoints,
    /// Nutrition counter.
    pub hunger: i32,
    pub stats: Stats,

    pub religion: Religion,
    pub durations: Durations,
    pub flags: PlayerFlags,
    pub evokables: Evokables,
    pub mutations: Mutations,
    pub skills: Skills,

    pub gold: i32,
    pub spells_known: Vec<String>,
    pub inventory: Vec<Item>,
    /// Allies that recall can bring back.
    pub followers: Vec<String>,
    /// Allies being recalled right now.
    pub recall_list: Vec<String>,
    /// Skill points pending an Ashenzari transfer.
    pub transfer_skill_points: i32,
    /// Skill receiving the pending transfer.
    pub transfer_to: Option<Skill>,

    pub counters: AbilityCounters,
    pub slots: SlotTable,
}

impl PlayerState {
    pub fn new(species: Species, experience_level: i32) -> Self {
        Self {
            species,
            experience_level: experience_level.clamp(1, 27),
            ..Self::default()
        }
    }

    pub fn hunger_state(&self) -> HungerState {
        HungerState::from_nutrition(self.hunger)
    }

    pub fn is_berserk(&self) -> bool {
        self.durations.is_active(DurationKind::Berserk)
    }

    pub fn is_confused(&self) -> bool {
        self.durations.is_active(DurationKind::Confusion)
    }

    pub fn is_exhausted(&self) -> bool {
        self.durations.is_active(DurationKind::Exhausted)
    }

    pub fn airborne(&self) -> bool {
        self.flags.contains(PlayerFlags::PERM_FLIGHT)
            || self.durations.is_active(DurationKind::Flight)
    }

    /// Flight from the body itself: grown tengu or big wings.
    pub fn racial_permanent_flight(&self) -> bool {
        self.mutations.level(Mutation::TenguFlight) >= 2 || self.mutations.has(Mutation::BigWings)
    }

    /// Undead too lifeless to rage.
    ///
    /// With `temporary` set, a thirsty vampire counts; otherwise only the
    /// permanently dead do.
    pub fn is_lifeless_undead(&self, temporary: bool) -> bool {
        match self.species.undead_state() {
            UndeadState::Full => true,
            UndeadState::Semi => temporary && self.hunger_state() <= HungerState::Satiated,
            UndeadState::Alive => false,
        }
    }

    pub fn can_go_berserk(&self) -> bool {
        !self.is_berserk()
            && !self.is_exhausted()
            && !self.is_lifeless_undead(true)
            && self.species != Species::Formicid
    }

    /// Species whose hunger moves at all.
    pub fn eats(&self) -> bool {
        self.species.undead_state() == UndeadState::Alive && !self.species.is_foodless()
    }

    pub fn has_ailment(&self) -> bool {
        self.durations.is_active(DurationKind::Poison)
            || self.durations.is_active(DurationKind::Sickness)
            || self.durations.is_active(DurationKind::Confusion)
            || self.durations.is_active(DurationKind::Slow)
            || self.flags.contains(PlayerFlags::PETRIFYING)
            || self.hp.rotted > 0
    }

    pub fn items_of(&self, class: ItemClass) -> impl Iterator<Item = (usize, &Item)> {
        self.inventory
            .iter()
            .enumerate()
            .filter(move |(_, item)| item.class == class)
    }

    /// Skill level scaled by `multiplier`.
    pub fn skill(&self, skill: Skill, multiplier: i32) -> i32 {
        self.skills.scaled(skill, multiplier)
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            game_seed: 0,
            nonce: 0,
            species: Species::Human,
            experience_level: 1,
            form: Form::Normal,
            hp: HitPoints::full(20),
            mp: MagicPoints::full(5),
            hunger: 6000,
            stats: Stats::default(),
            religion: Religion::default(),
            durations: Durations::default(),
            flags: PlayerFlags::empty(),
            evokables: Evokables::empty(),
            mutations: Mutations::default(),
            skills: Skills::default(),
            gold: 0,
            spells_known: Vec::new(),
            inventory: Vec::new(),
            followers: Vec::new(),
            recall_list: Vec::new(),
            transfer_skill_points: 0,
            transfer_to: None,
            counters: AbilityCounters::default(),
            slots: SlotTable::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hunger_bands() {
        assert_eq!(HungerState::from_nutrition(999), HungerState::Starving);
        assert_eq!(HungerState::from_nutrition(1000), HungerState::Hungry);
        assert_eq!(HungerState::from_nutrition(8999), HungerState::Satiated);
        assert_eq!(HungerState::from_nutrition(12000), HungerState::Full);
    }

    #[test]
    fn thirsty_vampires_are_lifeless() {
        let mut player = PlayerState::new(Species::Vampire, 5);
        player.hunger = 3000;
        assert!(player.is_lifeless_undead(true));
        assert!(!player.is_lifeless_undead(false));
        player.hunger = 10_000;
        assert!(!player.is_lifeless_undead(true));
        assert!(PlayerState::new(Species::Mummy, 1).is_lifeless_undead(false));
    }

    #[test]
    fn formicids_cannot_rage() {
        assert!(!PlayerState::new(Species::Formicid, 3).can_go_berserk());
        assert!(PlayerState::new(Species::Human, 3).can_go_berserk());
    }

    #[test]
    fn racial_flight_needs_grown_wings() {
        let mut player = PlayerState::new(Species::Tengu, 10);
        player.mutations.set(Mutation::TenguFlight, 1);
        assert!(!player.racial_permanent_flight());
        player.mutations.set(Mutation::TenguFlight, 2);
        assert!(player.racial_permanent_flight());
    }

    #[test]
    fn innate_capacity_excludes_losses() {
        let mut mp = MagicPoints::full(12);
        mp.lost = 5;
        assert_eq!(mp.innate_capacity(), 7);
    }
}
