//! World oracle: read-only facts about the player's surroundings.

/// Location facts ability resolution needs but never changes.
///
/// Effects on the world are reported as [`AbilityEvent`](crate::execute::AbilityEvent)s
/// for the host to apply.
pub trait WorldOracle: Send + Sync {
    /// The player cannot make sound here.
    fn silenced(&self) -> bool;

    fn in_abyss(&self) -> bool;

    /// The Abyss can be entered or left from here at all.
    fn abyss_reachable(&self) -> bool;

    fn cloud_here(&self) -> bool;

    fn sanctuary_exists(&self) -> bool;

    fn level_corruptible(&self) -> bool;

    /// Landing or reverting shape here would kill the player.
    fn deadly_terrain_below(&self) -> bool;

    fn flight_forbidden(&self) -> bool;

    fn teleport_blocked(&self) -> bool;

    /// Monsters in view that would hear a recitation.
    fn audience(&self) -> u32;

    fn corpses_nearby(&self) -> bool;

    fn remains_here(&self) -> bool;

    fn spellbooks_in_view(&self) -> bool;

    fn shaft_possible(&self) -> bool;

    /// An orc priest is offering conversion to Beogh.
    fn beogh_conversion_offered(&self) -> bool;
}

/// Plain-data world oracle for hosts and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldSnapshot {
    pub silenced: bool,
    pub in_abyss: bool,
    pub abyss_unreachable: bool,
    pub cloud_here: bool,
    pub sanctuary_exists: bool,
    pub level_corruptible: bool,
    pub deadly_terrain_below: bool,
    pub flight_forbidden: bool,
    pub teleport_blocked: bool,
    pub audience: u32,
    pub corpses_nearby: bool,
    pub remains_here: bool,
    pub spellbooks_in_view: bool,
    pub shaft_possible: bool,
    pub beogh_conversion_offered: bool,
}

impl WorldOracle for WorldSnapshot {
    fn silenced(&self) -> bool {
        self.silenced
    }

    fn in_abyss(&self) -> bool {
        self.in_abyss
    }

    fn abyss_reachable(&self) -> bool {
        !self.abyss_unreachable
    }

    fn cloud_here(&self) -> bool {
        self.cloud_here
    }

    fn sanctuary_exists(&self) -> bool {
        self.sanctuary_exists
    }

    fn level_corruptible(&self) -> bool {
        self.level_corruptible
    }

    fn deadly_terrain_below(&self) -> bool {
        self.deadly_terrain_below
    }

    fn flight_forbidden(&self) -> bool {
        self.flight_forbidden
    }

    fn teleport_blocked(&self) -> bool {
        self.teleport_blocked
    }

    fn audience(&self) -> u32 {
        self.audience
    }

    fn corpses_nearby(&self) -> bool {
        self.corpses_nearby
    }

    fn remains_here(&self) -> bool {
        self.remains_here
    }

    fn spellbooks_in_view(&self) -> bool {
        self.spellbooks_in_view
    }

    fn shaft_possible(&self) -> bool {
        self.shaft_possible
    }

    fn beogh_conversion_offered(&self) -> bool {
        self.beogh_conversion_offered
    }
}
