use std::collections::BTreeMap;

/// Mutations that grant, alter or block abilities, plus the common bad ones.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Mutation {
    SpitPoison,
    Blink,
    HurlHellfire,
    MummyRestoration,
    TenguFlight,
    BigWings,
    /// Ru's sacrifice of artifice: no evocations.
    NoArtifice,
    NoLove,
    NoDrink,
    NoRead,
    MissingHand,
    MissingEye,
    Clumsy,
    Weak,
    Dopey,
    Frail,
    LowMagic,
    DeformedBody,
    Berserk,
    SlowHealing,
    Teleportitis,
    Regeneration,
    ToughSkin,
}

impl Mutation {
    /// Mutations Jiyva considers harmful.
    pub const fn is_bad(self) -> bool {
        matches!(
            self,
            Self::Clumsy
                | Self::Weak
                | Self::Dopey
                | Self::Frail
                | Self::LowMagic
                | Self::DeformedBody
                | Self::Berserk
                | Self::SlowHealing
                | Self::Teleportitis
        )
    }

    /// Mutations that cannot be cured because they are part of the body plan
    /// or a sacrifice.
    pub const fn is_permanent(self) -> bool {
        matches!(
            self,
            Self::TenguFlight
                | Self::BigWings
                | Self::MummyRestoration
                | Self::NoArtifice
                | Self::NoLove
                | Self::NoDrink
                | Self::NoRead
                | Self::MissingHand
                | Self::MissingEye
        )
    }
}

/// Mutation levels keyed by mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Mutations {
    levels: BTreeMap<Mutation, u8>,
}

impl Mutations {
    pub fn level(&self, mutation: Mutation) -> i32 {
        i32::from(self.levels.get(&mutation).copied().unwrap_or(0))
    }

    pub fn has(&self, mutation: Mutation) -> bool {
        self.level(mutation) > 0
    }

    pub fn set(&mut self, mutation: Mutation, level: u8) {
        if level == 0 {
            self.levels.remove(&mutation);
        } else {
            self.levels.insert(mutation, level);
        }
    }

    #[must_use]
    pub fn with(mut self, mutation: Mutation, level: u8) -> Self {
        self.set(mutation, level);
        self
    }

    pub fn remove(&mut self, mutation: Mutation) -> bool {
        self.levels.remove(&mutation).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Mutation, i32)> + '_ {
        self.levels.iter().map(|(m, level)| (*m, i32::from(*level)))
    }

    /// Mutations a cure can remove.
    pub fn curable(&self) -> impl Iterator<Item = Mutation> + '_ {
        self.levels
            .keys()
            .copied()
            .filter(|mutation| !mutation.is_permanent())
    }

    pub fn bad(&self) -> impl Iterator<Item = Mutation> + '_ {
        self.curable().filter(|mutation| mutation.is_bad())
    }
}
