use crate::ability::{AbilityFlags, AbilityKind, FailureFormula, GenericCost, ScalingCost};

/// Immutable definition of one ability.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDef {
    pub kind: AbilityKind,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mp_cost: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp_cost: ScalingCost,
    #[cfg_attr(feature = "serde", serde(default))]
    pub food_cost: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub piety_cost: GenericCost,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: AbilityFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub failure: FailureFormula,
    /// Faith-class ability: blocked by silence, counted as an invocation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub invocation: bool,
}

impl AbilityDef {
    pub fn new(kind: AbilityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            mp_cost: 0,
            hp_cost: ScalingCost::default(),
            food_cost: 0,
            piety_cost: GenericCost::default(),
            flags: AbilityFlags::empty(),
            failure: FailureFormula::Unrated,
            invocation: false,
        }
    }

    /// The "no ability" definition.
    pub fn sentinel() -> Self {
        Self::new(AbilityKind::None, "No ability")
    }

    #[must_use]
    pub fn with_mp(mut self, mp: i32) -> Self {
        self.mp_cost = mp.max(0);
        self
    }

    #[must_use]
    pub fn with_hp(mut self, hp: ScalingCost) -> Self {
        self.hp_cost = hp;
        self
    }

    #[must_use]
    pub fn with_food(mut self, food: i32) -> Self {
        self.food_cost = food.max(0);
        self
    }

    #[must_use]
    pub fn with_piety(mut self, piety: GenericCost) -> Self {
        self.piety_cost = piety;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: AbilityFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_failure(mut self, failure: FailureFormula) -> Self {
        self.failure = failure;
        self
    }

    #[must_use]
    pub fn invocation(mut self) -> Self {
        self.invocation = true;
        self
    }

    pub fn has(&self, flag: AbilityFlags) -> bool {
        self.flags.contains(flag)
    }

    /// True if any resource cost would be displayed.
    pub fn has_cost(&self) -> bool {
        self.mp_cost > 0
            || self.hp_cost.is_nonzero()
            || self.food_cost > 0
            || self.piety_cost.is_nonzero()
            || !self.flags.is_empty()
    }
}
