use bitflags::bitflags;

bitflags! {
    /// Behavioural flags attached to an ability definition.
    ///
    /// In data files the set is written as a `|`-separated string, e.g.
    /// `"EXHAUSTION | SKILL_DRAIN | CONF_OK"`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(
        feature = "serde",
        derive(serde::Serialize, serde::Deserialize),
        serde(transparent)
    )]
    pub struct AbilityFlags: u16 {
        /// Shares the breath cooldown with the other breath attacks.
        const BREATH       = 1 << 0;
        /// Takes effect after a delay.
        const DELAY        = 1 << 1;
        /// Hurts the user.
        const PAIN         = 1 << 2;
        /// Costs a variable amount of piety.
        const PIETY        = 1 << 3;
        /// Cannot be used while exhausted.
        const EXHAUSTION   = 1 << 4;
        /// Does not take a full turn.
        const INSTANT      = 1 << 5;
        /// HP cost also lowers maximum HP.
        const PERMANENT_HP = 1 << 6;
        /// MP cost also lowers maximum MP.
        const PERMANENT_MP = 1 << 7;
        /// Usable while confused.
        const CONF_OK      = 1 << 8;
        /// Temporarily drains skills.
        const SKILL_DRAIN  = 1 << 9;
        /// Consumes a sacrifice offered by Ru.
        const SACRIFICE    = 1 << 10;
        /// A failed roll still produces an adverse version of the effect.
        const HOSTILE      = 1 << 11;
        /// Paid for in gold rather than piety.
        const GOLD         = 1 << 12;
    }
}

impl AbilityFlags {
    /// Remarks shown in the detailed cost description, in display order.
    pub(crate) const REMARKS: [(AbilityFlags, &'static str); 7] = [
        (
            AbilityFlags::BREATH,
            "You must catch your breath between uses of this ability.",
        ),
        (
            AbilityFlags::DELAY,
            "It takes some time before being effective.",
        ),
        (AbilityFlags::PAIN, "Using this ability will hurt you."),
        (
            AbilityFlags::EXHAUSTION,
            "It cannot be used when exhausted.",
        ),
        (AbilityFlags::INSTANT, "It is instantaneous."),
        (AbilityFlags::CONF_OK, "You can use it even if confused."),
        (
            AbilityFlags::SKILL_DRAIN,
            "It will temporarily drain your skills when used.",
        ),
    ];
}
