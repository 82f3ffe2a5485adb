//! Ability identities.
//!
//! `AbilityKind` is the stable key every other component uses: definitions,
//! slot tables, failure formulas and effect handlers are all keyed by it.
//! Variant order is not significant; persisted data refers to abilities by
//! name.

/// Identity of a special action the player can invoke.
///
/// `None` is the sentinel "no ability". Lookups of anything unknown degrade to
/// it, and empty slots hold it.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityKind {
    #[default]
    None,

    // ========================================================================
    // Species, mutation and form abilities
    // ========================================================================
    SpitPoison,
    Blink,
    BreatheFire,
    BreatheFrost,
    BreathePoison,
    BreatheMephitic,
    BreatheLightning,
    BreathePower,
    BreatheStickyFlame,
    BreatheSteam,
    TranBat,
    SpitAcid,
    Fly,
    StopFlying,
    Hellfire,
    DelayedFireball,
    StopSinging,
    MummyRestoration,
    Dig,
    ShaftSelf,

    // ========================================================================
    // Evocations (items) and transformations
    // ========================================================================
    EvokeBlink,
    Recharging,
    EvokeBerserk,
    EvokeTurnInvisible,
    EvokeTurnVisible,
    EvokeFlight,
    EvokeFog,
    EndTransformation,

    // ========================================================================
    // Invocations
    // ========================================================================
    ZinRecite,
    ZinVitalisation,
    ZinImprison,
    ZinSanctuary,
    ZinCureAllMutations,
    ZinDonateGold,

    TsoDivineShield,
    TsoCleansingFlame,
    TsoSummonDivineWarrior,
    TsoBlessWeapon,

    KikuReceiveCorpses,
    KikuTorment,
    KikuGiftNecronomicon,
    KikuBlessWeapon,

    YredInjuryMirror,
    YredAnimateRemains,
    YredRecallUndeadSlaves,
    YredAnimateDead,
    YredDrainLife,
    YredEnslaveSoul,

    OkawaruHeroism,
    OkawaruFinesse,

    MakhlebMinorDestruction,
    MakhlebLesserServant,
    MakhlebMajorDestruction,
    MakhlebGreaterServant,

    SifMunaChannelEnergy,
    SifMunaForgetSpell,

    TrogBurnSpellbooks,
    TrogBerserk,
    TrogRegenMr,
    TrogBrothersInArms,

    ElyvilonLifesaving,
    ElyvilonLesserHealing,
    ElyvilonHealOther,
    ElyvilonPurification,
    ElyvilonGreaterHealing,
    ElyvilonDivineVigour,

    LugonuAbyssExit,
    LugonuBendSpace,
    LugonuBanish,
    LugonuCorrupt,
    LugonuAbyssEnter,
    LugonuBlessWeapon,

    BeoghSmiting,
    BeoghRecallOrcishFollowers,
    BeoghGiftItem,

    JiyvaCallJelly,
    JiyvaJellyParalyse,
    JiyvaSlimify,
    JiyvaCureBadMutation,

    CheibriadosTimeBend,
    CheibriadosDistortion,
    CheibriadosSlouch,
    CheibriadosTimeStep,

    AshenzariScrying,
    AshenzariTransferKnowledge,
    AshenzariEndTransfer,

    DithmenosShadowStep,
    DithmenosShadowForm,

    RuDrawOutPower,
    RuPowerLeap,
    RuApocalypse,
    RuSacrificePurity,
    RuSacrificeWords,
    RuSacrificeDrink,
    RuSacrificeEssence,
    RuSacrificeHealth,
    RuSacrificeStealth,
    RuSacrificeArtifice,
    RuSacrificeLove,
    RuSacrificeCourage,
    RuSacrificeArcana,
    RuSacrificeNimbleness,
    RuSacrificeDurability,
    RuSacrificeHand,
    RuSacrificeExperience,
    RuSacrificeSkill,
    RuSacrificeEye,
    RuSacrificeResistance,
    RuRejectSacrifices,

    // ========================================================================
    // Faith-independent religious actions
    // ========================================================================
    StopRecall,
    RenounceReligion,
    ConvertToBeogh,
}

impl AbilityKind {
    /// Returns true for the "no ability" sentinel.
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// Ru sacrifices share one handler and one slot range.
    pub const fn is_ru_sacrifice(self) -> bool {
        use AbilityKind::*;
        matches!(
            self,
            RuSacrificePurity
                | RuSacrificeWords
                | RuSacrificeDrink
                | RuSacrificeEssence
                | RuSacrificeHealth
                | RuSacrificeStealth
                | RuSacrificeArtifice
                | RuSacrificeLove
                | RuSacrificeCourage
                | RuSacrificeArcana
                | RuSacrificeNimbleness
                | RuSacrificeDurability
                | RuSacrificeHand
                | RuSacrificeExperience
                | RuSacrificeSkill
                | RuSacrificeEye
                | RuSacrificeResistance
        )
    }

    /// Breath-style attacks that share the breath cooldown.
    pub const fn is_breath(self) -> bool {
        use AbilityKind::*;
        matches!(
            self,
            SpitPoison
                | BreatheFire
                | BreatheFrost
                | BreathePoison
                | BreatheMephitic
                | BreatheLightning
                | BreathePower
                | BreatheStickyFlame
                | BreatheSteam
                | SpitAcid
        )
    }

    /// Weapon blessings granted at the top of a faith.
    pub const fn is_weapon_blessing(self) -> bool {
        matches!(
            self,
            Self::TsoBlessWeapon | Self::KikuBlessWeapon | Self::LugonuBlessWeapon
        )
    }
}
