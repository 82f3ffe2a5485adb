//! Faith power tables.
//!
//! Each god grants activated powers at a piety rank. Rank 0 powers are
//! always available, rank -1 powers survive penance and rank 7 is the
//! one-time capstone gift.

use crate::ability::AbilityKind;
use crate::env::WorldOracle;
use crate::state::{God, PlayerState};
use crate::talent::redirect;

use crate::ability::AbilityKind as A;

/// Piety rank that marks a capstone gift.
pub const CAPSTONE_RANK: i32 = 7;

/// One activated power and the rank it unlocks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GodPower {
    pub rank: i32,
    pub ability: AbilityKind,
}

const fn power(rank: i32, ability: AbilityKind) -> GodPower {
    GodPower { rank, ability }
}

const ZIN: &[GodPower] = &[
    power(1, A::ZinRecite),
    power(2, A::ZinVitalisation),
    power(3, A::ZinImprison),
    power(5, A::ZinSanctuary),
    power(0, A::ZinDonateGold),
    power(CAPSTONE_RANK, A::ZinCureAllMutations),
];

const SHINING_ONE: &[GodPower] = &[
    power(1, A::TsoDivineShield),
    power(3, A::TsoCleansingFlame),
    power(5, A::TsoSummonDivineWarrior),
    power(CAPSTONE_RANK, A::TsoBlessWeapon),
];

const KIKUBAAQUDGHA: &[GodPower] = &[
    power(1, A::KikuReceiveCorpses),
    power(4, A::KikuTorment),
    power(CAPSTONE_RANK, A::KikuGiftNecronomicon),
    power(CAPSTONE_RANK, A::KikuBlessWeapon),
];

const YREDELEMNUL: &[GodPower] = &[
    power(1, A::YredAnimateRemains),
    power(2, A::YredRecallUndeadSlaves),
    power(2, A::YredAnimateDead),
    power(3, A::YredInjuryMirror),
    power(4, A::YredDrainLife),
    power(5, A::YredEnslaveSoul),
];

const OKAWARU: &[GodPower] = &[power(1, A::OkawaruHeroism), power(5, A::OkawaruFinesse)];

const MAKHLEB: &[GodPower] = &[
    power(1, A::MakhlebMinorDestruction),
    power(2, A::MakhlebLesserServant),
    power(3, A::MakhlebMajorDestruction),
    power(4, A::MakhlebGreaterServant),
];

const SIF_MUNA: &[GodPower] = &[
    power(1, A::SifMunaChannelEnergy),
    power(4, A::SifMunaForgetSpell),
];

const TROG: &[GodPower] = &[
    power(0, A::TrogBurnSpellbooks),
    power(1, A::TrogBerserk),
    power(2, A::TrogRegenMr),
    power(4, A::TrogBrothersInArms),
];

const ELYVILON: &[GodPower] = &[
    power(-1, A::ElyvilonLifesaving),
    power(1, A::ElyvilonLesserHealing),
    power(2, A::ElyvilonHealOther),
    power(3, A::ElyvilonPurification),
    power(4, A::ElyvilonGreaterHealing),
    power(5, A::ElyvilonDivineVigour),
];

const LUGONU: &[GodPower] = &[
    power(1, A::LugonuAbyssExit),
    power(1, A::LugonuBendSpace),
    power(2, A::LugonuBanish),
    power(4, A::LugonuCorrupt),
    power(5, A::LugonuAbyssEnter),
    power(CAPSTONE_RANK, A::LugonuBlessWeapon),
];

const BEOGH: &[GodPower] = &[
    power(2, A::BeoghSmiting),
    power(4, A::BeoghRecallOrcishFollowers),
    power(5, A::BeoghGiftItem),
];

const JIYVA: &[GodPower] = &[
    power(2, A::JiyvaCallJelly),
    power(3, A::JiyvaJellyParalyse),
    power(4, A::JiyvaSlimify),
    power(5, A::JiyvaCureBadMutation),
];

const CHEIBRIADOS: &[GodPower] = &[
    power(1, A::CheibriadosTimeBend),
    power(3, A::CheibriadosDistortion),
    power(4, A::CheibriadosSlouch),
    power(5, A::CheibriadosTimeStep),
];

const ASHENZARI: &[GodPower] = &[
    power(1, A::AshenzariScrying),
    power(4, A::AshenzariTransferKnowledge),
];

const DITHMENOS: &[GodPower] = &[
    power(3, A::DithmenosShadowStep),
    power(5, A::DithmenosShadowForm),
];

const RU: &[GodPower] = &[
    power(3, A::RuDrawOutPower),
    power(4, A::RuPowerLeap),
    power(5, A::RuApocalypse),
];

/// Activated powers `god` can grant, in menu order.
pub fn powers(god: God) -> &'static [GodPower] {
    match god {
        God::Zin => ZIN,
        God::ShiningOne => SHINING_ONE,
        God::Kikubaaqudgha => KIKUBAAQUDGHA,
        God::Yredelemnul => YREDELEMNUL,
        God::Okawaru => OKAWARU,
        God::Makhleb => MAKHLEB,
        God::SifMuna => SIF_MUNA,
        God::Trog => TROG,
        God::Elyvilon => ELYVILON,
        God::Lugonu => LUGONU,
        God::Beogh => BEOGH,
        God::Jiyva => JIYVA,
        God::Cheibriados => CHEIBRIADOS,
        God::Ashenzari => ASHENZARI,
        God::Dithmenos => DITHMENOS,
        God::Ru => RU,
        God::NoGod | God::Xom | God::Vehumet => &[],
    }
}

/// Whether the player's standing unlocks `power`.
pub fn unlocked(player: &PlayerState, power: &GodPower) -> bool {
    let religion = &player.religion;
    let ranked = power.rank <= 0
        || (power.rank == CAPSTONE_RANK && religion.capstone_available)
        || religion.piety_rank() >= power.rank;
    ranked && (religion.penance == 0 || power.rank == -1)
}

/// Faith actions currently granted, already redirected.
///
/// Ru's sacrifices and a pending knowledge transfer are listed even while
/// silenced; everything after them needs a voice unless `ignore_silence`.
pub fn god_abilities(
    player: &PlayerState,
    world: &dyn WorldOracle,
    ignore_silence: bool,
) -> Vec<AbilityKind> {
    let mut abilities = Vec::new();

    if player.religion.god == God::Ru {
        let offers = &player.religion.available_sacrifices;
        abilities.extend(offers.iter().map(|offer| offer.ability));
        if !offers.is_empty() {
            abilities.push(AbilityKind::RuRejectSacrifices);
        }
    }
    if player.transfer_skill_points > 0 {
        abilities.push(AbilityKind::AshenzariEndTransfer);
    }
    if !ignore_silence && world.silenced() {
        return abilities;
    }

    abilities.extend(
        powers(player.religion.god)
            .iter()
            .filter(|power| unlocked(player, power))
            .map(|power| redirect(power.ability, player, world))
            .filter(|ability| !ability.is_none()),
    );
    abilities
}
