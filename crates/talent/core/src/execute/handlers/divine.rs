//! Invocations granted by the gods.

use crate::ability::AbilityKind;
use crate::check::Refusal;
use crate::config::TalentConfig;
use crate::execute::handlers::{Handler, general};
use crate::execute::{AbilityEvent, EffectContext, Halt};
use crate::state::{DurationKind, Form, Item, ItemClass, Mutation, PlayerFlags, Skill};

/// Radius of the player's line of sight.
const LOS_RADIUS: i32 = 7;

pub(super) const HANDLERS: &[(AbilityKind, Handler)] = &[
    // Zin
    (AbilityKind::ZinRecite, zin_recite),
    (AbilityKind::ZinVitalisation, zin_vitalisation),
    (AbilityKind::ZinImprison, zin_imprison),
    (AbilityKind::ZinSanctuary, zin_sanctuary),
    (AbilityKind::ZinCureAllMutations, zin_cure_all),
    (AbilityKind::ZinDonateGold, zin_donate_gold),
    // The Shining One
    (AbilityKind::TsoDivineShield, tso_divine_shield),
    (AbilityKind::TsoCleansingFlame, tso_cleansing_flame),
    (AbilityKind::TsoSummonDivineWarrior, tso_divine_warrior),
    (AbilityKind::TsoBlessWeapon, bless_weapon),
    // Kikubaaqudgha
    (AbilityKind::KikuReceiveCorpses, kiku_receive_corpses),
    (AbilityKind::KikuTorment, kiku_torment),
    (AbilityKind::KikuGiftNecronomicon, kiku_necronomicon),
    (AbilityKind::KikuBlessWeapon, bless_weapon),
    // Yredelemnul
    (AbilityKind::YredInjuryMirror, yred_injury_mirror),
    (AbilityKind::YredAnimateRemains, yred_animate_remains),
    (AbilityKind::YredRecallUndeadSlaves, start_recall),
    (AbilityKind::YredAnimateDead, yred_animate_dead),
    (AbilityKind::YredDrainLife, yred_drain_life),
    (AbilityKind::YredEnslaveSoul, yred_enslave_soul),
    // Okawaru
    (AbilityKind::OkawaruHeroism, okawaru_heroism),
    (AbilityKind::OkawaruFinesse, okawaru_finesse),
    // Makhleb
    (AbilityKind::MakhlebMinorDestruction, makhleb_destruction),
    (AbilityKind::MakhlebMajorDestruction, makhleb_destruction),
    (AbilityKind::MakhlebLesserServant, makhleb_servant),
    (AbilityKind::MakhlebGreaterServant, makhleb_servant),
    // Sif Muna
    (AbilityKind::SifMunaChannelEnergy, sif_channel_energy),
    (AbilityKind::SifMunaForgetSpell, sif_forget_spell),
    // Trog
    (AbilityKind::TrogBurnSpellbooks, trog_burn_spellbooks),
    (AbilityKind::TrogBerserk, trog_berserk),
    (AbilityKind::TrogRegenMr, trog_hand),
    (AbilityKind::TrogBrothersInArms, trog_brothers),
    // Elyvilon
    (AbilityKind::ElyvilonLifesaving, ely_lifesaving),
    (AbilityKind::ElyvilonLesserHealing, ely_healing),
    (AbilityKind::ElyvilonGreaterHealing, ely_healing),
    (AbilityKind::ElyvilonHealOther, ely_heal_other),
    (AbilityKind::ElyvilonPurification, ely_purification),
    (AbilityKind::ElyvilonDivineVigour, ely_divine_vigour),
    // Lugonu
    (AbilityKind::LugonuAbyssExit, lugonu_abyss_exit),
    (AbilityKind::LugonuBendSpace, lugonu_bend_space),
    (AbilityKind::LugonuBanish, lugonu_banish),
    (AbilityKind::LugonuCorrupt, lugonu_corrupt),
    (AbilityKind::LugonuAbyssEnter, lugonu_abyss_enter),
    (AbilityKind::LugonuBlessWeapon, bless_weapon),
    // Beogh
    (AbilityKind::BeoghSmiting, beogh_smiting),
    (AbilityKind::BeoghRecallOrcishFollowers, start_recall),
    (AbilityKind::BeoghGiftItem, beogh_gift_item),
    // Jiyva
    (AbilityKind::JiyvaCallJelly, jiyva_call_jelly),
    (AbilityKind::JiyvaJellyParalyse, jiyva_paralyse),
    (AbilityKind::JiyvaSlimify, jiyva_slimify),
    (AbilityKind::JiyvaCureBadMutation, jiyva_cure_bad_mutation),
    // Cheibriados
    (AbilityKind::CheibriadosTimeBend, chei_time_bend),
    (AbilityKind::CheibriadosDistortion, chei_distortion),
    (AbilityKind::CheibriadosSlouch, chei_slouch),
    (AbilityKind::CheibriadosTimeStep, chei_time_step),
    // Ashenzari
    (AbilityKind::AshenzariScrying, ash_scrying),
    (AbilityKind::AshenzariTransferKnowledge, ash_transfer_knowledge),
    (AbilityKind::AshenzariEndTransfer, ash_end_transfer),
    // Dithmenos
    (AbilityKind::DithmenosShadowStep, dith_shadow_step),
    (AbilityKind::DithmenosShadowForm, dith_shadow_form),
    // Ru
    (AbilityKind::RuDrawOutPower, ru_draw_out_power),
    (AbilityKind::RuPowerLeap, ru_power_leap),
    (AbilityKind::RuApocalypse, ru_apocalypse),
    (AbilityKind::RuSacrificePurity, ru_sacrifice),
    (AbilityKind::RuSacrificeWords, ru_sacrifice),
    (AbilityKind::RuSacrificeDrink, ru_sacrifice),
    (AbilityKind::RuSacrificeEssence, ru_sacrifice),
    (AbilityKind::RuSacrificeHealth, ru_sacrifice),
    (AbilityKind::RuSacrificeStealth, ru_sacrifice),
    (AbilityKind::RuSacrificeArtifice, ru_sacrifice),
    (AbilityKind::RuSacrificeLove, ru_sacrifice),
    (AbilityKind::RuSacrificeCourage, ru_sacrifice),
    (AbilityKind::RuSacrificeArcana, ru_sacrifice),
    (AbilityKind::RuSacrificeNimbleness, ru_sacrifice),
    (AbilityKind::RuSacrificeDurability, ru_sacrifice),
    (AbilityKind::RuSacrificeHand, ru_sacrifice),
    (AbilityKind::RuSacrificeExperience, ru_sacrifice),
    (AbilityKind::RuSacrificeSkill, ru_sacrifice),
    (AbilityKind::RuSacrificeEye, ru_sacrifice),
    (AbilityKind::RuSacrificeResistance, ru_sacrifice),
    (AbilityKind::RuRejectSacrifices, ru_reject),
];

const LESSER_SERVANTS: &[&str] = &[
    "hellwing",
    "neqoxec",
    "orange demon",
    "smoke demon",
    "ynoxinul",
];

const GREATER_SERVANTS: &[&str] = &[
    "executioner",
    "green death",
    "blizzard demon",
    "balrug",
    "cacodemon",
];

/// Message prefixed with the current god's name.
fn god_says(ctx: &mut EffectContext<'_, '_>, tail: &str) {
    let god = ctx.player.religion.god.title();
    let mut message = String::with_capacity(god.len() + tail.len());
    message.push_str(god);
    message.push_str(tail);
    if let Some(first) = message.get(..1) {
        let upper = first.to_ascii_uppercase();
        message.replace_range(..1, &upper);
    }
    ctx.say(message);
}

fn clear_ailments(ctx: &mut EffectContext<'_, '_>) {
    for kind in [
        DurationKind::Poison,
        DurationKind::Sickness,
        DurationKind::Confusion,
        DurationKind::Slow,
    ] {
        ctx.player.durations.clear(kind);
    }
    ctx.player.flags.remove(PlayerFlags::PETRIFYING);
}

// ============================================================================
// Zin
// ============================================================================

fn zin_recite(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    ctx.player.durations.set(DurationKind::Recite, 30);
    ctx.say("You clear your throat and prepare to recite.");
    let cooldown = 3 + ctx.dice.random2(10) + ctx.dice.random2(30);
    ctx.player
        .durations
        .increase(DurationKind::BreathWeapon, cooldown, None);
    Ok(())
}

fn zin_vitalisation(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    clear_ailments(ctx);
    ctx.player.stats.restore();
    let stamina = 10 + ctx.skill_rdiv(Skill::Invocations, 1, 2);
    ctx.player
        .durations
        .increase(DurationKind::DivineStamina, stamina, Some(100));
    ctx.say("You feel invigorated.");
    Ok(())
}

fn zin_imprison(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    let target = ctx.target(LOS_RADIUS, true)?;
    if target.is_self() {
        return Err(Refusal::condition("You cannot imprison yourself!").into());
    }
    ctx.fail_check()?;

    let size = ctx.skill(Skill::Invocations, 5) + 12;
    let power = 3 + ctx.dice.roll_dice(5, size) / 26;
    ctx.emit(AbilityEvent::Hex {
        ability: ctx.ability(),
        target,
        power,
    });
    Ok(())
}

fn zin_sanctuary(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    god_says(ctx, " creates a sanctuary around you.");
    ctx.emit(AbilityEvent::Sanctuary);
    Ok(())
}

fn zin_cure_all(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let curable: Vec<Mutation> = ctx.player.mutations.curable().collect();
    if curable.is_empty() {
        return Err(Refusal::condition("You have no mutations to be cured!").into());
    }
    for mutation in curable {
        ctx.player.mutations.remove(mutation);
    }
    ctx.player.religion.capstone_available = false;
    god_says(ctx, " draws all chaos from your body!");
    Ok(())
}

fn zin_donate_gold(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let donation = (ctx.player.gold / 2 + 1).min(ctx.player.gold);
    ctx.player.gold -= donation;
    ctx.say(format!("You donate {donation} gold."));
    Ok(())
}

// ============================================================================
// The Shining One
// ============================================================================

fn tso_divine_shield(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let shield = 9 + ctx.skill_rdiv(Skill::Invocations, 1, 3);
    let renewed = ctx.player.durations.is_active(DurationKind::DivineShield);
    ctx.player
        .durations
        .increase(DurationKind::DivineShield, shield, Some(50));
    ctx.say(if renewed {
        "Your divine shield is renewed."
    } else {
        "A divine shield forms around you!"
    });
    Ok(())
}

fn tso_cleansing_flame(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let power = 10 + ctx.skill_rdiv(Skill::Invocations, 7, 6);
    ctx.say("You are surrounded by cleansing flame.");
    ctx.emit(AbilityEvent::Burst {
        ability: ctx.ability(),
        power,
    });
    Ok(())
}

fn tso_divine_warrior(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let power = ctx.skill(Skill::Invocations, 4);
    ctx.emit(AbilityEvent::Summon {
        ability: ctx.ability(),
        creature: "daeva",
        power,
        hostile: false,
    });
    Ok(())
}

/// One-time brand from the god at the top of their favour.
fn bless_weapon(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let (brand, tail) = match ctx.ability() {
        AbilityKind::TsoBlessWeapon => ("holy wrath", " will bless one of your weapons."),
        AbilityKind::KikuBlessWeapon => ("pain", " will bloody one of your weapons with pain."),
        _ => (
            "distortion",
            " will brand one of your weapons with the corruption of the Abyss.",
        ),
    };

    let weapons: Vec<(usize, String)> = ctx
        .player
        .items_of(ItemClass::Weapon)
        .map(|(index, item)| (index, item.name.clone()))
        .collect();
    if weapons.is_empty() {
        return Err(Refusal::condition("You have no weapon to bless.").into());
    }
    god_says(ctx, tail);

    let names: Vec<String> = weapons.iter().map(|(_, name)| name.clone()).collect();
    let choice = ctx.choose("Brand which weapon?", &names)?;
    let Some((index, name)) = weapons.get(choice).cloned() else {
        return Err(Refusal::Cancelled.into());
    };
    ctx.confirm(&format!("Do you wish to have {name} blessed?"))?;

    if let Some(weapon) = ctx.player.inventory.get_mut(index) {
        weapon.brand = Some(brand.to_owned());
    }
    ctx.player.religion.capstone_available = false;
    ctx.say(format!("Your {name} shines brightly!"));
    ctx.emit(AbilityEvent::ItemChanged {
        ability: ctx.ability(),
        item: index,
        brand: Some(brand),
    });
    Ok(())
}

// ============================================================================
// Kikubaaqudgha
// ============================================================================

fn kiku_receive_corpses(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let power = ctx.skill(Skill::Necromancy, 4);
    ctx.say("You sense the presence of nearby corpses.");
    ctx.emit(AbilityEvent::Remains {
        ability: ctx.ability(),
        power,
    });
    Ok(())
}

fn kiku_torment(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    if !ctx.env.world()?.corpses_nearby() {
        return Err(Refusal::condition("There are no corpses to sacrifice!").into());
    }
    god_says(ctx, " torments the living!");
    ctx.emit(AbilityEvent::Burst {
        ability: ctx.ability(),
        power: 0,
    });
    Ok(())
}

fn kiku_necronomicon(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    ctx.player
        .inventory
        .push(Item::new("Necronomicon", ItemClass::Book));
    ctx.player.religion.capstone_available = false;
    god_says(ctx, " grants you a gift!");
    ctx.emit(AbilityEvent::ItemGifted {
        ability: ctx.ability(),
        item: "Necronomicon",
    });
    Ok(())
}

// ============================================================================
// Yredelemnul
// ============================================================================

/// Devotion duration shared by injury mirror and lifesaving.
fn devotion_duration(ctx: &mut EffectContext<'_, '_>) -> i32 {
    let piety = ctx.player.religion.piety;
    90 + ctx.dice.random2avg(piety * 10, 2) / 10
}

fn yred_injury_mirror(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    if ctx.player.durations.is_active(DurationKind::InjuryMirror) {
        ctx.say("Another wave of unholy energy enters you.");
    } else {
        let god = ctx.player.religion.god.title();
        ctx.say(format!(
            "You offer yourself to {god}, and fill with unholy energy."
        ));
    }
    let duration = devotion_duration(ctx);
    ctx.player
        .durations
        .set(DurationKind::InjuryMirror, duration);
    Ok(())
}

fn yred_animate_remains(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    if !ctx.env.world()?.remains_here() {
        return Err(Refusal::condition("There are no remains here to animate!").into());
    }
    ctx.say("You attempt to give life to the dead...");
    ctx.emit(AbilityEvent::Remains {
        ability: ctx.ability(),
        power: 0,
    });
    Ok(())
}

fn yred_animate_dead(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let power = ctx.skill_rdiv(Skill::Invocations, 1, 1) + 1;
    ctx.say("You call on the dead to rise...");
    ctx.emit(AbilityEvent::Remains {
        ability: ctx.ability(),
        power,
    });
    Ok(())
}

fn yred_drain_life(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let power = ctx.skill_rdiv(Skill::Invocations, 1, 1);
    ctx.emit(AbilityEvent::Burst {
        ability: ctx.ability(),
        power,
    });
    Ok(())
}

fn yred_enslave_soul(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    let power = ctx.skill(Skill::Invocations, 4);
    let target = ctx.target(LOS_RADIUS, true)?;
    if target.is_self() {
        return Err(Refusal::condition("Your soul already belongs to Yredelemnul.").into());
    }
    ctx.fail_check()?;
    ctx.emit(AbilityEvent::Hex {
        ability: ctx.ability(),
        target,
        power,
    });
    Ok(())
}

/// Recall of Yredelemnul's undead or Beogh's orcs.
fn start_recall(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    ctx.player.recall_list = ctx.player.followers.clone();
    ctx.say("You begin recalling your allies.");
    ctx.emit(AbilityEvent::RecallStarted {
        god: ctx.player.religion.god,
    });
    Ok(())
}

// ============================================================================
// Okawaru
// ============================================================================

/// Extends an Okawaru boon; returns whether it was already running.
fn okawaru_boost(ctx: &mut EffectContext<'_, '_>, kind: DurationKind) -> bool {
    let skill = ctx.skill(Skill::Invocations, 6);
    let amount = 10 + ctx.dice.random2avg(skill, 2);
    let renewed = ctx.player.durations.is_active(kind);
    ctx.player.durations.increase(kind, amount, Some(100));
    renewed
}

fn okawaru_heroism(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let renewed = okawaru_boost(ctx, DurationKind::Heroism);
    ctx.say(if renewed {
        "You feel more confident with your borrowed prowess."
    } else {
        "You gain the combat prowess of a mighty hero."
    });
    Ok(())
}

fn okawaru_finesse(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let renewed = okawaru_boost(ctx, DurationKind::Finesse);
    ctx.say(if renewed {
        "Your hands get new energy."
    } else {
        "You can now deal lightning-fast blows."
    });
    Ok(())
}

// ============================================================================
// Makhleb
// ============================================================================

fn makhleb_destruction(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    let minor = ctx.ability() == AbilityKind::MakhlebMinorDestruction;
    let range = if minor { LOS_RADIUS } else { 6 };
    let target = ctx.target(range, false)?;

    let skill = ctx.skill(Skill::Invocations, 1);
    let mut power = skill + ctx.dice.random2(1 + skill) + ctx.dice.random2(1 + skill);
    ctx.fail_check()?;

    // One of the five minor bolts is acid at half strength.
    if minor && ctx.dice.random2(5) == 4 {
        power /= 2;
    }
    ctx.emit(AbilityEvent::Zap {
        ability: ctx.ability(),
        target,
        power,
        range,
    });
    Ok(())
}

/// Summons a demon; on a failed roll it arrives hostile.
fn makhleb_servant(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    let pool = if ctx.ability() == AbilityKind::MakhlebLesserServant {
        LESSER_SERVANTS
    } else {
        GREATER_SERVANTS
    };
    let creature = ctx.dice.choose(pool).copied().unwrap_or("hellwing");
    let power = 20 + ctx.skill(Skill::Invocations, 3);
    let hostile = ctx.roll_failed();
    if hostile {
        ctx.say(format!("The {creature} is hostile!"));
    }
    ctx.emit(AbilityEvent::Summon {
        ability: ctx.ability(),
        creature,
        power,
        hostile,
    });
    Ok(())
}

// ============================================================================
// Sif Muna
// ============================================================================

fn sif_channel_energy(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let bonus = ctx.skill_rdiv(Skill::Invocations, 1, 4) + 2;
    let gained = 1 + ctx.dice.random2(bonus);
    ctx.player.mp.restore(gained);
    ctx.say("You channel some magical energy.");
    Ok(())
}

fn sif_forget_spell(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let spells = ctx.player.spells_known.clone();
    let choice = ctx.choose("Forget which spell?", &spells)?;
    let Some(spell) = spells.get(choice) else {
        return Err(Refusal::Cancelled.into());
    };
    ctx.confirm(&format!("Forget {spell}, freeing its spell levels?"))?;
    ctx.player.spells_known.remove(choice);
    ctx.say(format!("Your memory of {spell} unravels."));
    Ok(())
}

// ============================================================================
// Trog
// ============================================================================

fn trog_burn_spellbooks(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    if !ctx.env.world()?.spellbooks_in_view() {
        return Err(Refusal::condition("You cannot see a spellbook to ignite!").into());
    }
    let duration = 10 + ctx.dice.random2(10);
    ctx.say("Fire consumes the written word.");
    ctx.emit(AbilityEvent::Cloud {
        kind: "flame",
        size: 1,
        duration,
    });
    Ok(())
}

fn trog_berserk(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    general::go_berserk(ctx)
}

fn trog_hand(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let power = ctx.player.religion.piety / 2;
    let amount = 5 + ctx.dice.roll_dice(2, power / 3 + 1);
    ctx.player
        .durations
        .increase(DurationKind::TrogsHand, amount, Some(100));
    ctx.say("Your skin crawls.");
    Ok(())
}

fn trog_brothers(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let piety = ctx.player.religion.piety;
    let power = piety + ctx.dice.random2(piety / 4) - ctx.dice.random2(piety / 4);
    ctx.emit(AbilityEvent::Summon {
        ability: ctx.ability(),
        creature: "berserker",
        power,
        hostile: false,
    });
    Ok(())
}

// ============================================================================
// Elyvilon
// ============================================================================

fn ely_lifesaving(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    if ctx.player.durations.is_active(DurationKind::Lifesaving) {
        ctx.say("You renew your call for help.");
    } else {
        let god = ctx.player.religion.god.title();
        ctx.say(format!("You beseech {god} to protect your life."));
    }
    // May shorten a running duration.
    let duration = devotion_duration(ctx);
    ctx.player.durations.set(DurationKind::Lifesaving, duration);
    Ok(())
}

fn ely_healing(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let power = if ctx.ability() == AbilityKind::ElyvilonLesserHealing {
        3 + ctx.skill_rdiv(Skill::Invocations, 1, 6)
    } else {
        10 + ctx.skill_rdiv(Skill::Invocations, 1, 3)
    }
    .min(50);
    let healed = power + ctx.dice.roll_dice(2, power) - 2;
    ctx.player.hp.heal(healed);
    ctx.say("You are healed.");
    Ok(())
}

fn ely_heal_other(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    let target = ctx.target(LOS_RADIUS, true)?;
    if target.is_self() {
        return Err(Refusal::condition("You can only heal others!").into());
    }
    ctx.fail_check()?;
    let power = (10 + ctx.skill_rdiv(Skill::Invocations, 1, 3)).min(50);
    ctx.emit(AbilityEvent::Hex {
        ability: ctx.ability(),
        target,
        power,
    });
    Ok(())
}

fn ely_purification(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    clear_ailments(ctx);
    ctx.player.stats.restore();
    let rotted = ctx.player.hp.rotted;
    ctx.player.hp.max += rotted;
    ctx.player.hp.rotted = 0;
    ctx.say("You feel purified!");
    Ok(())
}

fn ely_divine_vigour(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    if ctx.player.durations.is_active(DurationKind::DivineVigour) {
        return Err(Refusal::condition("You are already imbued with divine vigour.").into());
    }
    let duration = 10 + ctx.skill_rdiv(Skill::Invocations, 1, 1);
    ctx.player
        .durations
        .set(DurationKind::DivineVigour, duration);
    ctx.say("You are imbued with divine vigour.");
    Ok(())
}

// ============================================================================
// Lugonu
// ============================================================================

fn lugonu_abyss_exit(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    ctx.say("You feel a sudden pull toward the dungeon.");
    ctx.emit(AbilityEvent::LevelChange {
        ability: ctx.ability(),
    });
    Ok(())
}

fn lugonu_bend_space(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    ctx.say("Space bends around you!");
    ctx.emit(AbilityEvent::Teleport {
        ability: ctx.ability(),
        target: None,
    });
    Ok(())
}

fn lugonu_banish(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    let power = 16 + ctx.skill(Skill::Invocations, 8);
    let target = ctx.target(LOS_RADIUS, true)?;
    if target.is_self() {
        return Err(Refusal::condition("You cannot banish yourself!").into());
    }
    ctx.fail_check()?;
    ctx.emit(AbilityEvent::Hex {
        ability: ctx.ability(),
        target,
        power,
    });
    Ok(())
}

fn lugonu_corrupt(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    if !ctx.env.world()?.level_corruptible() {
        return Err(Refusal::condition("This place cannot be corrupted.").into());
    }
    let power = 300 + ctx.skill(Skill::Invocations, 15);
    god_says(ctx, " infuses the level with the Abyss.");
    ctx.emit(AbilityEvent::CorruptLevel { power });
    Ok(())
}

fn lugonu_abyss_enter(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let hp_loss = ctx.dice.random2avg(ctx.player.hp.current, 2);
    ctx.player.hp.current = (ctx.player.hp.current - hp_loss).max(1);
    if ctx.player.mp.current > 0 {
        let mp_loss = ctx.dice.random2avg(ctx.player.mp.current, 2);
        ctx.player.mp.current -= mp_loss;
    }
    ctx.say("You are cast into the Abyss!");
    ctx.emit(AbilityEvent::LevelChange {
        ability: ctx.ability(),
    });
    Ok(())
}

// ============================================================================
// Beogh
// ============================================================================

fn beogh_smiting(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    let target = ctx.target(LOS_RADIUS, true)?;
    if target.is_self() {
        return Err(Refusal::condition("You cannot smite yourself!").into());
    }
    ctx.fail_check()?;
    let power = 12 + ctx.skill(Skill::Invocations, 6);
    ctx.emit(AbilityEvent::Hex {
        ability: ctx.ability(),
        target,
        power,
    });
    Ok(())
}

/// Hands a carried weapon or armour to a follower; a failed roll is ignored.
fn beogh_gift_item(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    if ctx.player.followers.is_empty() {
        return Err(Refusal::condition("There is no follower to give a gift to.").into());
    }
    let giftable: Vec<(usize, String)> = ctx
        .player
        .inventory
        .iter()
        .enumerate()
        .filter(|(_, item)| matches!(item.class, ItemClass::Weapon | ItemClass::Armour))
        .map(|(index, item)| (index, item.name.clone()))
        .collect();
    if giftable.is_empty() {
        return Err(Refusal::condition("You have nothing suitable to give.").into());
    }

    let followers = ctx.player.followers.clone();
    let recipient = ctx.choose("Give a gift to whom?", &followers)?;
    let names: Vec<String> = giftable.iter().map(|(_, name)| name.clone()).collect();
    let choice = ctx.choose("Give which item?", &names)?;
    let (Some(follower), Some((index, name))) =
        (followers.get(recipient), giftable.get(choice).cloned())
    else {
        return Err(Refusal::Cancelled.into());
    };
    ctx.fail_check()?;

    ctx.player.inventory.remove(index);
    ctx.say(format!("{follower} receives the {name}."));
    ctx.emit(AbilityEvent::ItemConsumed {
        ability: ctx.ability(),
        item: index,
    });
    Ok(())
}

// ============================================================================
// Jiyva
// ============================================================================

fn jiyva_call_jelly(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    ctx.emit(AbilityEvent::Summon {
        ability: ctx.ability(),
        creature: "jelly",
        power: 0,
        hostile: false,
    });
    Ok(())
}

fn jiyva_paralyse(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    ctx.emit(AbilityEvent::Burst {
        ability: ctx.ability(),
        power: ctx.player.religion.piety,
    });
    Ok(())
}

fn jiyva_slimify(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let piety = ctx.player.religion.piety;
    let amount = ctx.dice.random2avg(piety / 4, 2) + 3;
    ctx.player
        .durations
        .increase(DurationKind::Slimify, amount, Some(100));
    ctx.say("A thick mucus forms on your hands.");
    Ok(())
}

fn jiyva_cure_bad_mutation(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let bad: Vec<Mutation> = ctx.player.mutations.bad().collect();
    let Some(mutation) = ctx.dice.choose(&bad).copied() else {
        return Err(Refusal::condition("You have no bad mutations to be cured.").into());
    };
    ctx.player.mutations.remove(mutation);
    god_says(ctx, " cleanses a mutation from your body.");
    Ok(())
}

// ============================================================================
// Cheibriados
// ============================================================================

fn chei_time_bend(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let power = 16 + ctx.skill(Skill::Invocations, 8);
    ctx.say("The flow of time bends around you.");
    ctx.emit(AbilityEvent::Burst {
        ability: ctx.ability(),
        power,
    });
    Ok(())
}

fn chei_distortion(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    ctx.say("You warp the flow of time around you!");
    ctx.emit(AbilityEvent::Burst {
        ability: ctx.ability(),
        power: 0,
    });
    Ok(())
}

fn chei_slouch(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    if ctx.env.world()?.audience() == 0 {
        return Err(Refusal::condition("There is no one to slow down.").into());
    }
    ctx.say("You can feel time thicken for a moment.");
    ctx.emit(AbilityEvent::Burst {
        ability: ctx.ability(),
        power: ctx.player.religion.piety,
    });
    Ok(())
}

fn chei_time_step(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let power = ctx.skill(Skill::Invocations, 10) * ctx.player.religion.piety / 100;
    ctx.player
        .durations
        .set(DurationKind::TimeStep, power.max(1));
    ctx.say("You step out of the flow of time.");
    Ok(())
}

// ============================================================================
// Ashenzari
// ============================================================================

fn ash_scrying(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    ctx.say(if ctx.player.durations.is_active(DurationKind::Scrying) {
        "You extend your astral sight."
    } else {
        "You gain astral sight."
    });
    let piety = ctx.player.religion.piety;
    let duration = 100 + ctx.dice.random2avg(piety * 2, 2);
    ctx.player.durations.set(DurationKind::Scrying, duration);
    ctx.player.flags.insert(PlayerFlags::XRAY_VISION);
    Ok(())
}

/// Drains half of one skill into a pending transfer toward another.
fn ash_transfer_knowledge(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let sources: Vec<(Skill, i32)> = ctx.player.skills.trained().collect();
    let source_names: Vec<String> = sources.iter().map(|(skill, _)| skill.to_string()).collect();
    let source = ctx.choose("Transfer knowledge from which skill?", &source_names)?;
    let Some((from, tenths)) = sources.get(source).copied() else {
        return Err(Refusal::Cancelled.into());
    };

    let targets: Vec<Skill> = ctx
        .player
        .skills
        .unmaxed()
        .filter(|skill| *skill != from)
        .collect();
    let target_names: Vec<String> = targets.iter().map(ToString::to_string).collect();
    let target = ctx.choose("Transfer knowledge to which skill?", &target_names)?;
    let Some(to) = targets.get(target).copied() else {
        return Err(Refusal::Cancelled.into());
    };

    let amount = (tenths / 2).max(1);
    ctx.player.skills.set_level_tenths(from, tenths - amount);
    ctx.player.transfer_skill_points += amount;
    ctx.player.transfer_to = Some(to);
    ctx.say(format!("You begin transferring knowledge from {from} to {to}."));
    Ok(())
}

fn ash_end_transfer(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    ctx.confirm("Are you sure you want to cancel the transfer?")?;
    ctx.player.transfer_skill_points = 0;
    ctx.player.transfer_to = None;
    ctx.say("You are no longer transferring knowledge.");
    Ok(())
}

// ============================================================================
// Dithmenos
// ============================================================================

fn dith_shadow_step(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    let target = ctx.target(LOS_RADIUS, true)?;
    if target.is_self() {
        return Err(Refusal::Cancelled.into());
    }
    ctx.fail_check()?;
    ctx.say("You step into the shadows.");
    ctx.emit(AbilityEvent::Teleport {
        ability: ctx.ability(),
        target: Some(target),
    });
    Ok(())
}

fn dith_shadow_form(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let power = ctx.skill(Skill::Invocations, 2);
    ctx.player.form = Form::Shadow;
    ctx.player
        .durations
        .set(DurationKind::Transformation, power.max(10));
    ctx.say("You feel less conspicuous.");
    Ok(())
}

// ============================================================================
// Ru
// ============================================================================

fn ru_draw_out_power(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let player = &*ctx.player;
    if player.hp.is_full()
        && player.mp.is_full()
        && !player.is_confused()
        && !player.durations.is_active(DurationKind::Slow)
        && !player
            .flags
            .intersects(PlayerFlags::HELD | PlayerFlags::PETRIFYING)
    {
        return Err(Refusal::condition("You have no need to draw out power.").into());
    }

    let hp_max = ctx.player.hp.max;
    let mp_max = ctx.player.mp.max;
    let healed = hp_max / 3 + ctx.dice.random2(hp_max / 6 + 1);
    let restored = mp_max / 3 + ctx.dice.random2(mp_max / 6 + 1);
    ctx.player.hp.heal(healed);
    ctx.player.mp.restore(restored);
    ctx.player.durations.clear(DurationKind::Confusion);
    ctx.player.durations.clear(DurationKind::Slow);
    ctx.player
        .flags
        .remove(PlayerFlags::HELD | PlayerFlags::PETRIFYING);
    ctx.say("You draw out your power!");

    let exhaustion = 12 + ctx.dice.random2(5);
    ctx.player
        .durations
        .increase(DurationKind::Exhausted, exhaustion, None);
    Ok(())
}

fn ru_power_leap(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    let target = ctx.target(3, false)?;
    if target.is_self() {
        return Err(Refusal::Cancelled.into());
    }
    ctx.fail_check()?;
    let power = ctx.player.religion.piety;
    ctx.say("You leap!");
    ctx.emit(AbilityEvent::Teleport {
        ability: ctx.ability(),
        target: Some(target),
    });
    ctx.emit(AbilityEvent::Burst {
        ability: ctx.ability(),
        power,
    });
    let exhaustion = 18 + ctx.dice.random2(8);
    ctx.player
        .durations
        .increase(DurationKind::Exhausted, exhaustion, None);
    Ok(())
}

fn ru_apocalypse(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let power = ctx.player.religion.piety;
    ctx.say("You reveal the great annihilating truth to your foes!");
    ctx.emit(AbilityEvent::Burst {
        ability: ctx.ability(),
        power,
    });
    let exhaustion = 30 + ctx.dice.random2(20);
    ctx.player
        .durations
        .increase(DurationKind::Exhausted, exhaustion, None);
    Ok(())
}

/// Mutation a sacrifice inflicts, when it maps to one.
fn sacrifice_mutation(ctx: &mut EffectContext<'_, '_>) -> Option<Mutation> {
    match ctx.ability() {
        AbilityKind::RuSacrificeWords => Some(Mutation::NoRead),
        AbilityKind::RuSacrificeDrink => Some(Mutation::NoDrink),
        AbilityKind::RuSacrificeEssence => Some(Mutation::LowMagic),
        AbilityKind::RuSacrificeHealth => Some(Mutation::Frail),
        AbilityKind::RuSacrificeArtifice => Some(Mutation::NoArtifice),
        AbilityKind::RuSacrificeLove => Some(Mutation::NoLove),
        AbilityKind::RuSacrificeHand => Some(Mutation::MissingHand),
        AbilityKind::RuSacrificeEye => Some(Mutation::MissingEye),
        AbilityKind::RuSacrificeDurability => Some(Mutation::DeformedBody),
        AbilityKind::RuSacrificePurity => ctx
            .dice
            .choose(&[Mutation::Clumsy, Mutation::Weak, Mutation::Dopey])
            .copied(),
        _ => None,
    }
}

fn ru_sacrifice(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    let ability = ctx.ability();
    let Some(offer) = ctx.player.religion.offers(ability).copied() else {
        return Err(Refusal::condition("Ru is not asking for that sacrifice.").into());
    };
    ctx.confirm("Do you really want to make this sacrifice?")?;

    if let Some(mutation) = sacrifice_mutation(ctx) {
        let level = ctx.player.mutations.level(mutation) + 1;
        ctx.player
            .mutations
            .set(mutation, u8::try_from(level.min(3)).unwrap_or(3));
    }
    if ability == AbilityKind::RuSacrificeExperience {
        ctx.player.experience_level =
            (ctx.player.experience_level - TalentConfig::RU_SAC_XP_LEVELS).max(1);
    }

    let religion = &mut ctx.player.religion;
    religion.sacrifices.push(ability);
    religion.gain_piety(offer.piety);
    religion.available_sacrifices.clear();
    ctx.say("Ru is pleased with your sacrifice.");
    Ok(())
}

fn ru_reject(ctx: &mut EffectContext<'_, '_>) -> Result<(), Halt> {
    ctx.fail_check()?;
    ctx.confirm("Do you really want to reject the sacrifices Ru is offering?")?;
    ctx.player.religion.available_sacrifices.clear();
    ctx.say("Ru will take this into account.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityDef, AbilityRegistry};
    use crate::env::{Dice, Env, FixedRng, ScriptedPrompts, StandardCosts, Target, WorldSnapshot};
    use crate::state::{God, PlayerState, Religion, SacrificeOffer, Species};

    fn run(
        handler: Handler,
        def: &AbilityDef,
        player: &mut PlayerState,
        prompts: &ScriptedPrompts,
        failed: bool,
    ) -> (Result<(), Halt>, Vec<AbilityEvent>) {
        let registry = AbilityRegistry::new(vec![AbilityDef::sentinel()]).unwrap();
        let world = WorldSnapshot::default();
        let config = TalentConfig::default();
        let rng = FixedRng::new(1);
        let env = Env::with_all(&registry, &world, prompts, &config, &rng, &StandardCosts)
            .into_talent_env();
        let mut dice = Dice::new(&rng, 0, 0);
        let mut ctx = EffectContext::new(player, &env, def, &mut dice, failed);
        let result = handler(&mut ctx);
        let (_, events) = ctx.finish();
        (result, events)
    }

    #[test]
    fn failed_servant_turns_hostile() {
        let def = AbilityDef::new(AbilityKind::MakhlebLesserServant, "Lesser Servant of Makhleb");
        let mut player = PlayerState::new(Species::Human, 10);
        let prompts = ScriptedPrompts::new();

        let (result, events) = run(makhleb_servant, &def, &mut player, &prompts, true);
        assert_eq!(result, Ok(()));
        assert!(matches!(
            events.as_slice(),
            [AbilityEvent::Summon { hostile: true, .. }]
        ));
    }

    #[test]
    fn sacrifice_applies_mutation_and_piety() {
        let def = AbilityDef::new(AbilityKind::RuSacrificeHand, "Sacrifice a Hand");
        let mut player = PlayerState::new(Species::Human, 10);
        player.religion = Religion::worshipping(God::Ru, 40);
        player.religion.available_sacrifices = vec![SacrificeOffer {
            ability: AbilityKind::RuSacrificeHand,
            piety: 25,
        }];
        let prompts = ScriptedPrompts::new().confirm_with(true);

        let (result, _) = run(ru_sacrifice, &def, &mut player, &prompts, false);
        assert_eq!(result, Ok(()));
        assert!(player.mutations.has(Mutation::MissingHand));
        assert_eq!(player.religion.piety, 65);
        assert_eq!(player.religion.sacrifices, vec![AbilityKind::RuSacrificeHand]);
        assert!(player.religion.available_sacrifices.is_empty());
    }

    #[test]
    fn declined_sacrifice_changes_nothing() {
        let def = AbilityDef::new(AbilityKind::RuSacrificeWords, "Sacrifice Words");
        let mut player = PlayerState::new(Species::Human, 10);
        player.religion = Religion::worshipping(God::Ru, 40);
        player.religion.available_sacrifices = vec![SacrificeOffer {
            ability: AbilityKind::RuSacrificeWords,
            piety: 10,
        }];
        let before = player.clone();
        let prompts = ScriptedPrompts::new().confirm_with(false);

        let (result, _) = run(ru_sacrifice, &def, &mut player, &prompts, false);
        assert_eq!(result, Err(Halt::Abort(Refusal::Declined)));
        assert_eq!(player, before);
    }

    #[test]
    fn imprisoning_yourself_aborts() {
        let def = AbilityDef::new(AbilityKind::ZinImprison, "Imprison");
        let mut player = PlayerState::new(Species::Human, 10);
        let prompts = ScriptedPrompts::new().target_with(Some(Target::new(0, 0)));

        let (result, events) = run(zin_imprison, &def, &mut player, &prompts, false);
        assert!(matches!(result, Err(Halt::Abort(Refusal::Condition { .. }))));
        assert!(events.is_empty());
    }

    #[test]
    fn weapon_blessing_spends_capstone() {
        let def = AbilityDef::new(AbilityKind::TsoBlessWeapon, "Brand Weapon With Holy Wrath");
        let mut player = PlayerState::new(Species::Human, 20);
        player.religion = Religion::worshipping(God::ShiningOne, 160);
        player.religion.capstone_available = true;
        player.inventory.push(Item::new("long sword", ItemClass::Weapon));
        let prompts = ScriptedPrompts::new().item_with(Some(0)).confirm_with(true);

        let (result, events) = run(bless_weapon, &def, &mut player, &prompts, false);
        assert_eq!(result, Ok(()));
        assert_eq!(player.inventory[0].brand.as_deref(), Some("holy wrath"));
        assert!(!player.religion.capstone_available);
        assert_eq!(
            events,
            vec![AbilityEvent::ItemChanged {
                ability: AbilityKind::TsoBlessWeapon,
                item: 0,
                brand: Some("holy wrath"),
            }]
        );
    }

    #[test]
    fn failed_gift_keeps_the_item() {
        let def = AbilityDef::new(AbilityKind::BeoghGiftItem, "Give Item to Named Follower");
        let mut player = PlayerState::new(Species::HillOrc, 12);
        player.religion = Religion::worshipping(God::Beogh, 100);
        player.followers.push("Urug".into());
        player.inventory.push(Item::new("war axe", ItemClass::Weapon));
        let prompts = ScriptedPrompts::new().item_with(Some(0)).item_with(Some(0));

        let (result, events) = run(beogh_gift_item, &def, &mut player, &prompts, true);
        assert_eq!(result, Err(Halt::Fail));
        assert!(events.is_empty());
        assert_eq!(player.inventory.len(), 1);
    }
}
