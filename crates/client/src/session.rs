//! One interactive ability session over a loaded character.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use talent_content::ContentFactory;
use talent_core::{
    AbilityKind, AbilityRegistry, CostPolicy, Dice, Env, GenericCost, PcgRng, PlayerState,
    ScaledPietyCosts, SlotKey, StandardCosts, TalentConfig, TalentEngine, TalentEnv,
    WorldSnapshot,
};

use crate::command::Command;
use crate::prompt::LinePrompt;

/// Piety policy chosen by the configuration.
#[derive(Clone, Debug)]
pub enum PietyPolicy {
    Standard(StandardCosts),
    Scaled(ScaledPietyCosts),
}

impl PietyPolicy {
    pub fn for_config(config: &TalentConfig) -> Self {
        match &config.piety_scaling {
            Some(scaling) => Self::Scaled(scaling.into()),
            None => Self::Standard(StandardCosts),
        }
    }
}

impl CostPolicy for PietyPolicy {
    fn piety_cost(&self, ability: AbilityKind, cost: &GenericCost, dice: &mut Dice<'_>) -> i32 {
        match self {
            Self::Standard(policy) => policy.piety_cost(ability, cost, dice),
            Self::Scaled(policy) => policy.piety_cost(ability, cost, dice),
        }
    }
}

/// Everything a session reads but never changes.
pub struct Content {
    pub abilities: AbilityRegistry,
    pub config: TalentConfig,
    pub world: WorldSnapshot,
    pub policy: PietyPolicy,
}

impl Content {
    pub fn load(factory: &ContentFactory, world: &str) -> Result<Self> {
        let abilities = factory
            .load_abilities()
            .context("loading ability table")?;
        let config = factory.load_config().context("loading configuration")?;
        let world = factory
            .load_world(world)
            .with_context(|| format!("loading world '{}'", world))?;
        let policy = PietyPolicy::for_config(&config);

        tracing::info!(
            abilities = abilities.len(),
            data_dir = %factory.data_dir().display(),
            "content loaded"
        );
        Ok(Self {
            abilities,
            config,
            world,
            policy,
        })
    }
}

/// Reads commands until `quit` or end of input.
pub fn run_session<R: BufRead, W: Write>(
    content: &Content,
    player: &mut PlayerState,
    prompt: &LinePrompt<R, W>,
) -> Result<()> {
    let env = Env::with_all(
        &content.abilities,
        &content.world,
        prompt,
        &content.config,
        &PcgRng,
        &content.policy,
    )
    .into_talent_env();

    list_talents(&env, player, prompt)?;
    while let Some(line) = prompt.ask(">")? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                prompt.say(err.to_string())?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::List => list_talents(&env, player, prompt)?,
            Command::Describe(slot) => describe_slot(&env, player, prompt, slot)?,
            Command::Swap(a, b) => {
                TalentEngine::new(player).swap_slots(a, b);
                list_talents(&env, player, prompt)?;
            }
            Command::Use(slot) => use_slot(&env, player, prompt, slot)?,
        }
    }
    Ok(())
}

fn list_talents<R: BufRead, W: Write>(
    env: &TalentEnv<'_>,
    player: &mut PlayerState,
    prompt: &LinePrompt<R, W>,
) -> Result<()> {
    let mut engine = TalentEngine::new(player);
    let talents = engine.offered_talents(env, true, false)?;
    if talents.is_empty() {
        prompt.say("You have no special abilities.")?;
        return Ok(());
    }

    prompt.say(format!("  {:<32}{:<30}Failure", "Ability", "Cost"))?;
    for talent in &talents {
        let letter = talent.slot.map_or(' ', SlotKey::letter);
        prompt.say(format!("{} {}", letter, engine.describe_talent(env, talent)?))?;
    }
    Ok(())
}

fn describe_slot<R: BufRead, W: Write>(
    env: &TalentEnv<'_>,
    player: &mut PlayerState,
    prompt: &LinePrompt<R, W>,
    slot: SlotKey,
) -> Result<()> {
    let kind = player.slots.get(slot);
    if kind.is_none() {
        prompt.say("You don't have that ability.")?;
        return Ok(());
    }

    let engine = TalentEngine::new(player);
    let name = &env.abilities()?.ability(kind).name;
    prompt.say(format!("{} ({})", name, engine.describe_failure(env, kind)?))?;
    prompt.say(engine.detailed_cost_description(env, kind)?)?;
    Ok(())
}

fn use_slot<R: BufRead, W: Write>(
    env: &TalentEnv<'_>,
    player: &mut PlayerState,
    prompt: &LinePrompt<R, W>,
    slot: SlotKey,
) -> Result<()> {
    let kind = player.slots.get(slot);
    if kind.is_none() {
        prompt.say("You don't have that ability.")?;
        return Ok(());
    }

    let mut engine = TalentEngine::new(player);
    let talent = engine.talent(env, kind, false)?;
    let report = engine.attempt(env, &talent)?;
    for message in &report.messages {
        prompt.say(message)?;
    }
    for event in &report.events {
        prompt.say(format!("  [{:?}]", event))?;
    }

    tracing::info!(
        ability = %report.ability,
        outcome = %report.outcome,
        mp = report.charged.mp,
        hp = report.charged.hp,
        food = report.charged.food,
        piety = report.charged.piety,
        "ability attempt finished"
    );
    Ok(())
}
