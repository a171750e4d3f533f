//! Battle lifecycle.
//!
//! A battle lives between [`start_battle`] and [`end_battle`]. Starting one
//! spawns the combatants from a [`Roster`], registers their animations, seeds
//! every readiness timer and inserts the [`BattleEngine`] and
//! [`BattleDirector`] resources. Each frame the host calls [`tick`] with the
//! schedule from [`build_battle_schedule`].
//!
//! [`perform_attack`] and [`reset_time`] expose the engine operations at the
//! world level for hosts (and tests) that drive combat directly.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};

use crate::action::actionstring::{ActionString, AnimAction};
use crate::components::animation::Animation;
use crate::components::combatant::{Combatant, Side};
use crate::components::effect::VisualEffect;
use crate::components::mapposition::MapPosition;
use crate::components::readiness::Readiness;
use crate::components::stats::Stats;
use crate::components::status::StatusEffects;
use crate::components::textpopup::TextPopup;
use crate::error::{BattleError, Result};
use crate::resources::animationstore::AnimationStore;
use crate::resources::battleconfig::BattleConfig;
use crate::resources::battleengine::{BattleEngine, BattleOutcome};
use crate::resources::director::BattleDirector;
use crate::resources::strategy::StrategyTable;
use crate::resources::worldtime::WorldTime;
use crate::roster::{Roster, RosterEntry};
use crate::systems::animation::animation_system;
use crate::systems::battle::{action_done_system, battle_outcome_system};
use crate::systems::command::command_system;
use crate::systems::director::{battle_director_system, world_director_system};
use crate::systems::messages::{init_battle_messages, update_battle_messages};
use crate::systems::readiness::readiness_system;
use crate::systems::textpopup::textpopup_system;
use crate::systems::time::update_world_time;
use crate::systems::ttl::ttl_system;

/// Spawn both parties and insert the battle resources.
///
/// The roster is validated first; on error nothing is spawned and no timer
/// starts. Resources already present (`WorldTime`, `AnimationStore`,
/// `StrategyTable`) are kept, so a host can pre-register animations or
/// strategies.
pub fn start_battle(world: &mut World, roster: &Roster, config: BattleConfig) -> Result<()> {
    if world.contains_resource::<BattleEngine>() {
        return Err(BattleError::PreconditionViolated(
            "a battle is already in progress".into(),
        ));
    }
    roster.validate()?;

    init_battle_messages(world);
    world.init_resource::<WorldTime>();
    world.init_resource::<AnimationStore>();
    world.init_resource::<StrategyTable>();

    let mut rng = config.rng();
    let mut players = Vec::with_capacity(roster.players.len());
    let mut enemies = Vec::with_capacity(roster.enemies.len());
    for side in [Side::Player, Side::Enemy] {
        for (slot, entry) in roster.side(side).iter().enumerate() {
            let entity = spawn_combatant(world, entry, slot, side, &mut rng)?;
            match side {
                Side::Player => players.push(entity),
                Side::Enemy => enemies.push(entity),
            }
        }
    }

    world.insert_resource(BattleEngine::new(&players, &enemies)?);
    world.insert_resource(BattleDirector::new(config.director_delay_ms));
    info!(
        "Battle started: {} vs {}",
        names(&roster.players),
        names(&roster.enemies)
    );
    world.insert_resource(config);
    Ok(())
}

fn spawn_combatant(
    world: &mut World,
    entry: &RosterEntry,
    slot: usize,
    side: Side,
    rng: &mut fastrand::Rng,
) -> Result<Entity> {
    let status = entry.status_effects()?;
    let home = Vec2::from(entry.position);

    let idle = ActionString::new(entry.name.clone(), AnimAction::Idle);
    {
        let mut store = world.resource_mut::<AnimationStore>();
        if !store.contains(&idle.key()) {
            store.register_character(&entry.name);
        }
    }

    let mut readiness = Readiness::default();
    readiness.initialize(entry.stats.speed, rng);
    debug!(
        "{} joins {:?} slot {} with timer {:.2}",
        entry.name, side, slot, readiness.timer
    );

    let entity = world
        .spawn((
            Combatant::new(entry.name.clone(), slot, side, entry.control).with_home(home),
            entry.stats.clone(),
            entry.abilities.clone(),
            status,
            readiness,
            MapPosition::from(home),
            Animation::new(idle.key()),
        ))
        .id();
    Ok(entity)
}

fn names(entries: &[RosterEntry]) -> String {
    entries
        .iter()
        .map(|e| e.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The battle schedule, one chain in a fixed order.
pub fn build_battle_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            update_battle_messages,
            readiness_system,
            command_system,
            battle_director_system,
            action_done_system,
            battle_outcome_system,
            textpopup_system,
            animation_system,
            ttl_system,
        )
            .chain(),
    );
    schedule
}

/// The map-side schedule driving the
/// [`WorldDirector`](crate::resources::worlddirector::WorldDirector).
pub fn build_world_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            world_director_system,
            textpopup_system,
            animation_system,
            ttl_system,
        )
            .chain(),
    );
    schedule
}

/// Advance time by `elapsed_ms` and run `schedule` once.
///
/// `WorldTime` and the battle message queues are created on first use, so
/// either schedule can be ticked on a bare world.
pub fn tick(world: &mut World, schedule: &mut Schedule, elapsed_ms: f32) {
    world.init_resource::<WorldTime>();
    init_battle_messages(world);
    update_world_time(world, elapsed_ms);
    schedule.run(world);
}

/// Tear the battle down. Returns the outcome if the battle was decided.
pub fn end_battle(world: &mut World) -> Option<BattleOutcome> {
    if let Some(mut director) = world.get_resource_mut::<BattleDirector>() {
        director.abort();
    }
    world.remove_resource::<BattleDirector>();
    let outcome = world
        .remove_resource::<BattleEngine>()
        .and_then(|engine| engine.outcome());

    let mut query = world.query_filtered::<Entity, Or<(
        With<Combatant>,
        With<TextPopup>,
        With<VisualEffect>,
    )>>();
    let entities: Vec<Entity> = query.iter(world).collect();
    for entity in &entities {
        world.despawn(*entity);
    }
    info!("Battle ended ({:?}), {} entities despawned", outcome, entities.len());
    outcome
}

/// Apply a plain attack between two party slots and return the damage dealt.
///
/// `enemy_attacking` selects the direction: the enemy in `enemy` hits the
/// player in `player`, or the other way round.
pub fn perform_attack(
    world: &mut World,
    player: usize,
    enemy: usize,
    enemy_attacking: bool,
) -> Result<i32> {
    let engine = world
        .get_resource::<BattleEngine>()
        .ok_or_else(|| BattleError::PreconditionViolated("no battle in progress".into()))?;
    let (attacker, defender, defender_side, defender_slot) = if enemy_attacking {
        (
            engine.combatant(enemy, true)?,
            engine.combatant(player, false)?,
            Side::Player,
            player,
        )
    } else {
        (
            engine.combatant(player, false)?,
            engine.combatant(enemy, true)?,
            Side::Enemy,
            enemy,
        )
    };

    let damage = world
        .get::<Stats>(attacker)
        .map(BattleEngine::attack_damage)
        .ok_or(BattleError::MissingComponent("Stats"))?;
    let mut stats = world
        .get::<Stats>(defender)
        .cloned()
        .ok_or(BattleError::MissingComponent("Stats"))?;
    let mut status = world.get::<StatusEffects>(defender).copied().unwrap_or_default();

    let dealt = world.resource_mut::<BattleEngine>().apply_damage(
        defender_side,
        defender_slot,
        &mut stats,
        &mut status,
        damage,
    );
    world.entity_mut(defender).insert((stats, status));
    debug!("perform_attack: {:?} -> {:?} for {}", attacker, defender, dealt);
    Ok(damage)
}

/// Zero a combatant's readiness timer and clear its ready flag.
pub fn reset_time(world: &mut World, slot: usize, is_enemy: bool) -> Result<()> {
    let entity = world
        .get_resource_mut::<BattleEngine>()
        .ok_or_else(|| BattleError::PreconditionViolated("no battle in progress".into()))?
        .clear_ready(Side::from_is_enemy(is_enemy), slot)?;
    world
        .get_mut::<Readiness>(entity)
        .ok_or(BattleError::MissingComponent("Readiness"))?
        .set_time(0.0);
    Ok(())
}
