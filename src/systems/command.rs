//! Turning ready combatants into action scripts.
//!
//! For each [`ReadyMessage`] the combatant's [`Control`](crate::components::combatant::Control)
//! tag is looked up in the [`StrategyTable`]. An attack command spawns the
//! damage popup entity, builds the attack script and queues it on the
//! [`BattleDirector`]. No command means the combatant stays ready until the
//! UI issues one through [`issue_attack`].

use bevy_ecs::prelude::*;
use log::{debug, error};

use crate::action::script::ActionScript;
use crate::components::combatant::Combatant;
use crate::components::mapposition::MapPosition;
use crate::components::stats::Stats;
use crate::components::status::StatusEffects;
use crate::components::textpopup::TextPopup;
use crate::error::{BattleError, Result};
use crate::events::ready::ReadyMessage;
use crate::resources::battleconfig::BattleConfig;
use crate::resources::battleengine::BattleEngine;
use crate::resources::director::BattleDirector;
use crate::resources::strategy::{BattleCommand, StrategyTable};

type CombatantQuery<'w, 's> =
    Query<'w, 's, (&'static Combatant, &'static Stats, &'static StatusEffects, &'static MapPosition)>;

pub fn command_system(
    mut reader: MessageReader<ReadyMessage>,
    engine: Option<Res<BattleEngine>>,
    director: Option<ResMut<BattleDirector>>,
    strategies: Option<Res<StrategyTable>>,
    config: Option<Res<BattleConfig>>,
    combatants: CombatantQuery,
    mut commands: Commands,
) {
    let (Some(engine), Some(mut director)) = (engine, director) else {
        return;
    };
    if engine.is_over() {
        reader.clear();
        return;
    }
    let fallback = StrategyTable::default();
    let strategies = strategies.as_deref().unwrap_or(&fallback);
    let popup_ms = config
        .as_deref()
        .map_or(BattleConfig::default().popup_ms, |c| c.popup_ms);

    let alive = |entity: Entity| {
        combatants
            .get(entity)
            .is_ok_and(|(_, stats, status, _)| stats.is_alive(*status))
    };

    for message in reader.read() {
        let Ok((combatant, _, _, _)) = combatants.get(message.entity) else {
            continue;
        };
        if !alive(message.entity) {
            continue;
        }
        let Some(command) = strategies.decide(combatant, &engine, &alive) else {
            debug!("{} is waiting for a command", combatant.name);
            continue;
        };
        let result = match command {
            BattleCommand::Attack { target } => {
                build_attack(message.entity, target, popup_ms, &combatants, &mut commands)
            }
        };
        match result {
            Ok(script) => director.add_action_script(script),
            Err(e) => error!("{} could not act: {}", combatant.name, e),
        }
    }
}

/// Queue an attack by `attacker` on `target`, as chosen by the battle menu.
///
/// The battle must still be going and the attacker must be alive, marked
/// ready and without a script of its own queued or running.
pub fn issue_attack(world: &mut World, attacker: Entity, target: Entity) -> Result<()> {
    check_can_command(world, attacker)?;
    let popup_ms = world
        .get_resource::<BattleConfig>()
        .map_or(BattleConfig::default().popup_ms, |c| c.popup_ms);
    let mut state = bevy_ecs::system::SystemState::<(CombatantQuery, Commands)>::new(world);
    let script = {
        let (combatants, mut commands) = state.get_mut(world);
        build_attack(attacker, target, popup_ms, &combatants, &mut commands)?
    };
    state.apply(world);
    if let Some(mut director) = world.get_resource_mut::<BattleDirector>() {
        director.add_action_script(script);
    }
    Ok(())
}

fn check_can_command(world: &World, attacker: Entity) -> Result<()> {
    let (Some(engine), Some(director)) = (
        world.get_resource::<BattleEngine>(),
        world.get_resource::<BattleDirector>(),
    ) else {
        return Err(BattleError::PreconditionViolated("no battle in progress".into()));
    };
    if engine.is_over() {
        return Err(BattleError::PreconditionViolated("battle is over".into()));
    }
    let combatant = world
        .get::<Combatant>(attacker)
        .ok_or(BattleError::MissingComponent("Combatant"))?;
    let status = world
        .get::<StatusEffects>(attacker)
        .copied()
        .unwrap_or_default();
    let alive = world
        .get::<Stats>(attacker)
        .is_some_and(|stats| stats.is_alive(status));
    if !alive {
        return Err(BattleError::PreconditionViolated(format!("{} is down", combatant.name)));
    }
    if !engine.party(combatant.side).is_ready(combatant.slot) {
        return Err(BattleError::PreconditionViolated(format!("{} is not ready", combatant.name)));
    }
    if director.director.has_script_for(attacker) {
        return Err(BattleError::PreconditionViolated(format!(
            "{} already has an action queued",
            combatant.name
        )));
    }
    Ok(())
}

fn build_attack(
    attacker: Entity,
    target: Entity,
    popup_ms: f32,
    combatants: &CombatantQuery,
    commands: &mut Commands,
) -> Result<ActionScript> {
    let (actor, stats, _, _) = combatants
        .get(attacker)
        .map_err(|_| BattleError::MissingComponent("Combatant"))?;
    let (_, _, _, target_pos) = combatants
        .get(target)
        .map_err(|_| BattleError::MissingComponent("MapPosition"))?;
    let damage = BattleEngine::attack_damage(stats);
    let popup = commands
        .spawn((
            TextPopup::new(damage.to_string()).with_duration(popup_ms),
            MapPosition::from(target_pos.pos),
        ))
        .id();
    debug!("{} attacks {:?} for {}", actor.name, target, damage);
    BattleDirector::attack_script(
        attacker,
        actor.side,
        actor.home,
        target,
        target_pos.pos,
        damage,
        popup,
    )
}
