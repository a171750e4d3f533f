//! Battle bookkeeping systems.
//!
//! - [`action_done_system`] resets the timer and ready flag of a combatant
//!   whose script finished.
//! - [`battle_outcome_system`] refreshes alive counts from the combatants'
//!   stats and ends the battle once a side has nobody left standing.

use bevy_ecs::prelude::*;
use log::{error, info, warn};

use crate::components::combatant::{Combatant, Side};
use crate::components::readiness::Readiness;
use crate::components::stats::Stats;
use crate::components::status::StatusEffects;
use crate::events::action::ActionDone;
use crate::events::outcome::BattleOutcomeMessage;
use crate::resources::battleengine::BattleEngine;
use crate::resources::director::BattleDirector;

pub fn action_done_system(
    mut reader: MessageReader<ActionDone>,
    engine: Option<ResMut<BattleEngine>>,
    mut query: Query<(&Combatant, &mut Readiness)>,
) {
    let Some(mut engine) = engine else {
        reader.clear();
        return;
    };
    for done in reader.read() {
        let Ok((combatant, mut readiness)) = query.get_mut(done.owner) else {
            warn!("Finished script owner {:?} is gone", done.owner);
            continue;
        };
        match engine.clear_ready(combatant.side, combatant.slot) {
            Ok(_) => readiness.set_time(0.0),
            Err(e) => error!("Cannot reset {}: {}", combatant.name, e),
        }
    }
}

pub fn battle_outcome_system(
    engine: Option<ResMut<BattleEngine>>,
    director: Option<ResMut<BattleDirector>>,
    mut query: Query<(&Combatant, &Stats, &StatusEffects, &mut Readiness)>,
    mut outcomes: MessageWriter<BattleOutcomeMessage>,
) {
    let Some(mut engine) = engine else {
        return;
    };
    if engine.is_over() {
        return;
    }

    for (combatant, stats, status, _) in query.iter() {
        engine
            .party_mut(combatant.side)
            .set_alive(combatant.slot, stats.is_alive(*status));
    }
    let player_alive = engine.party(Side::Player).alive_count();
    let enemy_alive = engine.party(Side::Enemy).alive_count();
    let Some(outcome) = engine.evaluate(player_alive, enemy_alive) else {
        return;
    };

    for (_, _, _, mut readiness) in query.iter_mut() {
        readiness.battle_going = false;
    }
    outcomes.write(BattleOutcomeMessage { outcome });

    if let Some(mut director) = director {
        director.abort();
        let winners: Vec<Entity> = engine.party(outcome.winner()).alive_members().collect();
        match BattleDirector::victory_script(&winners) {
            Ok(script) => director.add_action_script(script),
            Err(e) => error!("Victory script rejected: {}", e),
        }
    }
    info!(
        "{:?}: {} player(s) and {} enemy(ies) standing",
        outcome, player_alive, enemy_alive
    );
}
