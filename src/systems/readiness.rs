//! Readiness timers.
//!
//! Advances every combatant's [`Readiness`] timer and chrono force by the
//! tick delta. A threshold crossing marks the slot ready in the
//! [`BattleEngine`] and writes a [`ReadyMessage`].

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::combatant::Combatant;
use crate::components::readiness::Readiness;
use crate::components::stats::Stats;
use crate::components::status::StatusEffects;
use crate::events::ready::ReadyMessage;
use crate::resources::battleconfig::BattleConfig;
use crate::resources::battleengine::BattleEngine;
use crate::resources::worldtime::WorldTime;

pub fn readiness_system(
    time: Res<WorldTime>,
    config: Option<Res<BattleConfig>>,
    engine: Option<ResMut<BattleEngine>>,
    mut query: Query<(Entity, &Combatant, &mut Stats, &StatusEffects, &mut Readiness)>,
    mut ready: MessageWriter<ReadyMessage>,
) {
    let Some(mut engine) = engine else {
        return;
    };
    let (scales, chrono_scale) = match config.as_deref() {
        Some(config) => (config.timer_scales(), config.chrono_scale),
        None => {
            let defaults = BattleConfig::default();
            (defaults.timer_scales(), defaults.chrono_scale)
        }
    };
    let dt = time.delta;

    for (entity, combatant, mut stats, status, mut readiness) in query.iter_mut() {
        if !readiness.battle_going {
            continue;
        }
        stats.regen_chrono_force(dt, *status, chrono_scale);
        if readiness.advance(dt, stats.speed, *status, scales) {
            debug!(
                "{} ({:?} slot {}) is ready at {:.2}",
                combatant.name, combatant.side, combatant.slot, readiness.timer
            );
            engine.mark_ready(combatant.side, combatant.slot);
            ready.write(ReadyMessage {
                entity,
                side: combatant.side,
                slot: combatant.slot,
            });
        }
    }
}
