//! Message queue rotation.
//!
//! Bevy ECS' [`Messages`] API requires calling `update()` once per tick so
//! that messages older than one tick are dropped. The battle schedule runs
//! this first; readers see a message on the tick it is written and the next.

use bevy_ecs::prelude::*;

use crate::events::action::ActionDone;
use crate::events::outcome::BattleOutcomeMessage;
use crate::events::ready::ReadyMessage;

pub fn update_battle_messages(
    ready: Option<ResMut<Messages<ReadyMessage>>>,
    done: Option<ResMut<Messages<ActionDone>>>,
    outcomes: Option<ResMut<Messages<BattleOutcomeMessage>>>,
) {
    if let Some(mut ready) = ready {
        ready.update();
    }
    if let Some(mut done) = done {
        done.update();
    }
    if let Some(mut outcomes) = outcomes {
        outcomes.update();
    }
}

/// Register every battle message type on `world`.
pub fn init_battle_messages(world: &mut World) {
    world.init_resource::<Messages<ReadyMessage>>();
    world.init_resource::<Messages<ActionDone>>();
    world.init_resource::<Messages<BattleOutcomeMessage>>();
}
