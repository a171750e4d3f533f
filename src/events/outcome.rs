use bevy_ecs::message::Message;

use crate::resources::battleengine::BattleOutcome;

/// Written once, on the tick the battle is decided.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleOutcomeMessage {
    pub outcome: BattleOutcome,
}
