//! Who decides what a ready combatant does.
//!
//! Each [`Control`] tag maps to a [`Strategy`] function. The command system
//! looks the tag up when a combatant becomes ready and turns the returned
//! [`BattleCommand`] into an action script. A strategy that returns `None`
//! leaves the combatant waiting for outside input.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;

use crate::components::combatant::{Combatant, Control};
use crate::resources::battleengine::BattleEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleCommand {
    Attack { target: Entity },
}

/// Picks a command for a ready combatant, given the battle as it stands and
/// a predicate telling whether an entity is still alive.
pub type Strategy = fn(&Combatant, &BattleEngine, &dyn Fn(Entity) -> bool) -> Option<BattleCommand>;

/// Attack the first living member of the opposing party.
pub fn attack_first_alive(
    actor: &Combatant,
    engine: &BattleEngine,
    alive: &dyn Fn(Entity) -> bool,
) -> Option<BattleCommand> {
    engine
        .party(actor.side.opponent())
        .iter()
        .find(|&target| alive(target))
        .map(|target| BattleCommand::Attack { target })
}

/// Leave the decision to the UI.
pub fn await_input(
    _actor: &Combatant,
    _engine: &BattleEngine,
    _alive: &dyn Fn(Entity) -> bool,
) -> Option<BattleCommand> {
    None
}

#[derive(Resource, Clone)]
pub struct StrategyTable {
    strategies: FxHashMap<Control, Strategy>,
}

impl Default for StrategyTable {
    fn default() -> Self {
        let mut table = StrategyTable {
            strategies: FxHashMap::default(),
        };
        table.register(Control::Player, await_input);
        table.register(Control::Ai, attack_first_alive);
        table
    }
}

impl StrategyTable {
    /// Every control tag attacks on its own; used for unattended battles.
    pub fn automatic() -> Self {
        let mut table = Self::default();
        table.register(Control::Player, attack_first_alive);
        table
    }

    pub fn register(&mut self, control: Control, strategy: Strategy) {
        self.strategies.insert(control, strategy);
    }

    pub fn decide(
        &self,
        actor: &Combatant,
        engine: &BattleEngine,
        alive: &dyn Fn(Entity) -> bool,
    ) -> Option<BattleCommand> {
        let strategy = self.strategies.get(&actor.control)?;
        strategy(actor, engine, alive)
    }
}
