//! Director systems.
//!
//! Action slots talk to actors through [`ActorAccess`]. Inside the ECS that
//! seam is [`ActorParams`], a [`SystemParam`] bundling the queries a slot may
//! touch: positions, stats/status for damage, animation state, popups, plus
//! `Commands` to spawn effect markers.
//!
//! - [`battle_director_system`] ticks the [`BattleDirector`] and writes
//!   [`ActionDone`] for every finished script with an owner.
//! - [`world_director_system`] ticks the map-side [`WorldDirector`].

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use glam::Vec2;
use log::{debug, warn};

use crate::action::actionstring::{ActionString, AnimAction};
use crate::action::actors::ActorAccess;
use crate::components::animation::Animation;
use crate::components::combatant::Combatant;
use crate::components::effect::{EFFECT_TTL_MS, VisualEffect};
use crate::components::mapposition::MapPosition;
use crate::components::stats::Stats;
use crate::components::status::StatusEffects;
use crate::components::textpopup::TextPopup;
use crate::components::ttl::Ttl;
use crate::events::action::ActionDone;
use crate::resources::animationstore::AnimationStore;
use crate::resources::director::BattleDirector;
use crate::resources::worlddirector::WorldDirector;
use crate::resources::worldtime::WorldTime;

/// Everything an action slot may read or write on an actor.
#[derive(SystemParam)]
pub struct ActorParams<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub positions: Query<'w, 's, &'static mut MapPosition>,
    pub vitals: Query<'w, 's, (&'static mut Stats, &'static mut StatusEffects)>,
    pub animations: Query<'w, 's, (&'static mut Animation, Option<&'static Combatant>)>,
    pub popups: Query<'w, 's, &'static mut TextPopup>,
    pub animation_store: Option<Res<'w, AnimationStore>>,
}

impl ActorAccess for ActorParams<'_, '_> {
    fn position(&self, actor: Entity) -> Option<Vec2> {
        self.positions.get(actor).ok().map(|p| p.pos)
    }

    fn set_position(&mut self, actor: Entity, pos: Vec2) {
        if let Ok(mut map_pos) = self.positions.get_mut(actor) {
            map_pos.pos = pos;
        }
    }

    fn play(&mut self, actor: Entity, action: AnimAction) {
        let Ok((mut animation, combatant)) = self.animations.get_mut(actor) else {
            return;
        };
        let Some(combatant) = combatant else {
            return;
        };
        let wanted = ActionString::new(combatant.name.clone(), action);
        let key = match self.animation_store.as_deref() {
            Some(store) => store.key_or_idle(&wanted),
            None => wanted.key(),
        };
        animation.play(key);
    }

    fn apply_damage(&mut self, actor: Entity, damage: i32) -> Option<(i32, bool)> {
        let (mut stats, mut status) = self.vitals.get_mut(actor).ok()?;
        let dealt = stats.take_damage(damage, &mut status);
        Some((dealt, status.is_dead()))
    }

    fn start_popup(&mut self, popup: Entity) {
        if let Ok(mut text) = self.popups.get_mut(popup) {
            text.start();
        }
    }

    fn popup_done(&self, popup: Entity) -> bool {
        self.popups.get(popup).map_or(true, |text| text.is_done())
    }

    fn display_effect(&mut self, actor: Entity, effect: &str) {
        let Some(pos) = self.position(actor) else {
            warn!("Effect '{}' on {:?}: actor has no position", effect, actor);
            return;
        };
        self.commands.spawn((
            VisualEffect {
                name: effect.to_string(),
                target: actor,
            },
            MapPosition::from(pos),
            Ttl::new(EFFECT_TTL_MS),
        ));
    }

    fn can_act(&self, actor: Entity) -> bool {
        self.vitals
            .get(actor)
            .map_or(true, |(stats, status)| stats.is_alive(*status))
    }

    fn discard_popup(&mut self, popup: Entity) {
        if self.popups.contains(popup) {
            self.commands.entity(popup).try_despawn();
        }
    }
}

pub fn battle_director_system(
    time: Res<WorldTime>,
    director: Option<ResMut<BattleDirector>>,
    mut actors: ActorParams,
    mut done: MessageWriter<ActionDone>,
) {
    let Some(mut director) = director else {
        return;
    };
    if let Some(finished) = director.update(time.delta, &mut actors) {
        match finished.owner {
            Some(owner) => {
                done.write(ActionDone { owner });
            }
            None => debug!("Unowned battle script finished"),
        }
    }
}

pub fn world_director_system(
    time: Res<WorldTime>,
    director: Option<ResMut<WorldDirector>>,
    mut actors: ActorParams,
) {
    let Some(mut director) = director else {
        return;
    };
    if let Some(finished) = director.update(time.delta, &mut actors) {
        debug!("World script for {:?} finished", finished.owner);
    }
}
