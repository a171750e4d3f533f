//! Text popup lifetime.
//!
//! Rendering popups advance by the tick delta. A popup that finished on an
//! earlier tick is despawned, which leaves the `ShowText` slot waiting on it
//! exactly one director update to observe `Done`.

use bevy_ecs::prelude::*;

use crate::components::textpopup::TextPopup;
use crate::resources::worldtime::WorldTime;

pub fn textpopup_system(
    time: Res<WorldTime>,
    mut query: Query<(Entity, &mut TextPopup)>,
    mut commands: Commands,
) {
    for (entity, mut popup) in query.iter_mut() {
        if popup.is_done() {
            commands.entity(entity).try_despawn();
            continue;
        }
        popup.advance(time.delta);
    }
}
