//! Hostile death handling and despawn.

use bevy::prelude::*;

use super::components::{DeathTimer, Hostile};
use crate::combat::DeathEvent;

/// Dead hostiles topple over and start their corpse timer.
pub fn handle_hostile_death(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    mut hostiles: Query<&mut Transform, (With<Hostile>, Without<DeathTimer>)>,
) {
    for event in death_events.read() {
        let Ok(mut transform) = hostiles.get_mut(event.entity) else {
            continue;
        };
        transform.rotate_local_x(std::f32::consts::FRAC_PI_2);
        commands.entity(event.entity).insert(DeathTimer::default());
    }
}

/// Despawn hostiles after their corpse timer elapses.
pub fn despawn_dead_hostiles(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DeathTimer)>,
) {
    for (entity, mut death_timer) in query.iter_mut() {
        death_timer.0.tick(time.delta());

        if death_timer.0.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::enemies::CORPSE_DURATION;

    #[test]
    fn test_corpse_despawns_once_its_timer_finishes() {
        let mut app = App::new();
        app.init_resource::<Time>()
            .add_systems(Update, despawn_dead_hostiles);
        let corpse = app.world_mut().spawn((Hostile, DeathTimer::default())).id();

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(CORPSE_DURATION - 0.5));
        app.update();
        assert!(app.world().entities().contains(corpse));

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(0.6));
        app.update();
        assert!(!app.world().entities().contains(corpse));
    }
}
